// src/parser/mod.rs

//! The `parser` module matches input text against a [`Definitions`] and
//! converts the extracted components.
//!
//! [`Definitions`]: crate::registry::definitions::Definitions

pub mod convert;
pub mod matcher;
