// src/data/mod.rs

//! The `data` module is the format vocabulary and compiled format
//! containers.
//!
//! ## Definitions of data
//!
//! ### Token
//!
//! A "token" is a named placeholder within a format string, e.g. `"yyyy"`.
//! It maps to a regular expression fragment and to the [`Component`] the
//! fragment captures. Tokens are held in a [`TokenTable`].
//!
//! ### Compiled Format
//!
//! A [`CompiledFormat`] is one format string translated to an anchored
//! regular expression, and the `Component` of each capture group.
//!
//! ### FormatSet
//!
//! A [`FormatSet`] is every `CompiledFormat` for one value type, in
//! precedence order, with the two region orderings precomputed.
//!
//! [`Component`]: crate::data::token::Component
//! [`TokenTable`]: crate::data::token::TokenTable
//! [`CompiledFormat`]: crate::data::format::CompiledFormat
//! [`FormatSet`]: crate::data::formatset::FormatSet

pub mod components;
pub mod format;
pub mod formatset;
pub mod token;
