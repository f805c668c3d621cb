// src/registry/mod.rs

//! The `registry` module is the process-long configuration:
//! [`Definitions`] and the per-thread [`Region`] selector.
//!
//! [`Definitions`]: crate::registry::definitions::Definitions
//! [`Region`]: crate::registry::region::Region

pub mod definitions;
pub mod region;
