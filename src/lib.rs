// src/lib.rs

//! _sdmlib_ matches free-form date and time strings against an ordered,
//! runtime-configurable library of format patterns.
//!
//! The interesting parts:
//! - [`Definitions`] holds per-type format lists like `"hh:nn:ss"` and the
//!   token vocabulary, and caches compiled [`FormatSet`]s.
//! - [`raw_parse`] walks a `FormatSet` in precedence order and returns the
//!   first extraction, as eight [`Components`] slots.
//! - [`use_euro_formats`] switches the calling thread to read ambiguous
//!   dates like `"01/02/2000"` day-first, without recompiling anything.
//!
//! ```
//! use sdmlib::common::ValueType;
//! use sdmlib::parser::matcher::{raw_parse, ParseOptions};
//! use sdmlib::registry::definitions::Definitions;
//!
//! let definitions = Definitions::new();
//! let components = raw_parse(&definitions, "12:13:14", ValueType::Time, &ParseOptions::default());
//! assert_eq!(components, Some([None, None, None, Some(12), Some(13), Some(14), None, None]));
//! ```
//!
//! [`Definitions`]: crate::registry::definitions::Definitions
//! [`FormatSet`]: crate::data::formatset::FormatSet
//! [`raw_parse`]: crate::parser::matcher::raw_parse
//! [`Components`]: crate::common::Components
//! [`use_euro_formats`]: crate::registry::definitions::Definitions::use_euro_formats

pub mod common;
pub mod data;
pub mod debug;
pub mod parser;
pub mod registry;
#[cfg(test)]
pub mod tests;
