// src/parser/matcher.rs

//! Match input text against a [`Definitions`].
//!
//! Matching is a pure function of the input text, the `FormatSet` snapshot,
//! the calling thread's [`Region`], and an optional per-call format. The
//! first format to match the whole input wins. Ambiguity is resolved only by
//! precedence; no interpretation is ever preferred for being more
//! plausible.
//!
//! An input that matches nothing is `None`, never an error.
//!
//! [`Region`]: crate::registry::region::Region

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
use crate::common::{Components, FormatString, ValueType};
use crate::de_err;
use crate::parser::convert::{ChronoConverter, ComponentsConverter, DateTimeValue};
use crate::registry::definitions::Definitions;
use crate::registry::region::current_region;

#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// Per-call options for [`raw_parse`] and [`parse`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseOptions {
    /// Match only this format, bypassing the configured `FormatSet`.
    pub format: Option<FormatString>,
}

impl ParseOptions {
    pub fn with_format(format: &str) -> ParseOptions {
        ParseOptions {
            format: Some(format.to_string()),
        }
    }
}

/// Match `text` as a `value_type` and return the extracted [`Components`].
///
/// With `options.format`, only that format is tried. Otherwise the formats
/// of `value_type` are tried in the calling thread's region order.
///
/// A per-call format that fails to compile is treated as matching nothing.
pub fn raw_parse(
    definitions: &Definitions,
    text: &str,
    value_type: ValueType,
    options: &ParseOptions,
) -> Option<Components> {
    dpfn!("({:?}, {:?}, {:?})", str_to_String_noraw(text), value_type, options);
    let year_threshold = definitions.year_threshold();

    if let Some(format) = options.format.as_ref() {
        let compiled = match definitions.adhoc_format(format) {
            Ok(compiled) => compiled,
            Err(_err) => {
                de_err!("{}", _err);
                dpfx!("return None; format {:?} failed to compile", format);
                return None;
            }
        };
        let components = compiled.extract(text, year_threshold);
        dpfx!("return {:?}", components);
        return components;
    }

    let format_set = match definitions.format_set(value_type) {
        Ok(format_set) => format_set,
        Err(_err) => {
            de_err!("{}", _err);
            dpfx!("return None; {} formats failed to compile", value_type);
            return None;
        }
    };
    let region = current_region();
    dpfo!("region {}", region);
    for compiled in format_set.iter_region(region) {
        if let Some(components) = compiled.extract(text, year_threshold) {
            dpfx!("return {:?}; matched format {:?}", components, compiled.source());
            return Some(components);
        }
    }
    dpfx!("return None; no format matched");

    None
}

/// Match `text` then convert the result with `converter`.
pub fn parse_with<C>(
    definitions: &Definitions,
    text: &str,
    value_type: ValueType,
    options: &ParseOptions,
    converter: &C,
) -> Option<C::Value>
where
    C: ComponentsConverter,
{
    let components = raw_parse(definitions, text, value_type, options)?;

    converter.convert(value_type, &components)
}

/// Match `text` and convert it to a chrono value.
///
/// `None` if nothing matches or the extracted values are not a valid date
/// or time.
pub fn parse(
    definitions: &Definitions,
    text: &str,
    value_type: ValueType,
    options: &ParseOptions,
) -> Option<DateTimeValue> {
    parse_with(definitions, text, value_type, options, &ChronoConverter)
}
