// src/data/components.rs

//! Normalize captured text into the fixed [`Components`] slots.
//!
//! Values are converted, never validated: month `13` or hour `59` pass
//! through untouched. Plausibility belongs to whatever converts the
//! `Components` into a date or time value.

use crate::common::{
    ComponentValue,
    Components,
    COMPONENTS_NONE,
    SLOT_HOUR,
};
use crate::data::token::Component;

use std::collections::HashMap;

use ::chrono::Datelike; // for `year()`
use ::lazy_static::lazy_static;

/// Default two-digit year threshold.
pub const AMBIGUOUS_YEAR_THRESHOLD_DEFAULT: u8 = 30;

/// Digits of microsecond precision for a fractional second.
const FRACTIONAL_DIGITS: usize = 6;

/// How to expand a two-digit year.
///
/// A year below `threshold` is placed in `century`, any other in the
/// century before it. With threshold `30` in the 2000s, `"29"` is `2029`
/// and `"30"` is `1930`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct YearThreshold {
    pub threshold: u8,
    /// e.g. `2000`
    pub century: ComponentValue,
}

impl YearThreshold {
    /// Use the century of the current local date.
    pub fn now(threshold: u8) -> YearThreshold {
        let year = chrono::Local::now().year() as ComponentValue;
        YearThreshold {
            threshold,
            century: year / 100 * 100,
        }
    }

    /// Expand a two-digit year; other years are returned unchanged.
    pub fn expand(
        &self,
        year: ComponentValue,
        digits: usize,
    ) -> ComponentValue {
        if digits > 2 {
            return year;
        }
        if year < self.threshold as ComponentValue {
            self.century + year
        } else {
            self.century - 100 + year
        }
    }
}

impl Default for YearThreshold {
    fn default() -> YearThreshold {
        YearThreshold::now(AMBIGUOUS_YEAR_THRESHOLD_DEFAULT)
    }
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

lazy_static! {
    /// map lowercase month names and three-letter abbreviations to the
    /// month number, e.g. `"jan"` and `"january"` to `1`
    static ref MONTH_NAME_TO_INDEX: HashMap<String, ComponentValue> = {
        let mut map = HashMap::<String, ComponentValue>::with_capacity(MONTH_NAMES.len() * 2);
        for (index, name) in MONTH_NAMES.iter().enumerate() {
            map.insert(name.to_string(), index as ComponentValue + 1);
            map.insert(name[..3].to_string(), index as ComponentValue + 1);
        }
        // "sept" is commonly found
        map.insert(String::from("sept"), 9);

        map
    };
}

/// Month number from digits or from an English month name or
/// abbreviation, any case.
pub fn month_index(value: &str) -> Option<ComponentValue> {
    if value.bytes().all(|b| b.is_ascii_digit()) {
        return value.parse::<ComponentValue>().ok();
    }
    MONTH_NAME_TO_INDEX
        .get(value.to_ascii_lowercase().as_str())
        .copied()
}

/// 24-hour clock hour from `hour` and an optional meridian like `"pm"`
/// or `"A.M."`.
pub fn full_hour(
    hour: ComponentValue,
    meridian: Option<&str>,
) -> ComponentValue {
    let meridian = match meridian {
        Some(meridian) => meridian,
        None => return hour,
    };
    match meridian.chars().next() {
        Some('a') | Some('A') if hour == 12 => 0,
        Some('p') | Some('P') if hour != 12 => hour + 12,
        _ => hour,
    }
}

/// Microseconds from the digits after a decimal point,
/// e.g. `"5"` is `500000` and `"1234567"` is `123456`.
pub fn microseconds(digits: &str) -> Option<ComponentValue> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut buffer = String::with_capacity(FRACTIONAL_DIGITS);
    buffer.extend(digits.chars().take(FRACTIONAL_DIGITS));
    while buffer.len() < FRACTIONAL_DIGITS {
        buffer.push('0');
    }

    buffer.parse::<ComponentValue>().ok()
}

/// Seconds east of UTC from `"+09:30"`, `"-0800"` or `"+09"`.
pub fn offset_in_seconds(offset: &str) -> Option<ComponentValue> {
    let (sign, rest) = match offset.chars().next() {
        Some('+') => (1, &offset[1..]),
        Some('-') => (-1, &offset[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<ComponentValue>().ok()?, 0),
        4 => (digits[..2].parse::<ComponentValue>().ok()?, digits[2..].parse::<ComponentValue>().ok()?),
        _ => return None,
    };

    Some(sign * (hours * 3600 + minutes * 60))
}

fn parse_integer(value: &str) -> Option<ComponentValue> {
    value.trim().parse::<ComponentValue>().ok()
}

/// Build [`Components`] from `(component, captured text)` pairs.
///
/// Returns `None` if any captured value cannot be converted; the caller
/// then treats the format as not matching.
pub fn assemble_components<'a, I>(
    captured: I,
    year_threshold: &YearThreshold,
) -> Option<Components>
where
    I: IntoIterator<Item = (Component, &'a str)>,
{
    let mut components: Components = COMPONENTS_NONE;
    let mut meridian: Option<&'a str> = None;
    for (component, value) in captured {
        let converted: ComponentValue = match component {
            Component::Year => {
                let year = parse_integer(value)?;
                year_threshold.expand(year, value.trim().len())
            }
            Component::Month => month_index(value)?,
            Component::Day | Component::Hour | Component::Minute | Component::Second => parse_integer(value)?,
            Component::FractionalSecond => microseconds(value)?,
            Component::Offset => offset_in_seconds(value)?,
            Component::Meridian => {
                meridian = Some(value);
                continue;
            }
            Component::Weekday => continue,
        };
        if let Some(slot) = component.slot() {
            components[slot] = Some(converted);
        }
    }
    if let Some(hour) = components[SLOT_HOUR] {
        components[SLOT_HOUR] = Some(full_hour(hour, meridian));
    }

    Some(components)
}
