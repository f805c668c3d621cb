// src/parser/convert.rs

//! Turn extracted [`Components`] into date and time values.
//!
//! The matcher stops at `Components`; a [`ComponentsConverter`] decides what
//! a value is and whether it is valid. [`ChronoConverter`] is the default,
//! producing chrono types.

use crate::common::{
    ComponentValue,
    Components,
    ValueType,
    SLOT_DAY,
    SLOT_FRACTIONAL,
    SLOT_HOUR,
    SLOT_MINUTE,
    SLOT_MONTH,
    SLOT_OFFSET,
    SLOT_SECOND,
    SLOT_YEAR,
};

use std::fmt;

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    FixedOffset,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    TimeZone,
};

/// Converts [`Components`] to a value.
pub trait ComponentsConverter {
    type Value;

    /// `None` if `components` do not form a valid `Value`.
    fn convert(
        &self,
        value_type: ValueType,
        components: &Components,
    ) -> Option<Self::Value>;
}

/// A value produced by [`ChronoConverter`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateTimeValue {
    Date(NaiveDate),
    Time(NaiveTime),
    /// a datetime without an offset
    Naive(NaiveDateTime),
    /// a datetime with an offset
    Fixed(DateTime<FixedOffset>),
}

impl fmt::Display for DateTimeValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            DateTimeValue::Date(date) => write!(f, "{}", date),
            DateTimeValue::Time(time) => write!(f, "{}", time),
            DateTimeValue::Naive(datetime) => write!(f, "{}", datetime),
            DateTimeValue::Fixed(datetime) => write!(f, "{}", datetime),
        }
    }
}

/// Converts to [`DateTimeValue`].
///
/// - [`ValueType::Date`] needs year, month, day.
/// - [`ValueType::Time`] needs an hour; absent minute, second, and
///   fractional second are zero.
/// - [`ValueType::DateTime`] needs a date; an absent time is midnight. With
///   an offset the result is [`DateTimeValue::Fixed`], else
///   [`DateTimeValue::Naive`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ChronoConverter;

fn to_u32(value: Option<ComponentValue>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

fn to_date(components: &Components) -> Option<NaiveDate> {
    let year = i32::try_from(components[SLOT_YEAR]?).ok()?;
    NaiveDate::from_ymd_opt(year, to_u32(components[SLOT_MONTH])?, to_u32(components[SLOT_DAY])?)
}

fn to_time(components: &Components) -> Option<NaiveTime> {
    NaiveTime::from_hms_micro_opt(
        to_u32(components[SLOT_HOUR])?,
        to_u32(components[SLOT_MINUTE].or(Some(0)))?,
        to_u32(components[SLOT_SECOND].or(Some(0)))?,
        to_u32(components[SLOT_FRACTIONAL].or(Some(0)))?,
    )
}

impl ComponentsConverter for ChronoConverter {
    type Value = DateTimeValue;

    fn convert(
        &self,
        value_type: ValueType,
        components: &Components,
    ) -> Option<DateTimeValue> {
        match value_type {
            ValueType::Date => to_date(components).map(DateTimeValue::Date),
            ValueType::Time => to_time(components).map(DateTimeValue::Time),
            ValueType::DateTime => {
                let date = to_date(components)?;
                let time = match components[SLOT_HOUR] {
                    Some(_) => to_time(components)?,
                    None => NaiveTime::from_hms_opt(0, 0, 0)?,
                };
                let naive = NaiveDateTime::new(date, time);
                match components[SLOT_OFFSET] {
                    Some(offset) => {
                        let offset = FixedOffset::east_opt(i32::try_from(offset).ok()?)?;
                        offset
                            .from_local_datetime(&naive)
                            .single()
                            .map(DateTimeValue::Fixed)
                    }
                    None => Some(DateTimeValue::Naive(naive)),
                }
            }
        }
    }
}
