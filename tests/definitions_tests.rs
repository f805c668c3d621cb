// tests/definitions_tests.rs
//
// exercise the public `sdmlib` API the way a dependent crate would

#![allow(non_snake_case)]

extern crate sdmlib;

use sdmlib::common::{DefinitionsError, ValueType};
use sdmlib::data::components::YearThreshold;
use sdmlib::data::token::Component;
use sdmlib::parser::convert::{DateTimeValue, NaiveDate};
use sdmlib::parser::matcher::{parse, raw_parse, ParseOptions};
use sdmlib::registry::definitions::{Definitions, FormatPosition};
use sdmlib::registry::region::{Region, RegionGuard};

use std::sync::Arc;
use std::thread;

extern crate more_asserts;
use more_asserts::assert_gt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const YT: YearThreshold = YearThreshold {
    threshold: 30,
    century: 2000,
};

fn date(
    y: i32,
    m: u32,
    d: u32,
) -> Option<DateTimeValue> {
    Some(DateTimeValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap()))
}

#[test]
fn test_configure_then_share() {
    let mut definitions = Definitions::new().with_year_threshold(YT);
    definitions
        .add_formats(ValueType::Date, &["yyyymmdd"], FormatPosition::After("yyyy.mm.dd"))
        .unwrap();
    definitions
        .add_format_tokens([("%y", r"\d{2}", Some(Component::Year))]);
    definitions
        .add_formats(ValueType::Date, &["%y|mm|dd"], FormatPosition::End)
        .unwrap();
    definitions.compile_formats(None).unwrap();
    let count = definitions.compile_count();

    let definitions = Arc::new(definitions);
    let mut handles = Vec::new();
    for region in [Region::US, Region::EU] {
        let definitions = Arc::clone(&definitions);
        handles.push(thread::spawn(move || {
            let _guard = RegionGuard::new(region);
            let options = ParseOptions::default();
            (
                region,
                parse(&definitions, "20000102", ValueType::Date, &options),
                parse(&definitions, "99|12|31", ValueType::Date, &options),
                parse(&definitions, "03/04/2005", ValueType::Date, &options),
            )
        }));
    }
    for handle in handles.into_iter() {
        let (region, compact, custom, ambiguous) = handle.join().unwrap();
        assert_eq!(compact, date(2000, 1, 2));
        assert_eq!(custom, date(1999, 12, 31));
        match region {
            Region::US => assert_eq!(ambiguous, date(2005, 3, 4)),
            Region::EU => assert_eq!(ambiguous, date(2005, 4, 3)),
        }
    }
    assert_eq!(definitions.compile_count(), count);
}

#[test]
fn test_errors_leave_lists_unchanged() {
    let mut definitions = Definitions::new();
    let time = definitions.formats(ValueType::Time).to_vec();

    let result = definitions.add_formats(ValueType::Time, &["h:nn"], FormatPosition::End);
    assert!(matches!(result, Err(DefinitionsError::DuplicateFormat { .. })));
    let result = definitions.add_formats(ValueType::Time, &["hh"], FormatPosition::After("nope"));
    assert!(matches!(result, Err(DefinitionsError::FormatNotFound { .. })));
    let result = definitions.remove_formats(ValueType::Time, &["nope"]);
    assert!(matches!(result, Err(DefinitionsError::FormatNotFound { .. })));

    assert_eq!(definitions.formats(ValueType::Time), time.as_slice());
}

#[test]
fn test_raw_parse_public() {
    let definitions = Definitions::new();
    let components = raw_parse(&definitions, "12:13:14", ValueType::Time, &ParseOptions::default());
    assert_eq!(components, Some([None, None, None, Some(12), Some(13), Some(14), None, None]));
    assert_gt!(definitions.compile_count(), 0);
}
