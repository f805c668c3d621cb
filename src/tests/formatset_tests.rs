// src/tests/formatset_tests.rs

//! tests for `src/data/formatset.rs`

#![allow(non_snake_case)]

use crate::common::{DefinitionsError, FormatString, ValueType};
use crate::data::formatset::{region_orders, FormatSet};
use crate::data::token::TokenTable;
use crate::registry::definitions::{FORMATS_DATE, FORMATS_DATETIME, FORMATS_TIME};
use crate::registry::region::Region;

use std::collections::HashSet;

#[allow(unused_imports)]
use ::si_trace_print::printers::{defn, defo, defx};
use ::test_case::test_case;

fn strings(formats: &[&str]) -> Vec<FormatString> {
    formats.iter().map(|f| f.to_string()).collect()
}

#[test]
fn test_FormatSet_compile_builtin_date() {
    defn!();
    let table = TokenTable::builtin();
    let fs = FormatSet::compile(ValueType::Date, &strings(&FORMATS_DATE), &table).unwrap();
    assert_eq!(fs.value_type(), ValueType::Date);
    assert_eq!(fs.len(), FORMATS_DATE.len());
    assert!(!fs.is_empty());
    for (entry, format) in fs.entries().iter().zip(FORMATS_DATE.iter()) {
        assert_eq!(entry.source(), *format);
    }
    let us = fs.sources(Region::US);
    defo!("US {:?}", us);
    assert_eq!(
        us,
        vec![
            "yyyy-mm-dd",
            "yyyy/mm/dd",
            "yyyy.mm.dd",
            "m/d/yy",
            r"m\d\yy",
            "d/m/yy",
            r"d\m\yy",
            "d-m-yy",
            "dd-mm-yyyy",
            "d.m.yy",
            "d mmm yy",
        ]
    );
    let eu = fs.sources(Region::EU);
    defo!("EU {:?}", eu);
    assert_eq!(
        eu,
        vec![
            "yyyy-mm-dd",
            "yyyy/mm/dd",
            "yyyy.mm.dd",
            "d/m/yy",
            r"d\m\yy",
            "m/d/yy",
            r"m\d\yy",
            "d-m-yy",
            "dd-mm-yyyy",
            "d.m.yy",
            "d mmm yy",
        ]
    );
    defx!();
}

#[test]
fn test_FormatSet_compile_builtin_datetime_eu() {
    let table = TokenTable::builtin();
    let fs = FormatSet::compile(ValueType::DateTime, &strings(&FORMATS_DATETIME), &table).unwrap();
    assert_eq!(fs.order(Region::US), (0..FORMATS_DATETIME.len()).collect::<Vec<usize>>().as_slice());
    assert_eq!(&fs.order(Region::EU)[4..10], &[7, 8, 9, 4, 5, 6]);
    assert_eq!(&fs.order(Region::EU)[10..], &fs.order(Region::US)[10..]);
}

#[test]
fn test_FormatSet_compile_builtin_time_same_order() {
    let table = TokenTable::builtin();
    let fs = FormatSet::compile(ValueType::Time, &strings(&FORMATS_TIME), &table).unwrap();
    assert_eq!(fs.order(Region::US), fs.order(Region::EU));
}

#[test]
fn test_FormatSet_compile_fails_whole() {
    let mut table = TokenTable::builtin();
    table.register("bad", "(", None);
    let result = FormatSet::compile(ValueType::Time, &strings(&["hh:nn", "bad"]), &table);
    assert!(matches!(result, Err(DefinitionsError::InvalidPattern { .. })));
}

#[test]
fn test_FormatSet_compile_empty() {
    let table = TokenTable::builtin();
    let fs = FormatSet::compile(ValueType::Date, &[], &table).unwrap();
    assert!(fs.is_empty());
    assert_eq!(fs.iter_region(Region::EU).count(), 0);
}

#[test_case(&["m/d/yy"], &[0], &[0]; "no counterpart")]
#[test_case(&["d/m/yy"], &[0], &[0]; "no counterpart day first")]
#[test_case(&["m/d/yy", "d/m/yy"], &[0, 1], &[1, 0])]
#[test_case(&["d/m/yy", "m/d/yy"], &[1, 0], &[0, 1]; "day first listed first")]
#[test_case(&["m/d/yy", "x", "d/m/yy"], &[0, 1, 2], &[2, 1, 0]; "unrelated keeps position")]
#[test_case(&["m/d/yy", "m-d-yy", "d-m-yy", "d/m/yy"], &[0, 1, 2, 3], &[2, 3, 0, 1])]
#[test_case(&["mm/dd/yyyy", "m/d/yy", "dd/mm/yyyy"], &[0, 1, 2], &[2, 1, 0]; "one pair")]
fn test_region_orders(
    formats: &[&str],
    expect_us: &[usize],
    expect_eu: &[usize],
) {
    let table = TokenTable::builtin();
    let (us, eu) = region_orders(&strings(formats), &table);
    assert_eq!(us, expect_us, "US order of {:?}", formats);
    assert_eq!(eu, expect_eu, "EU order of {:?}", formats);
}

#[test]
fn test_region_orders_are_permutations() {
    let table = TokenTable::builtin();
    for formats in [&FORMATS_DATE[..], &FORMATS_DATETIME[..], &FORMATS_TIME[..]].iter() {
        let (us, eu) = region_orders(&strings(formats), &table);
        for order in [us, eu].iter() {
            assert_eq!(order.len(), formats.len());
            let set: HashSet<&usize> = order.iter().collect();
            assert_eq!(set.len(), formats.len());
        }
    }
}
