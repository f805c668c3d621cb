// src/tests/token_tests.rs

//! tests for `src/data/token.rs`

#![allow(non_snake_case)]

use crate::common::{SLOT_DAY, SLOT_OFFSET, SLOT_YEAR};
use crate::data::token::{Component, TokenTable, FORMAT_TOKENS, FORMAT_TOKENS_LEN};

use std::collections::HashSet;

use ::more_asserts::assert_ge;
#[allow(unused_imports)]
use ::si_trace_print::printers::{defn, defo, defx};
use ::test_case::test_case;

#[test]
fn test_FORMAT_TOKENS_unique() {
    let mut check: HashSet<&str> = HashSet::with_capacity(FORMAT_TOKENS_LEN);
    for (literal, _pattern, _component) in FORMAT_TOKENS.iter() {
        assert!(check.insert(literal), "token {:?} is declared twice", literal);
        assert!(!literal.is_empty(), "token literal is empty");
    }
    assert_eq!(check.len(), FORMAT_TOKENS_LEN);
}

#[test]
fn test_TokenTable_builtin() {
    let table = TokenTable::builtin();
    assert_eq!(table.len(), FORMAT_TOKENS_LEN);
    assert!(!table.is_empty());
    let token = table.get("yyyy").unwrap();
    assert_eq!(token.pattern, r"\d{4}");
    assert_eq!(token.component, Some(Component::Year));
    assert_eq!(table.get("_").unwrap().component, None);
    assert!(table.get("zzz").is_none());
}

#[test]
fn test_TokenTable_new_empty() {
    let table = TokenTable::new();
    assert!(table.is_empty());
    assert!(table.match_prefix("yyyy").is_none());
}

#[test]
fn test_TokenTable_scan_order_longest_first() {
    defn!();
    let table = TokenTable::builtin();
    let literals: Vec<&str> = table
        .iter_scan_order()
        .map(|token| token.literal.as_str())
        .collect();
    defo!("{:?}", literals);
    for pair in literals.windows(2) {
        assert_ge!(pair[0].len(), pair[1].len(), "{:?} before {:?}", pair[0], pair[1]);
        if pair[0].len() == pair[1].len() {
            assert!(pair[0] < pair[1], "{:?} before {:?}", pair[0], pair[1]);
        }
    }
    assert_eq!(literals.first(), Some(&"ampm"));
    defx!();
}

#[test_case("yyyy-mm-dd", Some("yyyy"))]
#[test_case("yy", Some("yy"))]
#[test_case("mmm d", Some("mmm"))]
#[test_case("mm/dd", Some("mm"))]
#[test_case("m/d", Some("m"))]
#[test_case("ddd, dd", Some("ddd"))]
#[test_case("ampm", Some("ampm"))]
#[test_case("am", None)]
#[test_case("/dd", None)]
#[test_case("", None)]
fn test_TokenTable_match_prefix(
    text: &str,
    expect: Option<&str>,
) {
    let table = TokenTable::builtin();
    let literal = table
        .match_prefix(text)
        .map(|token| token.literal.as_str());
    assert_eq!(literal, expect, "text {:?}", text);
}

#[test]
fn test_TokenTable_register_overwrites() {
    let mut table = TokenTable::builtin();
    table.register("yyyy", r"\d{3}", Some(Component::Year));
    assert_eq!(table.len(), FORMAT_TOKENS_LEN);
    assert_eq!(table.get("yyyy").unwrap().pattern, r"\d{3}");
}

#[test]
fn test_TokenTable_register_new_in_scan_order() {
    let mut table = TokenTable::builtin();
    table.register("%Y", r"\d{4}", Some(Component::Year));
    assert_eq!(table.len(), FORMAT_TOKENS_LEN + 1);
    assert_eq!(table.match_prefix("%Y-").unwrap().literal, "%Y");
    // a longer literal wins over its prefixes
    table.register("yyyyy", r"\d{5}", Some(Component::Year));
    assert_eq!(table.match_prefix("yyyyy").unwrap().literal, "yyyyy");
    assert_eq!(table.match_prefix("yyyy").unwrap().literal, "yyyy");
}

#[test]
fn test_TokenTable_register_empty_literal_ignored() {
    let mut table = TokenTable::builtin();
    table.register("", r"\d", None);
    assert_eq!(table.len(), FORMAT_TOKENS_LEN);
}

#[test_case(Component::Year, Some(SLOT_YEAR))]
#[test_case(Component::Day, Some(SLOT_DAY))]
#[test_case(Component::Offset, Some(SLOT_OFFSET))]
#[test_case(Component::Weekday, None)]
#[test_case(Component::Meridian, None)]
fn test_Component_slot(
    component: Component,
    expect: Option<usize>,
) {
    assert_eq!(component.slot(), expect);
}
