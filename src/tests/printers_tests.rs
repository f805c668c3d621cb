// src/tests/printers_tests.rs

//! tests for `src/debug/printers.rs`

#![allow(non_snake_case)]

use crate::debug::printers::{char_to_char_noraw, str_to_String_noraw};

use ::test_case::test_case;

#[test_case('a', 'a')]
#[test_case('\n', '␊')]
#[test_case('\t', '␉')]
#[test_case('\r', '␍')]
#[test_case(' ', ' ')]
fn test_char_to_char_noraw(
    c: char,
    expect: char,
) {
    assert_eq!(char_to_char_noraw(c), expect);
}

#[test]
fn test_str_to_String_noraw() {
    assert_eq!(str_to_String_noraw("12:13\n"), "12:13␊");
    assert_eq!(str_to_String_noraw(""), "");
}
