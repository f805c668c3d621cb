// src/data/token.rs

//! Format tokens: the vocabulary of a format string.
//!
//! A [`Token`] is a named placeholder, e.g. `"hh"`, mapped to a regular
//! expression fragment, e.g. `\d{2}`, and the [`Component`] the fragment
//! captures. A [`TokenTable`] holds all tokens known to a
//! [`Definitions`].
//!
//! The built-in vocabulary is [`FORMAT_TOKENS`].
//!
//! [`Definitions`]: crate::registry::definitions::Definitions

#![allow(non_upper_case_globals)]

use crate::common::{
    SLOT_DAY,
    SLOT_FRACTIONAL,
    SLOT_HOUR,
    SLOT_MINUTE,
    SLOT_MONTH,
    SLOT_OFFSET,
    SLOT_SECOND,
    SLOT_YEAR,
};
use crate::de_wrn;

use std::collections::BTreeMap;
use std::fmt;

use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// Regular expression fragment, a piece of a larger anchored pattern.
#[allow(non_camel_case_types)]
pub type RegexFragment_str = str;

/// The semantic role of a captured token value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Component {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// fractional seconds, normalized to microseconds
    FractionalSecond,
    /// numeric timezone offset, normalized to seconds
    Offset,
    /// day of week name; captured then discarded
    Weekday,
    /// `am` or `pm`; adjusts the hour
    Meridian,
}

impl Component {
    /// Slot of this component within [`Components`], if it has one.
    ///
    /// [`Components`]: crate::common::Components
    pub const fn slot(&self) -> Option<usize> {
        match self {
            Component::Year => Some(SLOT_YEAR),
            Component::Month => Some(SLOT_MONTH),
            Component::Day => Some(SLOT_DAY),
            Component::Hour => Some(SLOT_HOUR),
            Component::Minute => Some(SLOT_MINUTE),
            Component::Second => Some(SLOT_SECOND),
            Component::FractionalSecond => Some(SLOT_FRACTIONAL),
            Component::Offset => Some(SLOT_OFFSET),
            Component::Weekday | Component::Meridian => None,
        }
    }
}

/// One entry of a [`TokenTable`].
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Token {
    /// the text of the token as written in a format string, e.g. `"yyyy"`
    pub literal: String,
    /// regular expression fragment the token compiles to
    pub pattern: String,
    /// `None` compiles to a non-capturing group
    pub component: Option<Component>,
}

impl fmt::Debug for Token {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Token")
            .field("literal", &self.literal)
            .field("pattern", &self.pattern)
            .field("component", &self.component)
            .finish()
    }
}

// built-in regex fragments

const RP_D2: &RegexFragment_str = r"\d{2}";
const RP_D12: &RegexFragment_str = r"\d{1,2}";
const RP_D4: &RegexFragment_str = r"\d{4}";
/// month or weekday names, e.g. `"Jan"` or `"Wednesday"`
const RP_NAME: &RegexFragment_str = r"\w{3,9}";
/// year, four digits or two digits
const RP_YEAR_YY: &RegexFragment_str = concatcp!(RP_D4, "|", RP_D2);
/// fractional seconds, up to microsecond precision
const RP_FRACTIONAL: &RegexFragment_str = r"\d{1,6}";
/// `am`, `PM`, `a.m.`, etc.
const RP_MERIDIAN: &RegexFragment_str = r"[aApP]\.?[mM]\.?";
/// numeric offset, `+0930` or `-09:30`
const RP_OFFSET: &RegexFragment_str = concatcp!(r"[+-]", RP_D2, ":?", RP_D2);
/// optional blank
const RP_BLANKq: &RegexFragment_str = r"\s?";

/// Length of [`FORMAT_TOKENS`].
pub const FORMAT_TOKENS_LEN: usize = 18;

/// Built-in format tokens: `(literal, pattern, component)`.
pub const FORMAT_TOKENS: [(&str, &RegexFragment_str, Option<Component>); FORMAT_TOKENS_LEN] = [
    ("ddd", RP_NAME, Some(Component::Weekday)),
    ("dd", RP_D2, Some(Component::Day)),
    ("d", RP_D12, Some(Component::Day)),
    ("mmm", RP_NAME, Some(Component::Month)),
    ("mm", RP_D2, Some(Component::Month)),
    ("m", RP_D12, Some(Component::Month)),
    ("yyyy", RP_D4, Some(Component::Year)),
    ("yy", RP_YEAR_YY, Some(Component::Year)),
    ("hh", RP_D2, Some(Component::Hour)),
    ("h", RP_D12, Some(Component::Hour)),
    ("nn", RP_D2, Some(Component::Minute)),
    ("n", RP_D12, Some(Component::Minute)),
    ("ss", RP_D2, Some(Component::Second)),
    ("s", RP_D12, Some(Component::Second)),
    ("u", RP_FRACTIONAL, Some(Component::FractionalSecond)),
    ("ampm", RP_MERIDIAN, Some(Component::Meridian)),
    ("zo", RP_OFFSET, Some(Component::Offset)),
    ("_", RP_BLANKq, None),
];

/// Mapping of token literal to [`Token`].
///
/// Token literals are unique keys; registering a literal again overwrites
/// the prior definition. Formats already compiled keep a copy of the old
/// pattern text until they are recompiled.
#[derive(Clone, Debug, Default)]
pub struct TokenTable {
    tokens: BTreeMap<String, Token>,
    /// literals sorted longest-first, ties lexicographic; rebuilt on change
    scan_order: Vec<String>,
}

impl TokenTable {
    /// An empty table.
    pub fn new() -> TokenTable {
        TokenTable::default()
    }

    /// A table holding the built-in [`FORMAT_TOKENS`].
    pub fn builtin() -> TokenTable {
        let mut table = TokenTable::new();
        for (literal, pattern, component) in FORMAT_TOKENS.iter() {
            table.insert(literal, pattern, *component);
        }
        table.rebuild_scan_order();

        table
    }

    /// Add or overwrite the token for `literal`.
    ///
    /// An empty `literal` is ignored.
    pub fn register(
        &mut self,
        literal: &str,
        pattern: &RegexFragment_str,
        component: Option<Component>,
    ) {
        dpfn!("({:?}, {:?}, {:?})", literal, pattern, component);
        if !self.insert(literal, pattern, component) {
            dpfx!("ignored");
            return;
        }
        self.rebuild_scan_order();
        dpfx!();
    }

    fn insert(
        &mut self,
        literal: &str,
        pattern: &RegexFragment_str,
        component: Option<Component>,
    ) -> bool {
        if literal.is_empty() {
            de_wrn!("TokenTable: ignoring token with empty literal, pattern {:?}", pattern);
            return false;
        }
        let token = Token {
            literal: literal.to_string(),
            pattern: pattern.to_string(),
            component,
        };
        if let Some(_prior) = self.tokens.insert(literal.to_string(), token) {
            dpfo!("overwrote {:?}", _prior);
        }

        true
    }

    fn rebuild_scan_order(&mut self) {
        let mut order: Vec<String> = self.tokens.keys().cloned().collect();
        order.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self.scan_order = order;
    }

    pub fn get(
        &self,
        literal: &str,
    ) -> Option<&Token> {
        self.tokens.get(literal)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The longest token whose literal begins `text`.
    ///
    /// Candidates are tried longest-first so `"mmm"` wins over `"mm"` and
    /// `"m"`. Equal-length literals cannot both prefix the same text.
    pub fn match_prefix(
        &self,
        text: &str,
    ) -> Option<&Token> {
        self.scan_order
            .iter()
            .find(|literal| text.starts_with(literal.as_str()))
            .and_then(|literal| self.tokens.get(literal))
    }

    /// Iterate tokens in the order [`match_prefix`] tries them.
    ///
    /// [`match_prefix`]: TokenTable::match_prefix
    pub fn iter_scan_order(&self) -> impl Iterator<Item = &Token> {
        self.scan_order
            .iter()
            .filter_map(|literal| self.tokens.get(literal))
    }
}
