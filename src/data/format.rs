// src/data/format.rs

//! The format compiler: translate a format string like `"hh:nn:ss"` into a
//! [`CompiledFormat`], an anchored [`Regex`] plus the [`Component`]
//! captured by each of its capture groups.
//!
//! A format string is scanned left to right. At each position the longest
//! registered token literal is tried first (see
//! [`TokenTable::match_prefix`]); a matched token contributes its regex
//! fragment, any other character is escaped and matched verbatim.
//!
//! [`Regex`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
use crate::common::{
    Components,
    DefinitionsError,
    FormatString,
    FormatString_str,
    Result,
};
use crate::data::components::{assemble_components, YearThreshold};
use crate::data::token::{Component, Token, TokenTable};

use std::fmt;

use ::more_asserts::debug_assert_le;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// One scanned piece of a format string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatPiece<'a> {
    Token(&'a Token),
    Literal(char),
}

/// Split `format` into [`FormatPiece`]s using the tokens in `tokens`.
///
/// Deterministic: the same `format` and `tokens` always produce the same
/// pieces, so capture group indices are reproducible.
pub fn tokenize<'a>(
    format: &FormatString_str,
    tokens: &'a TokenTable,
) -> Vec<FormatPiece<'a>> {
    let mut pieces: Vec<FormatPiece<'a>> = Vec::with_capacity(format.len());
    let mut rest: &str = format;
    while let Some(c) = rest.chars().next() {
        match tokens.match_prefix(rest) {
            Some(token) => {
                pieces.push(FormatPiece::Token(token));
                rest = &rest[token.literal.len()..];
            }
            None => {
                pieces.push(FormatPiece::Literal(c));
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    pieces
}

/// A format string compiled into a matcher.
///
/// Immutable once built. The regex pattern text is a copy; later changes
/// to the [`TokenTable`] do not affect a built `CompiledFormat`.
#[derive(Clone)]
pub struct CompiledFormat {
    /// the format string this was compiled from; its identity
    source: FormatString,
    /// anchored to the whole input
    regex: Regex,
    /// capture group `i + 1` captures component `group_map[i]`
    group_map: Vec<Component>,
}

impl fmt::Debug for CompiledFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        // regexp strings can be very long, truncate it
        const MAXLEN: usize = 40;
        let pattern = self.regex.as_str();
        let mut rp: String = String::with_capacity(MAXLEN + 5);
        rp.extend(pattern.chars().take(MAXLEN));
        if pattern.len() > MAXLEN {
            rp.push('…');
        }
        f.debug_struct("CompiledFormat")
            .field("source", &self.source)
            .field("regex", &rp)
            .field("group_map", &self.group_map)
            .finish()
    }
}

impl CompiledFormat {
    pub fn source(&self) -> &FormatString_str {
        self.source.as_str()
    }

    /// The full anchored regex pattern.
    pub fn regex_pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn group_map(&self) -> &[Component] {
        self.group_map.as_slice()
    }

    /// Does the whole of `text` match this format?
    pub fn is_match(
        &self,
        text: &str,
    ) -> bool {
        self.regex.is_match(text)
    }

    /// Match the whole of `text` and extract its [`Components`].
    ///
    /// Returns `None` if `text` does not match or a captured value cannot
    /// be normalized (e.g. an unknown month name).
    pub fn extract(
        &self,
        text: &str,
        year_threshold: &YearThreshold,
    ) -> Option<Components> {
        dpfn!("({:?}, {:?})", self.source, str_to_String_noraw(text));
        let captures = match self.regex.captures(text) {
            Some(captures) => captures,
            None => {
                dpfx!("no match");
                return None;
            }
        };
        debug_assert_eq!(captures.len(), self.group_map.len() + 1, "group_map does not fit the captures");
        let captured = self
            .group_map
            .iter()
            .enumerate()
            .filter_map(|(i, component)| {
                captures
                    .get(i + 1)
                    .map(|match_| (*component, match_.as_str()))
            });
        let components = assemble_components(captured, year_threshold);
        dpfx!("return {:?}", components);

        components
    }
}

/// Compile `format` with the tokens in `tokens`.
///
/// Tokens with a [`Component`] become capture groups, tokens without become
/// non-capturing groups. The assembled pattern is anchored with `\A` and
/// `\z` so it must match the entire input.
pub fn compile_format(
    format: &FormatString_str,
    tokens: &TokenTable,
) -> Result<CompiledFormat> {
    dpfn!("({:?})", format);
    let pieces = tokenize(format, tokens);
    let mut pattern = String::with_capacity(format.len() * 8 + 8);
    let mut group_map: Vec<Component> = Vec::with_capacity(pieces.len());
    pattern.push_str(r"\A(?:");
    for piece in pieces.iter() {
        match piece {
            FormatPiece::Token(token) => match token.component {
                Some(component) => {
                    pattern.push('(');
                    pattern.push_str(&token.pattern);
                    pattern.push(')');
                    group_map.push(component);
                }
                None => {
                    pattern.push_str("(?:");
                    pattern.push_str(&token.pattern);
                    pattern.push(')');
                }
            },
            FormatPiece::Literal(c) => {
                let mut buf = [0u8; 4];
                pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
        }
    }
    pattern.push_str(r")\z");
    dpfo!("pattern {:?}", pattern);

    let regex = match Regex::new(pattern.as_str()) {
        Ok(regex) => regex,
        Err(err) => {
            dpfx!("Regex::new failed {}", err);
            return Err(DefinitionsError::InvalidPattern {
                format: format.to_string(),
                source: err,
            });
        }
    };
    // group 0 is the whole match
    let groups = regex.captures_len() - 1;
    debug_assert_le!(group_map.len(), groups);
    if groups != group_map.len() {
        dpfx!("capture groups {} != mapped {}", groups, group_map.len());
        return Err(DefinitionsError::GroupCountMismatch {
            format: format.to_string(),
            groups,
            mapped: group_map.len(),
        });
    }
    dpfx!("groups {}", groups);

    Ok(CompiledFormat {
        source: format.to_string(),
        regex,
        group_map,
    })
}

// ambiguous day/month layouts

/// Token literals swapped to turn a month-first layout into a day-first
/// layout and back.
const DAY_MONTH_SWAPS: [(&str, &str); 2] = [("m", "d"), ("mm", "dd")];

fn swapped_literal(literal: &str) -> Option<&'static str> {
    for (month, day) in DAY_MONTH_SWAPS.iter() {
        if literal == *month {
            return Some(*day);
        }
        if literal == *day {
            return Some(*month);
        }
    }

    None
}

/// Is `format` a numeric month-first layout, e.g. `"m/d/yy"`?
///
/// The first piece must be the `m` or `mm` token and a `d` or `dd` token
/// must follow somewhere.
pub fn is_month_first(
    format: &FormatString_str,
    tokens: &TokenTable,
) -> bool {
    let pieces = tokenize(format, tokens);
    let first_is_month = matches!(
        pieces.first(),
        Some(FormatPiece::Token(token)) if token.literal == "m" || token.literal == "mm"
    );
    if !first_is_month {
        return false;
    }
    pieces.iter().skip(1).any(|piece| {
        matches!(piece, FormatPiece::Token(token) if token.literal == "d" || token.literal == "dd")
    })
}

/// `format` with the numeric day and month tokens exchanged,
/// e.g. `"m/d/yy h:nn"` becomes `"d/m/yy h:nn"`.
pub fn swap_day_month(
    format: &FormatString_str,
    tokens: &TokenTable,
) -> FormatString {
    let mut swapped = FormatString::with_capacity(format.len());
    for piece in tokenize(format, tokens).iter() {
        match piece {
            FormatPiece::Token(token) => match swapped_literal(&token.literal) {
                Some(literal) => swapped.push_str(literal),
                None => swapped.push_str(&token.literal),
            },
            FormatPiece::Literal(c) => swapped.push(*c),
        }
    }

    swapped
}
