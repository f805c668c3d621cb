// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// value types and format strings
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An author-written format pattern, e.g. `"hh:nn:ss"` or `"dd/mm/yyyy"`.
///
/// A `FormatString` is also the identity key of a format within one
/// [`ValueType`]'s list.
pub type FormatString = String;

/// Borrowed form of [`FormatString`].
#[allow(non_camel_case_types)]
pub type FormatString_str = str;

/// The kind of value a format list describes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum ValueType {
    Date,
    Time,
    DateTime,
}

impl ValueType {
    /// All value types, in the order their format sets are compiled.
    pub const ALL: [ValueType; 3] = [ValueType::Time, ValueType::Date, ValueType::DateTime];

    /// Index into per-type arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        match self {
            ValueType::Date => 0,
            ValueType::Time => 1,
            ValueType::DateTime => 2,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::Date => "date",
            ValueType::Time => "time",
            ValueType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// extracted components
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One extracted numeric value.
pub type ComponentValue = i64;

/// Count of slots in [`Components`].
pub const COMPONENTS_LEN: usize = 8;

/// Extracted values in the fixed slot order
/// `[year, month, day, hour, minute, second, fractional_second, offset]`.
///
/// `None` marks a component the matching format did not capture.
/// The fractional second is in microseconds, the offset is in seconds
/// east of UTC.
pub type Components = [Option<ComponentValue>; COMPONENTS_LEN];

/// `Components` with every slot absent.
pub const COMPONENTS_NONE: Components = [None; COMPONENTS_LEN];

pub const SLOT_YEAR: usize = 0;
pub const SLOT_MONTH: usize = 1;
pub const SLOT_DAY: usize = 2;
pub const SLOT_HOUR: usize = 3;
pub const SLOT_MINUTE: usize = 4;
pub const SLOT_SECOND: usize = 5;
pub const SLOT_FRACTIONAL: usize = 6;
pub const SLOT_OFFSET: usize = 7;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// configuration errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors from configuring a [`Definitions`] or compiling a format.
///
/// Parsing never returns these; an input that matches nothing is `None`.
///
/// [`Definitions`]: crate::registry::definitions::Definitions
#[derive(thiserror::Error, Debug)]
pub enum DefinitionsError {
    #[error("{value_type} format {format:?} is already defined")]
    DuplicateFormat {
        value_type: ValueType,
        format: FormatString,
    },
    #[error("{value_type} format {format:?} is not defined")]
    FormatNotFound {
        value_type: ValueType,
        format: FormatString,
    },
    #[error("format {format:?} compiled to an invalid regex: {source}")]
    InvalidPattern {
        format: FormatString,
        #[source]
        source: regex::Error,
    },
    #[error("format {format:?} has {groups} capture groups but {mapped} mapped components")]
    GroupCountMismatch {
        format: FormatString,
        groups: usize,
        mapped: usize,
    },
}

impl DefinitionsError {
    /// Returns `true` if this is a [`DuplicateFormat`].
    ///
    /// [`DuplicateFormat`]: DefinitionsError::DuplicateFormat
    pub const fn is_duplicate_format(&self) -> bool {
        matches!(*self, DefinitionsError::DuplicateFormat { .. })
    }

    /// Returns `true` if this is a [`FormatNotFound`].
    ///
    /// [`FormatNotFound`]: DefinitionsError::FormatNotFound
    pub const fn is_format_not_found(&self) -> bool {
        matches!(*self, DefinitionsError::FormatNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DefinitionsError>;
