// src/registry/definitions.rs

//! The [`Definitions`] registry: per-[`ValueType`] ordered format lists, the
//! [`TokenTable`], and the cache of compiled [`FormatSet`]s.
//!
//! Mutating operations take `&mut self`; callers serialize configuration
//! against each other and against parsing simply by holding the only
//! mutable reference. Reading operations take `&self` and are safe from any
//! number of threads. A `FormatSet` is built lazily on first use, or
//! eagerly by [`compile_formats`], and is published whole behind an
//! [`Arc`]; a parser holding a prior `Arc` keeps its snapshot.
//!
//! The region switches [`use_euro_formats`] and [`use_us_formats`] only set
//! the calling thread's [`Region`]. They never compile anything.
//!
//! [`compile_formats`]: Definitions::compile_formats
//! [`use_euro_formats`]: Definitions::use_euro_formats
//! [`use_us_formats`]: Definitions::use_us_formats

use crate::common::{
    DefinitionsError,
    FormatString,
    FormatString_str,
    Result,
    ValueType,
};
use crate::data::components::{YearThreshold, AMBIGUOUS_YEAR_THRESHOLD_DEFAULT};
use crate::data::format::{compile_format, CompiledFormat};
use crate::data::formatset::FormatSet;
use crate::data::token::{Component, TokenTable};
use crate::registry::region::{set_region, Region};

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use ::lru::LruCache;
use ::once_cell::sync::OnceCell;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// built-in format lists
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// Order of declaration matters: the first format to match wins. A general
// format listed before a specific one will hide the specific one.

/// Built-in [`ValueType::Time`] formats.
pub const FORMATS_TIME: [&FormatString_str; 12] = [
    "hh:nn:ss",
    "hh-nn-ss",
    "hh:nn:ss.u",
    "h:nn",
    "h.nn",
    "h nn",
    "h-nn",
    "h:nn_ampm",
    "h.nn_ampm",
    "h nn_ampm",
    "h-nn_ampm",
    "h_ampm",
];

/// Built-in [`ValueType::Date`] formats.
///
/// `m/d/yy` and `d/m/yy` (and the backslash pair) form the ambiguous subset
/// reordered by [`Region`].
pub const FORMATS_DATE: [&FormatString_str; 11] = [
    "yyyy-mm-dd",
    "yyyy/mm/dd",
    "yyyy.mm.dd",
    "m/d/yy",
    "d/m/yy",
    r"m\d\yy",
    r"d\m\yy",
    "d-m-yy",
    "dd-mm-yyyy",
    "d.m.yy",
    "d mmm yy",
];

/// Built-in [`ValueType::DateTime`] formats.
pub const FORMATS_DATETIME: [&FormatString_str; 19] = [
    "yyyy-mm-dd hh:nn:ss",
    "yyyy-mm-dd h:nn",
    "yyyy-mm-dd h:nn_ampm",
    "yyyy-mm-dd hh:nn:ss.u",
    "m/d/yy h:nn:ss",
    "m/d/yy h:nn_ampm",
    "m/d/yy h:nn",
    "d/m/yy h:nn:ss",
    "d/m/yy h:nn_ampm",
    "d/m/yy h:nn",
    "dd-mm-yyyy hh:nn:ss",
    "dd-mm-yyyy h:nn",
    // RFC 822
    "ddd, dd mmm yyyy hh:nn:ss zo",
    // `date` command
    "ddd mmm d hh:nn:ss zo yyyy",
    // ISO 8601
    "yyyy-mm-ddThh:nn:ssZ",
    "yyyy-mm-ddThh:nn:sszo",
    "yyyy-mm-ddThh:nn:ss.u",
    "yyyy-mm-ddThh:nn:ss.uzo",
    "yyyy-mm-dd hh:nn:ss zo",
];

/// Capacity of the cache of formats passed per-call, see
/// [`Definitions::adhoc_format`].
pub const ADHOC_CACHE_CAPACITY: usize = 64;

/// Where [`Definitions::add_formats`] inserts new formats.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FormatPosition<'a> {
    /// after every existing format, lowest precedence
    #[default]
    End,
    /// immediately preceding the anchor format
    Before(&'a FormatString_str),
    /// immediately following the anchor format
    After(&'a FormatString_str),
}

/// The registry of format definitions.
pub struct Definitions {
    /// raw format lists, indexed by [`ValueType::index`]
    formats: [Vec<FormatString>; 3],
    tokens: TokenTable,
    year_threshold: YearThreshold,
    /// lazily built, indexed by [`ValueType::index`]; reset on mutation
    compiled: [OnceCell<Arc<FormatSet>>; 3],
    /// count of `FormatSet` builds
    compile_count: AtomicUsize,
    /// formats passed per-call, compiled on demand
    adhoc: Mutex<LruCache<FormatString, Arc<CompiledFormat>>>,
}

impl fmt::Debug for Definitions {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Definitions")
            .field("formats", &self.formats)
            .field("tokens", &self.tokens.len())
            .field("year_threshold", &self.year_threshold)
            .field("compile_count", &self.compile_count())
            .finish()
    }
}

impl Default for Definitions {
    fn default() -> Definitions {
        Definitions::new()
    }
}

fn to_format_strings(formats: &[&FormatString_str]) -> Vec<FormatString> {
    formats.iter().map(|f| f.to_string()).collect()
}

impl Definitions {
    /// The built-in tokens and format lists.
    pub fn new() -> Definitions {
        let mut definitions = Definitions::empty();
        definitions.formats[ValueType::Time.index()] = to_format_strings(&FORMATS_TIME);
        definitions.formats[ValueType::Date.index()] = to_format_strings(&FORMATS_DATE);
        definitions.formats[ValueType::DateTime.index()] = to_format_strings(&FORMATS_DATETIME);

        definitions
    }

    /// The built-in tokens and no formats.
    pub fn empty() -> Definitions {
        let capacity = NonZeroUsize::new(ADHOC_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Definitions {
            formats: [Vec::new(), Vec::new(), Vec::new()],
            tokens: TokenTable::builtin(),
            year_threshold: YearThreshold::now(AMBIGUOUS_YEAR_THRESHOLD_DEFAULT),
            compiled: [OnceCell::new(), OnceCell::new(), OnceCell::new()],
            compile_count: AtomicUsize::new(0),
            adhoc: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Two-digit years below `threshold` are placed in the current
    /// century, others in the prior century.
    pub fn with_ambiguous_year_threshold(
        mut self,
        threshold: u8,
    ) -> Definitions {
        self.year_threshold = YearThreshold::now(threshold);
        self
    }

    /// Set the two-digit year expansion explicitly.
    pub fn with_year_threshold(
        mut self,
        year_threshold: YearThreshold,
    ) -> Definitions {
        self.year_threshold = year_threshold;
        self
    }

    pub fn year_threshold(&self) -> &YearThreshold {
        &self.year_threshold
    }

    pub fn token_table(&self) -> &TokenTable {
        &self.tokens
    }

    /// The raw format list for `value_type`, in list order.
    pub fn formats(
        &self,
        value_type: ValueType,
    ) -> &[FormatString] {
        self.formats[value_type.index()].as_slice()
    }

    fn invalidate(
        &mut self,
        value_type: ValueType,
    ) {
        dpfñ!("({:?})", value_type);
        self.compiled[value_type.index()] = OnceCell::new();
    }

    /// Replace the whole format list for `value_type`.
    ///
    /// Fails with [`DuplicateFormat`] if `formats` repeats a format, or with
    /// [`InvalidPattern`] or [`GroupCountMismatch`] if a format does not
    /// compile; the prior list is then kept.
    ///
    /// [`DuplicateFormat`]: DefinitionsError::DuplicateFormat
    /// [`InvalidPattern`]: DefinitionsError::InvalidPattern
    /// [`GroupCountMismatch`]: DefinitionsError::GroupCountMismatch
    pub fn set_formats(
        &mut self,
        value_type: ValueType,
        formats: Vec<FormatString>,
    ) -> Result<()> {
        dpfn!("({:?}, {} formats)", value_type, formats.len());
        for (index, format) in formats.iter().enumerate() {
            if formats[..index].contains(format) {
                dpfx!("duplicate {:?}", format);
                return Err(DefinitionsError::DuplicateFormat {
                    value_type,
                    format: format.clone(),
                });
            }
        }
        self.check_compiles(formats.iter().map(|f| f.as_str()))?;
        self.formats[value_type.index()] = formats;
        self.invalidate(value_type);
        dpfx!();

        Ok(())
    }

    /// Compile each of `formats` with the current tokens, discarding the
    /// result, so a bad format is rejected before any list changes.
    fn check_compiles<'a, I>(
        &self,
        formats: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = &'a FormatString_str>,
    {
        for format in formats {
            if let Err(err) = compile_format(format, &self.tokens) {
                dpfñ!("{:?} does not compile: {}", format, err);
                return Err(err);
            }
        }

        Ok(())
    }

    /// Insert `new_formats` into the list for `value_type` at `position`.
    ///
    /// Fails, leaving the list unchanged, with [`DuplicateFormat`] if any new
    /// format is already in the list or repeated in `new_formats`, with
    /// [`FormatNotFound`] if the `position` anchor is not in the list, or
    /// with [`InvalidPattern`] or [`GroupCountMismatch`] if a new format does
    /// not compile with the current tokens.
    ///
    /// [`DuplicateFormat`]: DefinitionsError::DuplicateFormat
    /// [`FormatNotFound`]: DefinitionsError::FormatNotFound
    /// [`InvalidPattern`]: DefinitionsError::InvalidPattern
    /// [`GroupCountMismatch`]: DefinitionsError::GroupCountMismatch
    pub fn add_formats(
        &mut self,
        value_type: ValueType,
        new_formats: &[&FormatString_str],
        position: FormatPosition,
    ) -> Result<()> {
        dpfn!("({:?}, {:?}, {:?})", value_type, new_formats, position);
        let list: &Vec<FormatString> = &self.formats[value_type.index()];
        for (index, format) in new_formats.iter().enumerate() {
            if list.iter().any(|f| f == format) || new_formats[..index].contains(format) {
                dpfx!("duplicate {:?}", format);
                return Err(DefinitionsError::DuplicateFormat {
                    value_type,
                    format: format.to_string(),
                });
            }
        }
        let at: usize = match position {
            FormatPosition::End => list.len(),
            FormatPosition::Before(anchor) | FormatPosition::After(anchor) => {
                let found = match list.iter().position(|f| f == anchor) {
                    Some(found) => found,
                    None => {
                        dpfx!("anchor not found {:?}", anchor);
                        return Err(DefinitionsError::FormatNotFound {
                            value_type,
                            format: anchor.to_string(),
                        });
                    }
                };
                match position {
                    FormatPosition::After(_) => found + 1,
                    _ => found,
                }
            }
        };
        self.check_compiles(new_formats.iter().copied())?;
        dpfo!("insert at {}", at);
        self.formats[value_type.index()].splice(at..at, new_formats.iter().map(|f| f.to_string()));
        self.invalidate(value_type);
        dpfx!();

        Ok(())
    }

    /// Remove `formats` from the list for `value_type`.
    ///
    /// Every format is checked before any is removed; fails with
    /// [`FormatNotFound`] naming the first missing format and leaves the
    /// list unchanged.
    ///
    /// [`FormatNotFound`]: DefinitionsError::FormatNotFound
    pub fn remove_formats(
        &mut self,
        value_type: ValueType,
        formats: &[&FormatString_str],
    ) -> Result<()> {
        dpfn!("({:?}, {:?})", value_type, formats);
        let list: &mut Vec<FormatString> = &mut self.formats[value_type.index()];
        if let Some(missing) = formats
            .iter()
            .find(|format| !list.iter().any(|f| f == *format))
        {
            dpfx!("not found {:?}", missing);
            return Err(DefinitionsError::FormatNotFound {
                value_type,
                format: missing.to_string(),
            });
        }
        list.retain(|f| !formats.contains(&f.as_str()));
        self.invalidate(value_type);
        dpfx!();

        Ok(())
    }

    /// Merge tokens into the [`TokenTable`], overwriting existing literals.
    ///
    /// Already compiled `FormatSet`s are kept as they are; formats compiled
    /// after this call see the new tokens. Formats cached for per-call use
    /// are dropped.
    pub fn add_format_tokens<I, L, P>(
        &mut self,
        tokens: I,
    ) where
        I: IntoIterator<Item = (L, P, Option<Component>)>,
        L: AsRef<str>,
        P: AsRef<str>,
    {
        dpfn!();
        for (literal, pattern, component) in tokens {
            self.tokens.register(literal.as_ref(), pattern.as_ref(), component);
        }
        self.adhoc_cache().clear();
        dpfx!("{} tokens", self.tokens.len());
    }

    fn build_format_set(
        &self,
        value_type: ValueType,
    ) -> Result<FormatSet> {
        let format_set = FormatSet::compile(value_type, self.formats(value_type), &self.tokens)?;
        self.compile_count.fetch_add(1, Ordering::SeqCst);

        Ok(format_set)
    }

    /// Build the `FormatSet` for `value_type`, or for every type if `None`,
    /// from the current lists and tokens.
    ///
    /// Safe to call repeatedly. If any format fails to compile the error is
    /// returned and no cached `FormatSet` is replaced.
    pub fn compile_formats(
        &mut self,
        value_type: Option<ValueType>,
    ) -> Result<()> {
        dpfn!("({:?})", value_type);
        let value_types: Vec<ValueType> = match value_type {
            Some(value_type) => vec![value_type],
            None => ValueType::ALL.to_vec(),
        };
        let mut built: Vec<(ValueType, FormatSet)> = Vec::with_capacity(value_types.len());
        for value_type in value_types.into_iter() {
            built.push((value_type, self.build_format_set(value_type)?));
        }
        for (value_type, format_set) in built.into_iter() {
            let cell: OnceCell<Arc<FormatSet>> = OnceCell::new();
            // a fresh cell cannot already be set
            let _ = cell.set(Arc::new(format_set));
            self.compiled[value_type.index()] = cell;
        }
        dpfx!();

        Ok(())
    }

    /// The compiled `FormatSet` for `value_type`, building it on first use.
    pub fn format_set(
        &self,
        value_type: ValueType,
    ) -> Result<Arc<FormatSet>> {
        let format_set = self.compiled[value_type.index()]
            .get_or_try_init(|| self.build_format_set(value_type).map(Arc::new))?;

        Ok(Arc::clone(format_set))
    }

    /// Has the `FormatSet` for `value_type` been built since the last
    /// change to its list?
    pub fn is_compiled(
        &self,
        value_type: ValueType,
    ) -> bool {
        self.compiled[value_type.index()].get().is_some()
    }

    /// Count of `FormatSet`s successfully built by this `Definitions`.
    ///
    /// Failed builds and per-call formats do not count.
    pub fn compile_count(&self) -> usize {
        self.compile_count.load(Ordering::SeqCst)
    }

    /// Read ambiguous dates day-first on the calling thread.
    pub fn use_euro_formats(&self) {
        set_region(Region::EU);
    }

    /// Read ambiguous dates month-first on the calling thread.
    pub fn use_us_formats(&self) {
        set_region(Region::US);
    }

    /// Format strings for `value_type` in the precedence order used under
    /// `region`.
    pub fn region_order(
        &self,
        value_type: ValueType,
        region: Region,
    ) -> Result<Vec<FormatString>> {
        let format_set = self.format_set(value_type)?;

        Ok(format_set
            .sources(region)
            .into_iter()
            .map(|source| source.to_string())
            .collect())
    }

    fn adhoc_cache(&self) -> MutexGuard<'_, LruCache<FormatString, Arc<CompiledFormat>>> {
        match self.adhoc.lock() {
            Ok(guard) => guard,
            // the cache holds no invariants a panic could break
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Compile a single `format` outside of any `FormatSet`.
    ///
    /// Results are cached until the `TokenTable` changes.
    pub fn adhoc_format(
        &self,
        format: &FormatString_str,
    ) -> Result<Arc<CompiledFormat>> {
        dpfn!("({:?})", format);
        if let Some(compiled) = self.adhoc_cache().get(format) {
            dpfx!("cached");
            return Ok(Arc::clone(compiled));
        }
        let compiled = Arc::new(compile_format(format, &self.tokens)?);
        self.adhoc_cache()
            .put(format.to_string(), Arc::clone(&compiled));
        dpfx!();

        Ok(compiled)
    }
}
