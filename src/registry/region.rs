// src/registry/region.rs

//! The region selector: which ordering of ambiguous day/month layouts the
//! calling thread uses.
//!
//! Each thread has its own selection, created on first access with
//! [`Region::US`]. Setting it is a plain write to thread-local storage;
//! other threads and any compiled [`FormatSet`] are unaffected.
//!
//! [`FormatSet`]: crate::data::formatset::FormatSet

use std::cell::Cell;
use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// Convention for reading an ambiguous numeric date like `"01/02/2000"`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Region {
    /// month first, `01/02/2000` is January 2
    #[default]
    US,
    /// day first, `01/02/2000` is February 1
    EU,
}

impl fmt::Display for Region {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            Region::US => f.write_str("US"),
            Region::EU => f.write_str("EU"),
        }
    }
}

thread_local! {
    static REGION: Cell<Region> = Cell::new(Region::default());
}

/// The calling thread's region.
pub fn current_region() -> Region {
    REGION.with(|region| region.get())
}

/// Set the calling thread's region.
pub fn set_region(region: Region) {
    dpfñ!("({})", region);
    REGION.with(|region_| region_.set(region));
}

/// Restores the calling thread's prior region when dropped.
///
/// ```
/// use sdmlib::registry::region::{current_region, Region, RegionGuard};
///
/// {
///     let _guard = RegionGuard::new(Region::EU);
///     assert_eq!(current_region(), Region::EU);
/// }
/// assert_eq!(current_region(), Region::US);
/// ```
#[must_use = "the prior region is restored when the guard is dropped"]
pub struct RegionGuard {
    prior: Region,
}

impl RegionGuard {
    pub fn new(region: Region) -> RegionGuard {
        let prior = current_region();
        set_region(region);

        RegionGuard { prior }
    }
}

impl Drop for RegionGuard {
    fn drop(&mut self) {
        set_region(self.prior);
    }
}
