// src/data/formatset.rs

//! A [`FormatSet`] is the immutable, precedence-ordered collection of
//! [`CompiledFormat`]s for one [`ValueType`].
//!
//! The set also carries two precomputed orderings, one per [`Region`], that
//! differ only in where the ambiguous numeric day/month layouts sit.
//! Switching region picks one of the two orderings; it never rebuilds the
//! set.
//!
//! ## Ambiguous subset
//!
//! A format is in the ambiguous subset when it is a month-first numeric
//! layout (e.g. `"m/d/yy"`) whose day-first counterpart (`"d/m/yy"`) is also
//! in the list, or when it is such a counterpart. The positions the subset
//! occupies in the list are refilled: the US ordering puts month-first
//! layouts first, the EU ordering puts day-first layouts first. Within each
//! group the list order is kept. Every other format keeps its position.
//!
//! [`Region`]: crate::registry::region::Region

use crate::common::{FormatString, FormatString_str, Result, ValueType};
use crate::data::format::{compile_format, is_month_first, swap_day_month, CompiledFormat};
use crate::data::token::TokenTable;
use crate::registry::region::Region;

use std::collections::HashSet;

use ::more_asserts::debug_assert_lt;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// Index into [`FormatSet::entries`].
pub type FormatSetIndex = usize;

/// A precedence ordering of a [`FormatSet`], as indexes into its entries.
pub type FormatSetOrder = Vec<FormatSetIndex>;

#[derive(Debug)]
pub struct FormatSet {
    value_type: ValueType,
    /// in list order
    entries: Vec<CompiledFormat>,
    order_us: FormatSetOrder,
    order_eu: FormatSetOrder,
}

impl FormatSet {
    /// Compile every format in `formats`, in order, and precompute both
    /// region orderings.
    ///
    /// Fails on the first format that does not compile; nothing is
    /// returned partially built.
    pub fn compile(
        value_type: ValueType,
        formats: &[FormatString],
        tokens: &TokenTable,
    ) -> Result<FormatSet> {
        dpfn!("({:?}, {} formats)", value_type, formats.len());
        let mut entries: Vec<CompiledFormat> = Vec::with_capacity(formats.len());
        for format in formats.iter() {
            entries.push(compile_format(format, tokens)?);
        }
        let (order_us, order_eu) = region_orders(formats, tokens);
        debug_assert_eq!(order_us.len(), entries.len());
        debug_assert_eq!(order_eu.len(), entries.len());
        dpfx!("order_us {:?}, order_eu {:?}", order_us, order_eu);

        Ok(FormatSet {
            value_type,
            entries,
            order_us,
            order_eu,
        })
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Compiled formats in list order.
    pub fn entries(&self) -> &[CompiledFormat] {
        self.entries.as_slice()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The precomputed ordering for `region`.
    pub fn order(
        &self,
        region: Region,
    ) -> &[FormatSetIndex] {
        match region {
            Region::US => self.order_us.as_slice(),
            Region::EU => self.order_eu.as_slice(),
        }
    }

    /// Compiled formats in the precedence order for `region`.
    pub fn iter_region(
        &self,
        region: Region,
    ) -> impl Iterator<Item = &CompiledFormat> {
        self.order(region).iter().map(move |index| {
            debug_assert_lt!(*index, self.entries.len());
            &self.entries[*index]
        })
    }

    /// Format strings in the precedence order for `region`.
    pub fn sources(
        &self,
        region: Region,
    ) -> Vec<&FormatString_str> {
        self.iter_region(region)
            .map(|entry| entry.source())
            .collect()
    }
}

/// Compute the US and EU orderings of `formats`.
pub fn region_orders(
    formats: &[FormatString],
    tokens: &TokenTable,
) -> (FormatSetOrder, FormatSetOrder) {
    let present: HashSet<&FormatString_str> = formats.iter().map(|f| f.as_str()).collect();
    // members of the ambiguous subset, split by layout
    let mut month_first: HashSet<FormatString> = HashSet::new();
    let mut day_first: HashSet<FormatString> = HashSet::new();
    for format in formats.iter() {
        if !is_month_first(format, tokens) {
            continue;
        }
        let counterpart = swap_day_month(format, tokens);
        if counterpart != *format && present.contains(counterpart.as_str()) {
            month_first.insert(format.clone());
            day_first.insert(counterpart);
        }
    }

    let mut slots: Vec<FormatSetIndex> = Vec::new();
    let mut us_members: Vec<FormatSetIndex> = Vec::new();
    let mut eu_members: Vec<FormatSetIndex> = Vec::new();
    for (index, format) in formats.iter().enumerate() {
        if month_first.contains(format) {
            slots.push(index);
            us_members.push(index);
        } else if day_first.contains(format) {
            slots.push(index);
            eu_members.push(index);
        }
    }

    let identity: FormatSetOrder = (0..formats.len()).collect();
    let mut order_us: FormatSetOrder = identity.clone();
    let mut order_eu: FormatSetOrder = identity;
    let us_fill = us_members.iter().chain(eu_members.iter());
    for (slot, index) in slots.iter().zip(us_fill) {
        order_us[*slot] = *index;
    }
    let eu_fill = eu_members.iter().chain(us_members.iter());
    for (slot, index) in slots.iter().zip(eu_fill) {
        order_eu[*slot] = *index;
    }

    (order_us, order_eu)
}
