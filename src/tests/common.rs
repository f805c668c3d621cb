// src/tests/common.rs

//! common helpers and constants for tests

use crate::common::{Components, ComponentValue, COMPONENTS_LEN};
use crate::data::components::YearThreshold;
use crate::registry::definitions::Definitions;

/// year threshold fixed to the 2000s so two-digit years do not depend on
/// the current date
pub const YT_2000: YearThreshold = YearThreshold {
    threshold: 30,
    century: 2000,
};

/// built-in `Definitions` using [`YT_2000`]
pub fn definitions_2000() -> Definitions {
    Definitions::new().with_year_threshold(YT_2000)
}

/// `Components` from a compact array; `-1` is an empty slot
pub fn components(values: [ComponentValue; COMPONENTS_LEN]) -> Components {
    let mut components: Components = [None; COMPONENTS_LEN];
    for (slot, value) in values.iter().enumerate() {
        if *value != -1 {
            components[slot] = Some(*value);
        }
    }

    components
}

/// empty slot for [`components`]
pub const N: ComponentValue = -1;
