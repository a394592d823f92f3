//! Default value functions for serde deserialization.

use crate::core::{GridCoord, SizeClass};
use crate::layout::RackGroupSpec;

pub fn width() -> i32 {
    10
}

pub fn height() -> i32 {
    12
}

pub fn floors() -> u8 {
    4
}

pub fn receiving() -> GridCoord {
    GridCoord::new(0, 0)
}

pub fn packing() -> GridCoord {
    GridCoord::new(0, 11)
}

pub fn first_index() -> u32 {
    1
}

pub fn items_per_square() -> u32 {
    50
}

pub fn default_size_class() -> SizeClass {
    SizeClass::Medium
}

/// No cap: a search expands each cell at most once
pub fn max_iterations() -> usize {
    0
}

/// Rack groups of the standard floor plan, in allocation priority order.
///
/// Every rack is a horizontal run over x=1..8; columns 0 and 9 stay free
/// as side aisles.
pub fn rack_groups() -> Vec<RackGroupSpec> {
    let rack = |name: &str, prefix: &str, first_index: u32, size_class, row| RackGroupSpec {
        name: name.to_string(),
        prefix: prefix.to_string(),
        first_index,
        size_class,
        from: GridCoord::new(1, row),
        to: GridCoord::new(8, row),
    };

    vec![
        rack("B1", "B", 1, SizeClass::Medium, 8),
        rack("B2", "B", 9, SizeClass::Medium, 10),
        rack("P1", "P", 1, SizeClass::Small, 5),
        rack("P2", "P", 9, SizeClass::Small, 7),
        rack("D1", "D", 1, SizeClass::Large, 1),
        rack("D2", "D", 9, SizeClass::Large, 3),
    ]
}
