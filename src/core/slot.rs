//! Storage slots and floors.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{GridCoord, SizeClass};

/// One storage square of a rack.
///
/// Slots are created once when the topology is built and never change.
/// The same slot exists on every floor; a storage location is the pair
/// `(slot, floor)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot code, e.g. `B01`
    pub code: String,
    /// Grid cell the slot occupies
    pub coord: GridCoord,
    /// Size class shared by the whole rack group
    pub size_class: SizeClass,
    /// Name of the rack group, e.g. `B1`
    pub rack_group: String,
}

/// Storage level, 1-based.
///
/// Whether a floor exists is a property of the layout; see
/// [`GridTopology::check_floor`](crate::layout::GridTopology::check_floor).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Floor(u8);

impl Floor {
    /// Ground floor
    pub const GROUND: Floor = Floor(1);

    #[inline]
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
