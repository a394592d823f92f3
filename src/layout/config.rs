//! Floor plan configuration.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::{GridCoord, SizeClass};

/// Floor plan description
///
/// Racks are listed in allocation priority order. Any in-bounds cell not
/// covered by a rack or a fixed point is an aisle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Grid width in cells
    #[serde(default = "defaults::width")]
    pub width: i32,

    /// Grid height in cells
    #[serde(default = "defaults::height")]
    pub height: i32,

    /// Number of storage floors sharing the footprint
    #[serde(default = "defaults::floors")]
    pub floors: u8,

    /// Receiving point
    #[serde(default = "defaults::receiving")]
    pub receiving: GridCoord,

    /// Packing point
    #[serde(default = "defaults::packing")]
    pub packing: GridCoord,

    /// Rack groups in priority order
    #[serde(default = "defaults::rack_groups")]
    pub rack_groups: Vec<RackGroupSpec>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: defaults::width(),
            height: defaults::height(),
            floors: defaults::floors(),
            receiving: defaults::receiving(),
            packing: defaults::packing(),
            rack_groups: defaults::rack_groups(),
        }
    }
}

/// One rack: a straight run of slots from `from` to `to` (inclusive).
///
/// Slot codes are `prefix` followed by a two-digit running number starting
/// at `first_index`, assigned in run order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RackGroupSpec {
    /// Rack group name, e.g. `B1`
    pub name: String,

    /// Slot code prefix, e.g. `B`
    pub prefix: String,

    /// Running number of the first slot
    #[serde(default = "defaults::first_index")]
    pub first_index: u32,

    /// Size class of every slot in the rack
    pub size_class: SizeClass,

    /// First cell of the run
    pub from: GridCoord,

    /// Last cell of the run (same row or column as `from`)
    pub to: GridCoord,
}

impl RackGroupSpec {
    /// Cells of the run in order, or `None` if the run is diagonal
    pub fn cells(&self) -> Option<Vec<GridCoord>> {
        if self.from.x != self.to.x && self.from.y != self.to.y {
            return None;
        }
        let dx = (i64::from(self.to.x) - i64::from(self.from.x)).signum();
        let dy = (i64::from(self.to.y) - i64::from(self.from.y)).signum();
        let last = self.from.manhattan_distance(&self.to);

        // Every cell lies between the endpoints, so the casts back are exact
        Some(
            (0..=last)
                .map(|i| {
                    let i = i64::from(i);
                    GridCoord::new(
                        (i64::from(self.from.x) + dx * i) as i32,
                        (i64::from(self.from.y) + dy * i) as i32,
                    )
                })
                .collect(),
        )
    }
}
