//! Occupancy records and the backend item format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Floor, GridCoord};

/// One stored item as reported by the storage-history backend.
///
/// This is the wire shape of an occupancy snapshot entry (camelCase JSON).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    pub x: i32,
    pub y: i32,
    pub floor: u8,
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
    pub stored_at: DateTime<Utc>,
}

impl StoredItem {
    /// Grid cell of the item
    #[inline]
    pub fn coord(&self) -> GridCoord {
        GridCoord::new(self.x, self.y)
    }
}

/// A validated occupancy record: exactly one per occupied location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyRecord {
    /// `<slot code>.<floor>`
    pub location_code: String,
    pub coord: GridCoord,
    pub floor: Floor,
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
    pub category: String,
    pub stored_at: DateTime<Utc>,
}

/// Parse a backend snapshot (JSON array of items)
pub fn parse_snapshot_json(json: &str) -> serde_json::Result<Vec<StoredItem>> {
    serde_json::from_str(json)
}
