//! Per-floor slot occupancy.
//!
//! - [`StoredItem`]: backend snapshot entry (JSON wire shape)
//! - [`OccupancySnapshot`]: validated, immutable view of occupied locations
//! - [`OccupancyStore`]: holds the current snapshot and swaps it atomically

mod record;
mod snapshot;
mod store;

pub use record::{OccupancyRecord, StoredItem, parse_snapshot_json};
pub use snapshot::OccupancySnapshot;
pub use store::{OccupancyStore, RefreshSummary};
