//! Occupancy store: an in-memory mirror of the storage backend.

use log::{info, warn};
use parking_lot::RwLock;
use std::sync::Arc;

use super::record::{OccupancyRecord, StoredItem};
use super::snapshot::OccupancySnapshot;
use crate::capacity::CapacityTable;
use crate::core::{Floor, GridCoord};
use crate::error::Result;
use crate::layout::GridTopology;

/// Outcome of a successful refresh
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Generation of the newly published snapshot
    pub generation: u64,
    /// Occupied locations in the new snapshot (all floors)
    pub records: usize,
}

/// Read-mostly occupancy cache.
///
/// The backend is the source of truth; the store only mirrors it. Each
/// refresh validates the incoming items into a new [`OccupancySnapshot`]
/// and publishes it with a single `Arc` swap. Readers either see the old
/// or the new snapshot, never a mix. A rejected refresh leaves the
/// current snapshot untouched.
#[derive(Debug)]
pub struct OccupancyStore {
    topology: Arc<GridTopology>,
    capacity: CapacityTable,
    current: RwLock<Arc<OccupancySnapshot>>,
}

impl OccupancyStore {
    /// Create an empty store
    pub fn new(topology: Arc<GridTopology>, capacity: CapacityTable) -> Self {
        Self {
            topology,
            capacity,
            current: RwLock::new(Arc::new(OccupancySnapshot::empty())),
        }
    }

    /// Topology the store validates against
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Capacity table used for validation and percentages
    pub fn capacity(&self) -> &CapacityTable {
        &self.capacity
    }

    /// Current snapshot. Take it once per query.
    pub fn snapshot(&self) -> Arc<OccupancySnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace every floor's occupancy with `items`
    pub fn refresh(&self, items: Vec<StoredItem>) -> Result<RefreshSummary> {
        let next = OccupancySnapshot::from_items(&self.topology, &self.capacity, items)
            .inspect_err(|e| warn!("[Occupancy] refresh rejected: {}", e))?;
        self.publish(|_| Ok(next))
    }

    /// Replace one floor's occupancy with `items`; other floors are kept.
    ///
    /// Every item must be on `floor`.
    pub fn refresh_floor(&self, floor: Floor, items: Vec<StoredItem>) -> Result<RefreshSummary> {
        self.topology.check_floor(floor)?;
        let incoming = OccupancySnapshot::from_items(&self.topology, &self.capacity, items)
            .inspect_err(|e| warn!("[Occupancy] floor {} refresh rejected: {}", floor, e))?;
        self.publish(|current| current.replace_floor(floor, incoming))
            .inspect_err(|e| warn!("[Occupancy] floor {} refresh rejected: {}", floor, e))
    }

    fn publish(
        &self,
        build: impl FnOnce(&OccupancySnapshot) -> Result<OccupancySnapshot>,
    ) -> Result<RefreshSummary> {
        let mut current = self.current.write();
        let generation = current.generation() + 1;
        let base: &OccupancySnapshot = &current;
        let next = build(base)?.with_generation(generation);
        let summary = RefreshSummary {
            generation,
            records: next.len(),
        };
        *current = Arc::new(next);

        info!(
            "[Occupancy] published generation {} with {} records",
            summary.generation, summary.records
        );
        Ok(summary)
    }

    /// Is the location occupied?
    pub fn is_occupied(&self, coord: GridCoord, floor: Floor) -> Result<bool> {
        self.check(coord, floor)?;
        Ok(self.snapshot().is_occupied(coord, floor))
    }

    /// Record at the location, if occupied
    pub fn get(&self, coord: GridCoord, floor: Floor) -> Result<Option<OccupancyRecord>> {
        self.check(coord, floor)?;
        Ok(self.snapshot().get(coord, floor).cloned())
    }

    /// Fill level of the location in percent, clamped to `0..=100`.
    ///
    /// Empty locations and cells that are not slots report 0.
    pub fn occupancy_percent(&self, coord: GridCoord, floor: Floor) -> Result<f32> {
        self.check(coord, floor)?;
        let Some(slot) = self.topology.slot_at(coord)? else {
            return Ok(0.0);
        };
        let snapshot = self.snapshot();
        Ok(snapshot.get(coord, floor).map_or(0.0, |record| {
            fill_percent(
                record.quantity,
                self.capacity.items_per_square(slot.size_class),
            )
        }))
    }

    /// Share of the floor's slots that are occupied, in percent
    pub fn floor_utilisation(&self, floor: Floor) -> Result<f32> {
        self.topology.check_floor(floor)?;
        let total = self.topology.slots().len();
        if total == 0 {
            return Ok(0.0);
        }
        let occupied = self.snapshot().occupied_count(floor);
        Ok(occupied as f32 / total as f32 * 100.0)
    }

    fn check(&self, coord: GridCoord, floor: Floor) -> Result<()> {
        self.topology.check(coord)?;
        self.topology.check_floor(floor)
    }
}

fn fill_percent(quantity: u32, capacity: u32) -> f32 {
    if capacity == 0 {
        return 100.0;
    }
    (quantity as f32 / capacity as f32 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn item(x: i32, y: i32, floor: u8, quantity: u32) -> StoredItem {
        StoredItem {
            x,
            y,
            floor,
            item_id: format!("SKU-{}", quantity),
            item_name: "Widget".to_string(),
            quantity,
            category: String::new(),
            stored_at: Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
        }
    }

    fn store() -> OccupancyStore {
        OccupancyStore::new(GridTopology::standard(), CapacityTable::default())
    }

    #[test]
    fn test_empty_store() {
        let store = store();
        let c = GridCoord::new(1, 8);
        assert!(!store.is_occupied(c, Floor::GROUND).unwrap());
        assert!(store.get(c, Floor::GROUND).unwrap().is_none());
        assert_relative_eq!(store.occupancy_percent(c, Floor::GROUND).unwrap(), 0.0);
        assert_eq!(store.snapshot().generation(), 0);
    }

    #[test]
    fn test_half_full_slot() {
        let store = store();
        store.refresh(vec![item(1, 8, 1, 25)]).unwrap();

        let c = GridCoord::new(1, 8);
        assert!(store.is_occupied(c, Floor::GROUND).unwrap());
        assert_relative_eq!(store.occupancy_percent(c, Floor::GROUND).unwrap(), 50.0);
        // Same slot, other floor is independent
        assert!(!store.is_occupied(c, Floor::new(2)).unwrap());
    }

    #[test]
    fn test_percent_for_aisle_is_zero() {
        let store = store();
        assert_relative_eq!(
            store
                .occupancy_percent(GridCoord::new(0, 5), Floor::GROUND)
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn test_refresh_replaces_everything() {
        let store = store();
        let first = store
            .refresh(vec![item(1, 8, 1, 10), item(2, 8, 2, 10)])
            .unwrap();
        assert_eq!(first.generation, 1);
        assert_eq!(first.records, 2);

        let second = store.refresh(vec![item(3, 8, 1, 10)]).unwrap();
        assert_eq!(second.generation, 2);
        assert!(!store.is_occupied(GridCoord::new(1, 8), Floor::GROUND).unwrap());
        assert!(!store.is_occupied(GridCoord::new(2, 8), Floor::new(2)).unwrap());
        assert!(store.is_occupied(GridCoord::new(3, 8), Floor::GROUND).unwrap());
    }

    #[test]
    fn test_rejected_refresh_keeps_previous_snapshot() {
        let store = store();
        store.refresh(vec![item(1, 8, 1, 10)]).unwrap();
        let before = store.snapshot();

        let err = store
            .refresh(vec![item(2, 8, 1, 10), item(0, 4, 1, 10)])
            .unwrap_err();
        assert_eq!(err, MapError::NotASlot(GridCoord::new(0, 4)));

        let after = store.snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert!(!store.is_occupied(GridCoord::new(2, 8), Floor::GROUND).unwrap());
    }

    #[test]
    fn test_refresh_floor() {
        let store = store();
        store
            .refresh(vec![item(1, 8, 1, 10), item(1, 8, 2, 10)])
            .unwrap();

        let summary = store
            .refresh_floor(Floor::new(2), vec![item(4, 8, 2, 20)])
            .unwrap();
        assert_eq!(summary.records, 2);
        assert!(store.is_occupied(GridCoord::new(1, 8), Floor::GROUND).unwrap());
        assert!(!store.is_occupied(GridCoord::new(1, 8), Floor::new(2)).unwrap());
        assert!(store.is_occupied(GridCoord::new(4, 8), Floor::new(2)).unwrap());

        assert!(matches!(
            store.refresh_floor(Floor::new(2), vec![item(4, 8, 3, 20)]),
            Err(MapError::FloorMismatch { .. })
        ));
        assert!(matches!(
            store.refresh_floor(Floor::new(7), Vec::new()),
            Err(MapError::InvalidFloor { .. })
        ));
    }

    #[test]
    fn test_snapshot_is_stable_across_refresh() {
        let store = store();
        store.refresh(vec![item(1, 8, 1, 10)]).unwrap();
        let held = store.snapshot();

        store.refresh(Vec::new()).unwrap();
        assert!(held.is_occupied(GridCoord::new(1, 8), Floor::GROUND));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_queries_check_bounds() {
        let store = store();
        assert!(matches!(
            store.is_occupied(GridCoord::new(15, 0), Floor::GROUND),
            Err(MapError::OutOfBounds { .. })
        ));
        assert!(matches!(
            store.get(GridCoord::new(1, 8), Floor::new(0)),
            Err(MapError::InvalidFloor { .. })
        ));
    }

    #[test]
    fn test_floor_utilisation() {
        let store = store();
        let items: Vec<_> = (1..=8).map(|x| item(x, 8, 1, 1)).collect();
        store.refresh(items).unwrap();
        // 8 of 48 slots
        assert_relative_eq!(
            store.floor_utilisation(Floor::GROUND).unwrap(),
            8.0 / 48.0 * 100.0,
            epsilon = 1e-4
        );
        assert_relative_eq!(store.floor_utilisation(Floor::new(2)).unwrap(), 0.0);
    }

    #[test]
    fn test_fill_percent_clamps() {
        assert_relative_eq!(fill_percent(80, 50), 100.0);
        assert_relative_eq!(fill_percent(1, 4), 25.0);
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let store = Arc::new(store());
        let full: Vec<_> = (1..=8).map(|x| item(x, 8, 1, 5)).collect();

        let reader = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..500 {
                    let count = store.snapshot().occupied_count(Floor::GROUND);
                    assert!(count == 0 || count == 8);
                }
            })
        };
        for _ in 0..50 {
            store.refresh(full.clone()).unwrap();
            store.refresh(Vec::new()).unwrap();
        }
        reader.join().unwrap();
    }
}
