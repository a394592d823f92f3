//! Immutable occupancy snapshot.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::record::{OccupancyRecord, StoredItem};
use crate::capacity::CapacityTable;
use crate::core::{Floor, GridCoord};
use crate::error::{MapError, Result};
use crate::layout::GridTopology;

type LocationKey = (Floor, GridCoord);

/// A consistent view of every occupied location.
///
/// Snapshots are never mutated. The store replaces them wholesale, so a
/// query holding one sees the same occupancy from start to finish.
#[derive(Clone, Debug, Default)]
pub struct OccupancySnapshot {
    generation: u64,
    records: BTreeMap<LocationKey, OccupancyRecord>,
}

impl OccupancySnapshot {
    /// Snapshot with no occupied locations
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate backend items into a snapshot.
    ///
    /// The whole batch is rejected on the first malformed item: invalid
    /// floor, out-of-bounds cell, cell that is not a slot, zero quantity,
    /// quantity above the slot's capacity, or a second item on an already
    /// occupied location.
    pub fn from_items(
        topology: &GridTopology,
        capacity: &CapacityTable,
        items: impl IntoIterator<Item = StoredItem>,
    ) -> Result<Self> {
        let mut records = BTreeMap::new();
        for item in items {
            let record = validate(topology, capacity, item)?;
            insert_unique(&mut records, record)?;
        }
        Ok(Self {
            generation: 0,
            records,
        })
    }

    /// Copy of this snapshot with one floor's records replaced
    pub(crate) fn replace_floor(&self, floor: Floor, replacement: OccupancySnapshot) -> Result<Self> {
        let mut records: BTreeMap<_, _> = self
            .records
            .iter()
            .filter(|((f, _), _)| *f != floor)
            .map(|(k, v)| (*k, v.clone()))
            .collect();
        for record in replacement.records.into_values() {
            if record.floor != floor {
                return Err(MapError::FloorMismatch {
                    expected: floor.get(),
                    found: record.floor.get(),
                });
            }
            insert_unique(&mut records, record)?;
        }
        Ok(Self {
            generation: self.generation,
            records,
        })
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Refresh counter; 0 for a snapshot not yet published by a store
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of occupied locations on all floors
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a location, if occupied
    #[inline]
    pub fn get(&self, coord: GridCoord, floor: Floor) -> Option<&OccupancyRecord> {
        self.records.get(&(floor, coord))
    }

    /// Is the location occupied?
    #[inline]
    pub fn is_occupied(&self, coord: GridCoord, floor: Floor) -> bool {
        self.records.contains_key(&(floor, coord))
    }

    /// All records, ordered by floor then cell
    pub fn records(&self) -> impl Iterator<Item = &OccupancyRecord> + '_ {
        self.records.values()
    }

    /// Records on one floor, ordered by cell
    pub fn records_on(&self, floor: Floor) -> impl Iterator<Item = &OccupancyRecord> + '_ {
        self.records
            .iter()
            .filter(move |((f, _), _)| *f == floor)
            .map(|(_, record)| record)
    }

    /// Number of occupied locations on one floor
    pub fn occupied_count(&self, floor: Floor) -> usize {
        self.records_on(floor).count()
    }
}

fn validate(
    topology: &GridTopology,
    capacity: &CapacityTable,
    item: StoredItem,
) -> Result<OccupancyRecord> {
    let floor = topology.floor(item.floor)?;
    let coord = item.coord();
    let slot = topology.slot_at(coord)?.ok_or(MapError::NotASlot(coord))?;
    let location_code = topology.location_code(slot, floor);

    if item.quantity == 0 {
        return Err(MapError::EmptyRecord(location_code));
    }
    let limit = capacity.items_per_square(slot.size_class);
    if item.quantity > limit {
        return Err(MapError::OverCapacity {
            location: location_code,
            quantity: item.quantity,
            capacity: limit,
        });
    }

    Ok(OccupancyRecord {
        location_code,
        coord,
        floor,
        item_id: item.item_id,
        item_name: item.item_name,
        quantity: item.quantity,
        category: item.category,
        stored_at: item.stored_at,
    })
}

fn insert_unique(
    records: &mut BTreeMap<LocationKey, OccupancyRecord>,
    record: OccupancyRecord,
) -> Result<()> {
    match records.entry((record.floor, record.coord)) {
        Entry::Occupied(_) => Err(MapError::DuplicateLocation(record.location_code)),
        Entry::Vacant(slot) => {
            slot.insert(record);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn item(x: i32, y: i32, floor: u8, quantity: u32) -> StoredItem {
        StoredItem {
            x,
            y,
            floor,
            item_id: format!("SKU-{}-{}", x, y),
            item_name: "Widget".to_string(),
            quantity,
            category: "medium".to_string(),
            stored_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    fn build(items: Vec<StoredItem>) -> Result<OccupancySnapshot> {
        OccupancySnapshot::from_items(&GridTopology::standard(), &CapacityTable::default(), items)
    }

    #[test]
    fn test_valid_snapshot() {
        let snapshot = build(vec![item(1, 8, 1, 25), item(2, 8, 1, 50), item(1, 8, 2, 1)]).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.occupied_count(Floor::new(1)), 2);
        assert_eq!(snapshot.occupied_count(Floor::new(2)), 1);
        assert_eq!(snapshot.occupied_count(Floor::new(3)), 0);

        let record = snapshot.get(GridCoord::new(1, 8), Floor::new(1)).unwrap();
        assert_eq!(record.location_code, "B01.1");
        assert_eq!(record.quantity, 25);
        assert!(!snapshot.is_occupied(GridCoord::new(3, 8), Floor::new(1)));
    }

    #[test]
    fn test_rejects_aisle_cell() {
        assert_eq!(
            build(vec![item(0, 5, 1, 10)]).unwrap_err(),
            MapError::NotASlot(GridCoord::new(0, 5))
        );
    }

    #[test]
    fn test_rejects_bad_floor_and_bounds() {
        assert!(matches!(
            build(vec![item(1, 8, 9, 10)]),
            Err(MapError::InvalidFloor { .. })
        ));
        assert!(matches!(
            build(vec![item(15, 0, 1, 10)]),
            Err(MapError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_over_capacity_and_empty() {
        assert!(matches!(
            build(vec![item(1, 8, 1, 51)]),
            Err(MapError::OverCapacity { capacity: 50, .. })
        ));
        assert_eq!(
            build(vec![item(1, 8, 1, 0)]).unwrap_err(),
            MapError::EmptyRecord("B01.1".to_string())
        );
    }

    #[test]
    fn test_rejects_co_mingling() {
        assert_eq!(
            build(vec![item(1, 8, 1, 10), item(1, 8, 1, 5)]).unwrap_err(),
            MapError::DuplicateLocation("B01.1".to_string())
        );
    }

    #[test]
    fn test_replace_floor() {
        let snapshot = build(vec![item(1, 8, 1, 25), item(1, 8, 2, 5)]).unwrap();
        let floor2 = build(vec![item(2, 8, 2, 7), item(3, 8, 2, 8)]).unwrap();

        let merged = snapshot.replace_floor(Floor::new(2), floor2).unwrap();
        assert!(merged.is_occupied(GridCoord::new(1, 8), Floor::new(1)));
        assert!(!merged.is_occupied(GridCoord::new(1, 8), Floor::new(2)));
        assert_eq!(merged.occupied_count(Floor::new(2)), 2);
    }

    #[test]
    fn test_replace_floor_rejects_other_floor() {
        let snapshot = OccupancySnapshot::empty();
        let wrong = build(vec![item(1, 8, 3, 1)]).unwrap();
        assert_eq!(
            snapshot.replace_floor(Floor::new(2), wrong).unwrap_err(),
            MapError::FloorMismatch {
                expected: 2,
                found: 3
            }
        );
    }
}
