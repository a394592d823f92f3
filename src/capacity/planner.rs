//! Slot allocation for incoming stock.

use log::debug;

use super::table::CapacityTable;
use crate::core::{Floor, SizeClass, Slot};
use crate::error::Result;
use crate::layout::GridTopology;
use crate::occupancy::OccupancySnapshot;

/// Suggested slots for one storage request.
///
/// A plan may be partial when the floor is short of free slots; check
/// [`StoragePlan::is_complete`] before acting on it.
#[derive(Clone, Debug)]
pub struct StoragePlan<'a> {
    /// Squares the quantity needs
    pub required: u32,
    /// Free slots in priority order, at most `required`
    pub slots: Vec<&'a Slot>,
}

impl StoragePlan<'_> {
    /// Squares that could not be allocated
    pub fn shortfall(&self) -> u32 {
        self.required.saturating_sub(self.slots.len() as u32)
    }

    /// Were all required squares allocated?
    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }
}

/// Computes square requirements and picks candidate slots.
pub struct CapacityPlanner<'a> {
    topology: &'a GridTopology,
    capacity: CapacityTable,
}

impl<'a> CapacityPlanner<'a> {
    /// Create a planner; fails if any class has zero items per square
    pub fn new(topology: &'a GridTopology, capacity: CapacityTable) -> Result<Self> {
        capacity.validate()?;
        Ok(Self { topology, capacity })
    }

    /// Create with the default capacity table
    pub fn with_defaults(topology: &'a GridTopology) -> Self {
        Self::with_table(topology, CapacityTable::default())
    }

    /// Create from a table the caller has already validated
    pub(crate) fn with_table(topology: &'a GridTopology, capacity: CapacityTable) -> Self {
        Self { topology, capacity }
    }

    /// Capacity table in use
    pub fn capacity(&self) -> &CapacityTable {
        &self.capacity
    }

    /// `ceil(quantity / items_per_square)`; zero for `quantity <= 0`
    pub fn required_squares(&self, size_class: SizeClass, quantity: i64) -> u32 {
        if quantity <= 0 {
            return 0;
        }
        let per_square = u64::from(self.capacity.items_per_square(size_class));
        let squares = (quantity as u64).div_ceil(per_square);
        u32::try_from(squares).unwrap_or(u32::MAX)
    }

    /// Free slots of the size class on `floor`, in priority order, up to
    /// the required number of squares.
    ///
    /// Returns fewer slots than required when the floor is short; this is
    /// not an error.
    pub fn suggest_locations(
        &self,
        size_class: SizeClass,
        quantity: i64,
        floor: Floor,
        occupancy: &OccupancySnapshot,
    ) -> Result<Vec<&'a Slot>> {
        self.topology.check_floor(floor)?;
        let required = self.required_squares(size_class, quantity) as usize;
        if required == 0 {
            return Ok(Vec::new());
        }

        let slots: Vec<&'a Slot> = self
            .topology
            .slots_of_class(size_class)
            .filter(|slot| !occupancy.is_occupied(slot.coord, floor))
            .take(required)
            .collect();

        debug!(
            "[Capacity] {} x{} on floor {}: {}/{} squares suggested",
            size_class,
            quantity,
            floor,
            slots.len(),
            required
        );
        Ok(slots)
    }

    /// Required squares and suggested slots in one call
    pub fn plan_storage(
        &self,
        size_class: SizeClass,
        quantity: i64,
        floor: Floor,
        occupancy: &OccupancySnapshot,
    ) -> Result<StoragePlan<'a>> {
        Ok(StoragePlan {
            required: self.required_squares(size_class, quantity),
            slots: self.suggest_locations(size_class, quantity, floor, occupancy)?,
        })
    }

    /// Number of free slots of the size class on `floor`
    pub fn free_squares(
        &self,
        size_class: SizeClass,
        floor: Floor,
        occupancy: &OccupancySnapshot,
    ) -> Result<usize> {
        self.topology.check_floor(floor)?;
        Ok(self
            .topology
            .slots_of_class(size_class)
            .filter(|slot| !occupancy.is_occupied(slot.coord, floor))
            .count())
    }
}
