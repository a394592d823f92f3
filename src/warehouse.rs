//! Warehouse: topology, occupancy and planners wired from one config.

use log::info;
use std::sync::Arc;

use crate::capacity::{CapacityPlanner, CapacityTable, SizeClassifier, StoragePlan};
use crate::config::BhandarConfig;
use crate::core::Floor;
use crate::error::Result;
use crate::layout::GridTopology;
use crate::occupancy::OccupancyStore;
use crate::pathfinding::{PathFinder, PathfindingConfig};

/// Everything the UI layer queries, built once at startup.
///
/// The warehouse owns no presentation state: selected locations,
/// suggestions and routes are returned to the caller.
#[derive(Debug)]
pub struct Warehouse {
    topology: Arc<GridTopology>,
    occupancy: OccupancyStore,
    capacity: CapacityTable,
    classifier: SizeClassifier,
    pathfinding: PathfindingConfig,
}

impl Warehouse {
    /// Build from configuration, validating layout and capacity table
    pub fn from_config(config: &BhandarConfig) -> Result<Self> {
        config.capacity.validate()?;
        let topology = Arc::new(config.build_topology()?);
        info!(
            "[Warehouse] {}x{} grid, {} floors, {} slots",
            topology.width(),
            topology.height(),
            topology.floor_count(),
            topology.slots().len()
        );
        Ok(Self::with_topology(topology, config))
    }

    /// The standard layout with default settings
    pub fn standard() -> Self {
        Self::with_topology(GridTopology::standard(), &BhandarConfig::default())
    }

    fn with_topology(topology: Arc<GridTopology>, config: &BhandarConfig) -> Self {
        Self {
            occupancy: OccupancyStore::new(Arc::clone(&topology), config.capacity.clone()),
            topology,
            capacity: config.capacity.clone(),
            classifier: config.classifier(),
            pathfinding: config.pathfinding.clone(),
        }
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn occupancy(&self) -> &OccupancyStore {
        &self.occupancy
    }

    pub fn classifier(&self) -> &SizeClassifier {
        &self.classifier
    }

    /// Capacity planner over this warehouse's topology
    pub fn capacity_planner(&self) -> CapacityPlanner<'_> {
        // Table validated in from_config / default
        CapacityPlanner::with_table(&self.topology, self.capacity.clone())
    }

    /// Path finder over this warehouse's topology
    pub fn path_finder(&self) -> PathFinder<'_> {
        PathFinder::new(&self.topology, self.pathfinding.clone())
    }

    /// Classify the category and plan storage against the current snapshot
    pub fn plan_for_category(
        &self,
        category: &str,
        quantity: i64,
        floor: Floor,
    ) -> Result<StoragePlan<'_>> {
        let size_class = self.classifier.classify(category);
        let snapshot = self.occupancy.snapshot();
        self.capacity_planner()
            .plan_storage(size_class, quantity, floor, &snapshot)
    }
}
