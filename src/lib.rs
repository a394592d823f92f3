//! # Bhandar-Map: Warehouse Grid Model
//!
//! Spatial model for a small multi-floor warehouse: a fixed grid of aisles,
//! racks of storage slots, a receiving and a packing point.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bhandar_map::{CapacityPlanner, Floor, GridTopology, OccupancySnapshot, PathFinder, SizeClass};
//!
//! let topology = GridTopology::standard();
//!
//! // Where do 120 medium items go on the ground floor?
//! let planner = CapacityPlanner::with_defaults(&topology);
//! let slots = planner
//!     .suggest_locations(SizeClass::Medium, 120, Floor::GROUND, &OccupancySnapshot::empty())
//!     .unwrap();
//!
//! // And how does a worker get there?
//! let route = PathFinder::with_defaults(&topology).storing_route(slots[0]).unwrap();
//! println!("{} -> {} steps", slots[0].code, route.steps());
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Fundamental types (GridCoord, SizeClass, Slot, Floor)
//! - [`layout`]: Immutable grid topology built from a floor plan
//! - [`capacity`]: Items per square and slot suggestions
//! - [`occupancy`]: Per-floor occupied slots, refreshed from backend snapshots
//! - [`pathfinding`]: A* routes between cells
//! - [`render`]: ASCII floor view for logs and the CLI
//! - [`config`]: YAML configuration
//! - [`warehouse`]: All of the above wired from one config
//!
//! ## Coordinate Frame
//!
//! `x` grows to the right across `0..width`, `y` grows away from receiving
//! across `0..height`. Floors are numbered from 1.

pub mod capacity;
pub mod config;
pub mod core;
pub mod error;
pub mod layout;
pub mod occupancy;
pub mod pathfinding;
pub mod render;
pub mod warehouse;

pub use capacity::{CapacityPlanner, CapacityTable, SizeClassifier, StoragePlan};
pub use config::{BhandarConfig, ConfigLoadError};
pub use core::{CellKind, FixedPoint, Floor, GridCoord, SizeClass, Slot};
pub use error::{MapError, Result};
pub use layout::{GridTopology, LayoutConfig, RackGroupSpec};
pub use occupancy::{OccupancyRecord, OccupancySnapshot, OccupancyStore, StoredItem};
pub use pathfinding::{FallbackPolicy, PathFinder, PathfindingConfig, Route, RouteStatus};
pub use warehouse::Warehouse;
