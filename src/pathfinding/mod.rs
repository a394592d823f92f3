//! Route planning on the warehouse grid.
//!
//! ```rust,ignore
//! use bhandar_map::layout::GridTopology;
//! use bhandar_map::pathfinding::PathFinder;
//!
//! let topology = GridTopology::standard();
//! let finder = PathFinder::with_defaults(&topology);
//!
//! let slot = topology.slot_by_code("B01").unwrap();
//! let route = finder.storing_route(slot)?;
//! println!("{} steps", route.steps());
//! ```

pub mod astar;

pub use astar::{
    FallbackPolicy, PathFinder, PathfindingConfig, Route, RouteStatus, find_path,
};
