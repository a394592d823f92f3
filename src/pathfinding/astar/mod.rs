//! A* pathfinding algorithm.
//!
//! Implements A* search on the warehouse grid with:
//! - 4-connected movement, unit step cost, Manhattan heuristic
//! - Slots enterable only as the route's start or goal
//! - Optional transient obstacles
//! - Deterministic tie-breaking (lowest f, then lowest h, then insertion order)

mod planner;
mod types;

pub use planner::PathFinder;
pub use types::{FallbackPolicy, PathfindingConfig, Route, RouteStatus};

use crate::core::GridCoord;
use crate::error::Result;
use crate::layout::GridTopology;

/// Quick path finding with default configuration
pub fn find_path(topology: &GridTopology, start: GridCoord, goal: GridCoord) -> Result<Route> {
    PathFinder::with_defaults(topology).find_path(start, goal)
}
