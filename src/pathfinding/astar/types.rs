//! A* pathfinding types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::defaults;
use crate::core::GridCoord;

/// A node in the A* open set
#[derive(Clone, Copy, Debug)]
pub(super) struct AStarNode {
    pub index: usize,
    pub g_cost: u32, // Steps from start
    pub h_cost: u32, // Manhattan distance to goal
    pub f_cost: u32, // g_cost + h_cost
    pub seq: u64,    // Insertion order
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior: lowest f, then lowest h,
        // then earliest insertion
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What to return when start and goal are not connected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Two-cell `[start, goal]` route flagged [`RouteStatus::Direct`]
    #[default]
    Direct,
    /// [`MapError::PathNotFound`](crate::MapError::PathNotFound)
    Error,
}

/// Route search configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathfindingConfig {
    /// Behaviour when no walkable path exists
    #[serde(default)]
    pub fallback: FallbackPolicy,

    /// Maximum number of nodes to expand before giving up; 0 disables
    /// the cap
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::Direct,
            max_iterations: defaults::max_iterations(),
        }
    }
}

/// How a route was obtained
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    /// Shortest walkable path
    Found,
    /// No path was found; cells are just `[start, goal]` and need not be
    /// adjacent
    Direct,
}

/// Ordered cells from start to goal.
///
/// Routes are only built by the path finder, so the cell list is never
/// empty: the first cell is the start and the last the goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Cells in walking order
    pub(super) cells: Vec<GridCoord>,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Whether the cells form a real walkable path
    pub status: RouteStatus,
}

impl Route {
    pub(super) fn found(cells: Vec<GridCoord>, nodes_expanded: usize) -> Self {
        Self {
            cells,
            nodes_expanded,
            status: RouteStatus::Found,
        }
    }

    pub(super) fn direct(start: GridCoord, goal: GridCoord, nodes_expanded: usize) -> Self {
        Self {
            cells: vec![start, goal],
            nodes_expanded,
            status: RouteStatus::Direct,
        }
    }

    /// Cells in walking order, start first
    #[inline]
    pub fn cells(&self) -> &[GridCoord] {
        &self.cells
    }

    /// First cell
    pub fn start(&self) -> GridCoord {
        self.cells[0]
    }

    /// Last cell
    pub fn goal(&self) -> GridCoord {
        self.cells[self.cells.len() - 1]
    }

    /// Path length in cells
    pub fn length_cells(&self) -> usize {
        self.cells.len()
    }

    /// Path length in unit steps
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    /// True for a fallback route
    pub fn is_direct(&self) -> bool {
        self.status == RouteStatus::Direct
    }

    /// Append a leg that starts where this route ends
    pub(super) fn append(&mut self, leg: Route) {
        debug_assert_eq!(leg.start(), self.goal());
        self.cells.extend(leg.cells.into_iter().skip(1));
        self.nodes_expanded += leg.nodes_expanded;
        if leg.status == RouteStatus::Direct {
            self.status = RouteStatus::Direct;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn node(f_cost: u32, h_cost: u32, seq: u64) -> AStarNode {
        AStarNode {
            index: 0,
            g_cost: f_cost - h_cost,
            h_cost,
            f_cost,
            seq,
        }
    }

    #[test]
    fn test_heap_order() {
        let mut heap = BinaryHeap::new();
        heap.push(node(10, 2, 0));
        heap.push(node(8, 4, 1));
        heap.push(node(8, 1, 2));
        heap.push(node(8, 1, 3));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop()).map(|n| n.seq).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_append_legs() {
        let mut route = Route::found(vec![GridCoord::new(0, 0), GridCoord::new(0, 1)], 3);
        route.append(Route::direct(GridCoord::new(0, 1), GridCoord::new(4, 4), 7));
        assert_eq!(route.cells().len(), 3);
        assert_eq!(route.goal(), GridCoord::new(4, 4));
        assert_eq!(route.nodes_expanded, 10);
        assert!(route.is_direct());
    }

    #[test]
    fn test_single_cell_route() {
        let here = GridCoord::new(2, 3);
        let route = Route::found(vec![here], 0);
        assert_eq!(route.cells(), [here]);
        assert_eq!(route.start(), here);
        assert_eq!(route.goal(), here);
        assert_eq!(route.steps(), 0);
    }

    #[test]
    fn test_route_serializes_cells() {
        let route = Route::direct(GridCoord::new(0, 0), GridCoord::new(3, 1), 5);
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["cells"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["status"], "direct");
        assert_eq!(json["nodes_expanded"], 5);
    }
}
