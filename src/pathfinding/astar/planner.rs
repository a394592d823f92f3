//! A* planner over the warehouse grid.

use log::{debug, trace, warn};
use std::collections::{BinaryHeap, HashSet};

use super::types::{AStarNode, FallbackPolicy, PathfindingConfig, Route};
use crate::core::{FixedPoint, GridCoord, Slot};
use crate::error::{MapError, Result};
use crate::layout::GridTopology;

/// A* path finder.
///
/// 4-connected moves with unit cost and a Manhattan heuristic, so routes
/// are shortest paths. Aisles and fixed points are walkable; slots are
/// entered only as the route's own start or goal.
pub struct PathFinder<'a> {
    topology: &'a GridTopology,
    config: PathfindingConfig,
}

impl<'a> PathFinder<'a> {
    /// Create a new path finder
    pub fn new(topology: &'a GridTopology, config: PathfindingConfig) -> Self {
        Self { topology, config }
    }

    /// Create with default configuration
    pub fn with_defaults(topology: &'a GridTopology) -> Self {
        Self::new(topology, PathfindingConfig::default())
    }

    /// Configuration in use
    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    /// Shortest walkable route from `start` to `goal`
    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> Result<Route> {
        self.find_path_avoiding(start, goal, &HashSet::new())
    }

    /// Shortest route that also avoids the `blocked` cells.
    ///
    /// `blocked` holds transient obstacles such as other workers; it never
    /// blocks the start or goal themselves.
    pub fn find_path_avoiding(
        &self,
        start: GridCoord,
        goal: GridCoord,
        blocked: &HashSet<GridCoord>,
    ) -> Result<Route> {
        trace!("[AStar] find_path: start={} goal={}", start, goal);

        let start_index = self.topology.index(start)?;
        let goal_index = self.topology.index(goal)?;

        if start_index == goal_index {
            return Ok(Route::found(vec![start], 0));
        }

        match self.search(start_index, goal, blocked) {
            Ok(route) => Ok(route),
            Err(nodes_expanded) => match self.config.fallback {
                FallbackPolicy::Direct => {
                    debug!(
                        "[AStar] no path {} -> {} after {} nodes, using direct route",
                        start, goal, nodes_expanded
                    );
                    Ok(Route::direct(start, goal, nodes_expanded))
                }
                FallbackPolicy::Error => {
                    debug!(
                        "[AStar] FAILED: no path {} -> {} after {} nodes",
                        start, goal, nodes_expanded
                    );
                    Err(MapError::PathNotFound {
                        from: start,
                        to: goal,
                    })
                }
            },
        }
    }

    /// Receiving point to a slot
    pub fn storing_route(&self, slot: &Slot) -> Result<Route> {
        self.find_path(self.topology.fixed_point(FixedPoint::Receiving), slot.coord)
    }

    /// Slot to the packing point
    pub fn collecting_route(&self, slot: &Slot) -> Result<Route> {
        self.find_path(slot.coord, self.topology.fixed_point(FixedPoint::Packing))
    }

    /// Route from `start` through every stop in order.
    ///
    /// Legs are joined without repeating the shared cell. The result is
    /// [`Direct`](super::RouteStatus::Direct) if any leg is.
    pub fn route_via(&self, start: GridCoord, stops: &[GridCoord]) -> Result<Route> {
        let mut route = self.find_path(start, start)?;
        for &stop in stops {
            let leg = self.find_path(route.goal(), stop)?;
            route.append(leg);
        }
        Ok(route)
    }

    /// Check whether a walkable path exists
    pub fn path_exists(&self, start: GridCoord, goal: GridCoord) -> Result<bool> {
        let finder = PathFinder::new(
            self.topology,
            PathfindingConfig {
                fallback: FallbackPolicy::Direct,
                ..self.config.clone()
            },
        );
        Ok(!finder.find_path(start, goal)?.is_direct())
    }

    /// A* search; `Err` carries the number of expanded nodes on failure
    fn search(
        &self,
        start_index: usize,
        goal: GridCoord,
        blocked: &HashSet<GridCoord>,
    ) -> std::result::Result<Route, usize> {
        let cell_count = self.topology.cell_count();
        let mut open_set = BinaryHeap::new();
        let mut closed_set = vec![false; cell_count];
        let mut came_from: Vec<Option<usize>> = vec![None; cell_count];
        let mut g_scores = vec![u32::MAX; cell_count];
        let mut seq = 0u64;

        let start = self.topology.coord_of(start_index);
        let h_start = start.manhattan_distance(&goal);
        open_set.push(AStarNode {
            index: start_index,
            g_cost: 0,
            h_cost: h_start,
            f_cost: h_start,
            seq,
        });
        g_scores[start_index] = 0;

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            if closed_set[current.index] {
                continue;
            }

            nodes_expanded += 1;
            let cap = self.config.max_iterations;
            if cap > 0 && nodes_expanded > cap {
                warn!(
                    "[AStar] gave up after {} nodes (max_iterations={}, grid has {} cells)",
                    nodes_expanded, cap, cell_count
                );
                return Err(nodes_expanded);
            }

            let coord = self.topology.coord_of(current.index);

            // Goal reached
            if coord == goal {
                return Ok(self.reconstruct_path(&came_from, current.index, nodes_expanded));
            }
            closed_set[current.index] = true;

            for neighbor in coord.neighbors_4() {
                if !self.is_traversable(neighbor, goal, blocked) {
                    continue;
                }
                let Ok(index) = self.topology.index(neighbor) else {
                    continue;
                };
                if closed_set[index] {
                    continue;
                }

                let tentative_g = current.g_cost + 1;
                if tentative_g < g_scores[index] {
                    came_from[index] = Some(current.index);
                    g_scores[index] = tentative_g;

                    let h = neighbor.manhattan_distance(&goal);
                    seq += 1;
                    open_set.push(AStarNode {
                        index,
                        g_cost: tentative_g,
                        h_cost: h,
                        f_cost: tentative_g + h,
                        seq,
                    });
                }
            }
        }

        Err(nodes_expanded)
    }

    /// The goal is always enterable; other cells must be walkable and not
    /// blocked.
    #[inline]
    fn is_traversable(
        &self,
        coord: GridCoord,
        goal: GridCoord,
        blocked: &HashSet<GridCoord>,
    ) -> bool {
        coord == goal || (self.topology.passable(coord) && !blocked.contains(&coord))
    }

    /// Reconstruct the path from the came_from table
    fn reconstruct_path(
        &self,
        came_from: &[Option<usize>],
        goal_index: usize,
        nodes_expanded: usize,
    ) -> Route {
        let mut cells = vec![self.topology.coord_of(goal_index)];
        let mut current = goal_index;
        while let Some(prev) = came_from[current] {
            cells.push(self.topology.coord_of(prev));
            current = prev;
        }
        cells.reverse();

        trace!(
            "[AStar] SUCCESS: path length={} cells, nodes_expanded={}",
            cells.len(),
            nodes_expanded
        );
        Route::found(cells, nodes_expanded)
    }
}
