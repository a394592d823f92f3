//! Test utilities for bhandar-map integration tests.
//!
//! Builders for occupancy items, random layouts and a BFS reference
//! router used to cross-check A*.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use rand::Rng;
use std::collections::{HashSet, VecDeque};

use bhandar_map::{GridCoord, GridTopology, LayoutConfig, RackGroupSpec, SizeClass, StoredItem};

/// A stored item at `(x, y)` on `floor`
pub fn item(x: i32, y: i32, floor: u8, quantity: u32) -> StoredItem {
    StoredItem {
        x,
        y,
        floor,
        item_id: format!("SKU-{}-{}-{}", x, y, floor),
        item_name: "Copier paper".to_string(),
        quantity,
        category: "paper".to_string(),
        stored_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
    }
}

/// Random layout of single-cell racks.
///
/// Receiving is at `(0, 0)`, packing at the far corner. Each cell becomes
/// a slot with probability `density`; slots left with no walkable
/// neighbour are turned back into aisles so the layout validates.
pub fn random_layout(rng: &mut impl Rng, width: i32, height: i32, density: f64) -> GridTopology {
    let receiving = GridCoord::new(0, 0);
    let packing = GridCoord::new(width - 1, height - 1);

    let mut slots = HashSet::new();
    for y in 0..height {
        for x in 0..width {
            let coord = GridCoord::new(x, y);
            if coord != receiving && coord != packing && rng.gen_bool(density) {
                slots.insert(coord);
            }
        }
    }

    let in_bounds = |c: &GridCoord| c.x >= 0 && c.y >= 0 && c.x < width && c.y < height;
    let mut kept: Vec<GridCoord> = slots
        .iter()
        .copied()
        .filter(|slot| {
            slot.neighbors_4()
                .iter()
                .any(|n| in_bounds(n) && !slots.contains(n))
        })
        .collect();
    kept.sort();

    let rack_groups = kept
        .iter()
        .enumerate()
        .map(|(i, &coord)| RackGroupSpec {
            name: format!("G{}", i),
            prefix: format!("G{}-", i),
            first_index: 1,
            size_class: SizeClass::ALL[i % SizeClass::ALL.len()],
            from: coord,
            to: coord,
        })
        .collect();

    GridTopology::new(&LayoutConfig {
        width,
        height,
        floors: 1,
        receiving,
        packing,
        rack_groups,
    })
    .unwrap()
}

/// A random in-bounds cell
pub fn random_cell(rng: &mut impl Rng, topology: &GridTopology) -> GridCoord {
    GridCoord::new(
        rng.gen_range(0..topology.width()),
        rng.gen_range(0..topology.height()),
    )
}

/// Breadth-first shortest path length with the route rules: walkable
/// cells only, except that the goal may always be entered.
pub fn bfs_distance(topology: &GridTopology, start: GridCoord, goal: GridCoord) -> Option<usize> {
    if start == goal {
        return Some(0);
    }

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0usize)]);
    while let Some((cell, dist)) = queue.pop_front() {
        for next in cell.neighbors_4() {
            if !topology.contains(next) || seen.contains(&next) {
                continue;
            }
            if next == goal {
                return Some(dist + 1);
            }
            if topology.is_walkable(next).unwrap() {
                seen.insert(next);
                queue.push_back((next, dist + 1));
            }
        }
    }
    None
}

/// Assert that `cells` is a legal route from `start` to `goal`
pub fn assert_valid_route(topology: &GridTopology, cells: &[GridCoord], start: GridCoord, goal: GridCoord) {
    assert_eq!(cells.first(), Some(&start));
    assert_eq!(cells.last(), Some(&goal));
    for pair in cells.windows(2) {
        assert!(
            pair[0].is_adjacent_4(&pair[1]),
            "{} and {} are not 4-adjacent",
            pair[0],
            pair[1]
        );
    }
    if cells.len() > 2 {
        for cell in &cells[1..cells.len() - 1] {
            assert!(
                topology.is_walkable(*cell).unwrap(),
                "route transits non-walkable cell {}",
                cell
            );
        }
    }
}
