//! ASCII rendering of one floor, for logs and the CLI.
//!
//! Row `y = 0` is printed first. Legend:
//!
//! | char        | cell                             |
//! |-------------|----------------------------------|
//! | `.`         | aisle                            |
//! | `R` / `P`   | receiving / packing point        |
//! | `s` `m` `l` | empty small / medium / large slot|
//! | `S` `M` `L` | occupied slot                    |
//! | `*`         | route through an aisle           |
//! | `@`         | route terminal inside a slot     |

use std::collections::HashSet;
use std::fmt::Write;

use crate::core::{CellKind, Floor, GridCoord, SizeClass};
use crate::error::Result;
use crate::layout::GridTopology;
use crate::occupancy::OccupancySnapshot;

/// Render a floor with its occupancy and an optional route overlay
pub fn render_floor(
    topology: &GridTopology,
    occupancy: &OccupancySnapshot,
    floor: Floor,
    route: Option<&[GridCoord]>,
) -> Result<String> {
    topology.check_floor(floor)?;
    let on_route: HashSet<GridCoord> = route.unwrap_or_default().iter().copied().collect();

    let mut out = String::with_capacity(((topology.width() + 1) * topology.height()) as usize);
    for y in 0..topology.height() {
        for x in 0..topology.width() {
            let coord = GridCoord::new(x, y);
            let kind = topology.cell_kind(coord)?;
            let ch = match (kind, topology.slot_at(coord)?) {
                (CellKind::Slot, _) if on_route.contains(&coord) => '@',
                (CellKind::Slot, Some(slot)) => {
                    slot_char(slot.size_class, occupancy.is_occupied(coord, floor))
                }
                (CellKind::Aisle, _) if on_route.contains(&coord) => '*',
                _ => kind.as_char(),
            };
            out.push(ch);
        }
        out.push('\n');
    }
    Ok(out)
}

/// One-line summary per occupied location of a floor
pub fn render_records(occupancy: &OccupancySnapshot, floor: Floor) -> String {
    let mut out = String::new();
    for record in occupancy.records_on(floor) {
        let _ = writeln!(
            out,
            "{:<8} {:<12} {:<24} qty={:<5} stored={}",
            record.location_code,
            record.item_id,
            record.item_name,
            record.quantity,
            record.stored_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

fn slot_char(size_class: SizeClass, occupied: bool) -> char {
    let ch = match size_class {
        SizeClass::Small => 's',
        SizeClass::Medium => 'm',
        SizeClass::Large => 'l',
    };
    if occupied { ch.to_ascii_uppercase() } else { ch }
}
