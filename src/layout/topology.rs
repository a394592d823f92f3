//! Immutable warehouse grid topology.

use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use super::config::LayoutConfig;
use crate::core::{CellKind, FixedPoint, Floor, GridCoord, SizeClass, Slot};
use crate::error::{MapError, Result};

static STANDARD: Lazy<Arc<GridTopology>> = Lazy::new(|| {
    Arc::new(
        GridTopology::new(&LayoutConfig::default()).expect("standard layout is valid"),
    )
});

/// Largest accepted grid, in cells
const MAX_CELLS: i32 = 1 << 20;

/// Internal per-cell entry (row-major storage)
#[derive(Clone, Copy, Debug)]
enum CellEntry {
    Aisle,
    Fixed(FixedPoint),
    /// Index into `GridTopology::slots`
    Slot(usize),
}

/// A named rack and the contiguous range of slots it owns.
#[derive(Clone, Debug)]
pub struct RackGroup {
    /// Rack group name, e.g. `B1`
    pub name: String,
    /// Size class shared by all slots of the rack
    pub size_class: SizeClass,
    slots: Range<usize>,
}

impl RackGroup {
    /// Number of slots in the rack
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the rack has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Fixed-topology warehouse grid.
///
/// Built once from a [`LayoutConfig`] and never mutated. Every in-bounds
/// cell resolves to exactly one [`CellKind`]; out-of-bounds lookups return
/// [`MapError::OutOfBounds`].
///
/// Slots are stored in allocation priority order: rack groups in
/// configuration order, then run order inside each rack.
#[derive(Clone, Debug)]
pub struct GridTopology {
    width: i32,
    height: i32,
    floors: u8,
    receiving: GridCoord,
    packing: GridCoord,
    cells: Vec<CellEntry>,
    slots: Vec<Slot>,
    groups: Vec<RackGroup>,
    codes: HashMap<String, usize>,
}

impl GridTopology {
    /// Build and validate a topology.
    ///
    /// Rejects zero-sized grids, zero floors, fixed points out of bounds or
    /// on the same cell, diagonal or out-of-bounds racks, overlapping racks,
    /// racks over fixed points, duplicate group names or slot codes, and
    /// slots with no walkable neighbour.
    pub fn new(config: &LayoutConfig) -> Result<Self> {
        if config.width <= 0 || config.height <= 0 {
            return Err(MapError::Layout(format!(
                "grid must be non-empty, got {}x{}",
                config.width, config.height
            )));
        }
        if config.floors == 0 {
            return Err(MapError::Layout("layout needs at least one floor".into()));
        }
        if config.receiving == config.packing {
            return Err(MapError::Layout(format!(
                "receiving and packing share cell {}",
                config.receiving
            )));
        }

        let area = config
            .width
            .checked_mul(config.height)
            .filter(|&area| area <= MAX_CELLS)
            .ok_or_else(|| {
                MapError::Layout(format!(
                    "grid {}x{} exceeds {} cells",
                    config.width, config.height, MAX_CELLS
                ))
            })?;

        let mut topology = Self {
            width: config.width,
            height: config.height,
            floors: config.floors,
            receiving: config.receiving,
            packing: config.packing,
            cells: vec![CellEntry::Aisle; area as usize],
            slots: Vec::new(),
            groups: Vec::with_capacity(config.rack_groups.len()),
            codes: HashMap::new(),
        };

        for (coord, point) in [
            (config.receiving, FixedPoint::Receiving),
            (config.packing, FixedPoint::Packing),
        ] {
            let idx = topology.index(coord)?;
            topology.cells[idx] = CellEntry::Fixed(point);
        }

        for spec in &config.rack_groups {
            if topology.groups.iter().any(|g| g.name == spec.name) {
                return Err(MapError::Layout(format!(
                    "duplicate rack group {}",
                    spec.name
                )));
            }
            // Endpoints first so the run length is bounded by the grid
            topology.check(spec.from)?;
            topology.check(spec.to)?;
            let run = spec.cells().ok_or_else(|| {
                MapError::Layout(format!(
                    "rack {} runs diagonally from {} to {}",
                    spec.name, spec.from, spec.to
                ))
            })?;

            let start = topology.slots.len();
            for (i, coord) in run.into_iter().enumerate() {
                let idx = topology.index(coord)?;
                match topology.cells[idx] {
                    CellEntry::Aisle => {}
                    CellEntry::Fixed(point) => {
                        return Err(MapError::Layout(format!(
                            "rack {} covers {:?} point at {}",
                            spec.name, point, coord
                        )));
                    }
                    CellEntry::Slot(other) => {
                        return Err(MapError::Layout(format!(
                            "rack {} overlaps slot {} at {}",
                            spec.name, topology.slots[other].code, coord
                        )));
                    }
                }

                let number = u32::try_from(i)
                    .ok()
                    .and_then(|i| spec.first_index.checked_add(i))
                    .ok_or_else(|| {
                        MapError::Layout(format!(
                            "rack {} slot numbers overflow from first index {}",
                            spec.name, spec.first_index
                        ))
                    })?;
                let code = format!("{}{:02}", spec.prefix, number);
                let slot_index = topology.slots.len();
                if topology.codes.insert(code.clone(), slot_index).is_some() {
                    return Err(MapError::Layout(format!("duplicate slot code {}", code)));
                }
                topology.cells[idx] = CellEntry::Slot(slot_index);
                topology.slots.push(Slot {
                    code,
                    coord,
                    size_class: spec.size_class,
                    rack_group: spec.name.clone(),
                });
            }

            topology.groups.push(RackGroup {
                name: spec.name.clone(),
                size_class: spec.size_class,
                slots: start..topology.slots.len(),
            });
        }

        for slot in &topology.slots {
            let reachable = slot
                .coord
                .neighbors_4()
                .iter()
                .any(|n| topology.passable(*n));
            if !reachable {
                return Err(MapError::Layout(format!(
                    "slot {} at {} has no walkable neighbour",
                    slot.code, slot.coord
                )));
            }
        }

        debug!(
            "[Topology] built {}x{} grid, {} floors, {} racks, {} slots",
            topology.width,
            topology.height,
            topology.floors,
            topology.groups.len(),
            topology.slots.len()
        );

        Ok(topology)
    }

    /// The standard 10x12, four-floor warehouse, built once per process.
    pub fn standard() -> Arc<GridTopology> {
        Arc::clone(&STANDARD)
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of floors
    #[inline]
    pub fn floor_count(&self) -> u8 {
        self.floors
    }

    /// All floors, lowest first
    pub fn floors(&self) -> impl Iterator<Item = Floor> + use<> {
        (1..=self.floors).map(Floor::new)
    }

    /// Is the coordinate inside the grid?
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Fail with `OutOfBounds` unless the coordinate is inside the grid
    pub fn check(&self, coord: GridCoord) -> Result<()> {
        self.index(coord).map(|_| ())
    }

    /// Fail with `InvalidFloor` unless the floor exists
    pub fn check_floor(&self, floor: Floor) -> Result<()> {
        if floor.get() == 0 || floor.get() > self.floors {
            return Err(MapError::InvalidFloor {
                floor: floor.get(),
                floors: self.floors,
            });
        }
        Ok(())
    }

    /// Validated floor from a raw level number
    pub fn floor(&self, level: u8) -> Result<Floor> {
        let floor = Floor::new(level);
        self.check_floor(floor)?;
        Ok(floor)
    }

    /// Row-major index of an in-bounds cell
    #[inline]
    pub(crate) fn index(&self, coord: GridCoord) -> Result<usize> {
        if !self.contains(coord) {
            return Err(MapError::OutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            });
        }
        Ok((coord.y * self.width + coord.x) as usize)
    }

    /// Coordinate of a row-major index
    #[inline]
    pub(crate) fn coord_of(&self, index: usize) -> GridCoord {
        let index = index as i32;
        GridCoord::new(index % self.width, index / self.width)
    }

    /// What occupies the cell
    pub fn cell_kind(&self, coord: GridCoord) -> Result<CellKind> {
        Ok(match self.cells[self.index(coord)?] {
            CellEntry::Aisle => CellKind::Aisle,
            CellEntry::Fixed(point) => CellKind::Fixed(point),
            CellEntry::Slot(_) => CellKind::Slot,
        })
    }

    /// Slot at the cell, if the cell is a slot
    pub fn slot_at(&self, coord: GridCoord) -> Result<Option<&Slot>> {
        Ok(match self.cells[self.index(coord)?] {
            CellEntry::Slot(i) => Some(&self.slots[i]),
            _ => None,
        })
    }

    /// True iff the cell is in bounds and not a slot.
    ///
    /// Occupancy never changes walkability: slots are targeted, not
    /// transited.
    pub fn is_walkable(&self, coord: GridCoord) -> Result<bool> {
        Ok(self.cell_kind(coord)?.is_walkable())
    }

    /// Walkability without the bounds error; out-of-bounds is impassable.
    #[inline]
    pub(crate) fn passable(&self, coord: GridCoord) -> bool {
        self.contains(coord)
            && !matches!(
                self.cells[(coord.y * self.width + coord.x) as usize],
                CellEntry::Slot(_)
            )
    }

    /// Storage location code, `<slot code>.<floor>`
    pub fn location_code(&self, slot: &Slot, floor: Floor) -> String {
        format!("{}.{}", slot.code, floor.get())
    }

    /// Resolve a location code such as `B01.2` into its slot and floor
    pub fn parse_location_code(&self, code: &str) -> Result<(&Slot, Floor)> {
        let invalid = || MapError::InvalidLocationCode(code.to_string());
        let (slot_code, level) = code.rsplit_once('.').ok_or_else(invalid)?;
        let level: u8 = level.parse().map_err(|_| invalid())?;
        let slot = self
            .slot_by_code(slot_code)
            .ok_or_else(|| MapError::UnknownSlot(slot_code.to_string()))?;
        Ok((slot, self.floor(level)?))
    }

    /// Look up a slot by its code
    pub fn slot_by_code(&self, code: &str) -> Option<&Slot> {
        self.codes.get(code).map(|&i| &self.slots[i])
    }

    /// All slots in allocation priority order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slots of one size class in allocation priority order
    pub fn slots_of_class(&self, size_class: SizeClass) -> impl Iterator<Item = &Slot> + '_ {
        self.slots
            .iter()
            .filter(move |slot| slot.size_class == size_class)
    }

    /// Rack groups in priority order
    pub fn rack_groups(&self) -> &[RackGroup] {
        &self.groups
    }

    /// Slots of one rack group, in run order
    pub fn slots_in_group(&self, name: &str) -> Option<&[Slot]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| &self.slots[g.slots.clone()])
    }

    /// Receiving point
    #[inline]
    pub fn receiving(&self) -> GridCoord {
        self.receiving
    }

    /// Packing point
    #[inline]
    pub fn packing(&self) -> GridCoord {
        self.packing
    }

    /// Cell of a fixed point
    pub fn fixed_point(&self, point: FixedPoint) -> GridCoord {
        match point {
            FixedPoint::Receiving => self.receiving,
            FixedPoint::Packing => self.packing,
        }
    }
}
