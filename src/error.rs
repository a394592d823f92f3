//! Error types for bhandar-map

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::core::{GridCoord, SizeClass};

/// Errors raised by topology, occupancy, capacity and route queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("cell {coord} is outside the {width}x{height} grid")]
    OutOfBounds {
        coord: GridCoord,
        width: i32,
        height: i32,
    },

    #[error("floor {floor} is outside 1..={floors}")]
    InvalidFloor { floor: u8, floors: u8 },

    #[error("cell {0} is not a storage slot")]
    NotASlot(GridCoord),

    #[error("unknown slot code: {0}")]
    UnknownSlot(String),

    #[error("invalid location code: {0}")]
    InvalidLocationCode(String),

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("unknown size class: {0}")]
    UnknownSizeClass(String),

    #[error("{location}: quantity {quantity} exceeds slot capacity {capacity}")]
    OverCapacity {
        location: String,
        quantity: u32,
        capacity: u32,
    },

    #[error("location {0} appears more than once in the snapshot")]
    DuplicateLocation(String),

    #[error("location {0} has a zero quantity record")]
    EmptyRecord(String),

    #[error("record for floor {found} in a refresh of floor {expected}")]
    FloorMismatch { expected: u8, found: u8 },

    #[error("items per square for {0} must be positive")]
    InvalidCapacity(SizeClass),

    #[error("no walkable path from {from} to {to}")]
    PathNotFound { from: GridCoord, to: GridCoord },

    #[error("layout error: {0}")]
    Layout(String),

    #[error("occupancy snapshot error: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Config(#[from] ConfigLoadError),
}

pub type Result<T> = std::result::Result<T, MapError>;
