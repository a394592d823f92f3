//! Core types for the warehouse grid.
//!
//! - [`GridCoord`]: integer cell coordinate
//! - [`CellKind`], [`FixedPoint`]: what an in-bounds cell is
//! - [`Slot`], [`SizeClass`], [`Floor`]: storage locations

mod cell;
mod point;
mod slot;

pub use cell::{CellKind, FixedPoint, SizeClass};
pub use point::GridCoord;
pub use slot::{Floor, Slot};
