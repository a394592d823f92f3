//! Cell kinds of the warehouse grid.
//!
//! Every in-bounds cell is exactly one of:
//! - `Aisle` - walkable floor with no storage
//! - `Fixed` - a walkable fixed point (Receiving or Packing)
//! - `Slot` - one storage square of a rack; never transited by a route

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MapError;

/// Special walkable cells where goods enter and leave the floor plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedPoint {
    /// Inbound goods arrive here; origin of storing routes
    Receiving,
    /// Picked goods are dropped here; destination of collecting routes
    Packing,
}

/// What occupies a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Walkable aisle
    Aisle,
    /// Walkable fixed point
    Fixed(FixedPoint),
    /// Storage slot (not walkable)
    Slot,
}

impl CellKind {
    /// Can a worker walk through this cell?
    #[inline]
    pub fn is_walkable(self) -> bool {
        !matches!(self, CellKind::Slot)
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellKind::Aisle => '.',
            CellKind::Fixed(FixedPoint::Receiving) => 'R',
            CellKind::Fixed(FixedPoint::Packing) => 'P',
            CellKind::Slot => '#',
        }
    }
}

/// Size class of a slot; determines how many items fit on one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// All size classes, smallest first
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Lowercase name, as used in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-insensitive match on the class name.
impl FromStr for SizeClass {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SizeClass::Small),
            "medium" => Ok(SizeClass::Medium),
            "large" => Ok(SizeClass::Large),
            _ => Err(MapError::UnknownSizeClass(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkable_kinds() {
        assert!(CellKind::Aisle.is_walkable());
        assert!(CellKind::Fixed(FixedPoint::Receiving).is_walkable());
        assert!(CellKind::Fixed(FixedPoint::Packing).is_walkable());
        assert!(!CellKind::Slot.is_walkable());
    }

    #[test]
    fn test_size_class_parse() {
        assert_eq!("Medium".parse::<SizeClass>().unwrap(), SizeClass::Medium);
        assert_eq!(" large ".parse::<SizeClass>().unwrap(), SizeClass::Large);
        // No substring matching
        assert!("small-parts".parse::<SizeClass>().is_err());
    }

    #[test]
    fn test_size_class_yaml() {
        let parsed: SizeClass = serde_yaml::from_str("small").unwrap();
        assert_eq!(parsed, SizeClass::Small);
        assert_eq!(serde_yaml::to_string(&SizeClass::Large).unwrap().trim(), "large");
    }
}
