//! Items-per-square capacity table.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::SizeClass;
use crate::error::{MapError, Result};

/// How many items of each size class fit on one grid square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityTable {
    #[serde(default = "defaults::items_per_square")]
    pub small: u32,

    #[serde(default = "defaults::items_per_square")]
    pub medium: u32,

    #[serde(default = "defaults::items_per_square")]
    pub large: u32,
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self {
            small: defaults::items_per_square(),
            medium: defaults::items_per_square(),
            large: defaults::items_per_square(),
        }
    }
}

impl CapacityTable {
    /// Same capacity for every class
    pub fn uniform(items_per_square: u32) -> Self {
        Self {
            small: items_per_square,
            medium: items_per_square,
            large: items_per_square,
        }
    }

    /// Items per square for a size class
    #[inline]
    pub fn items_per_square(&self, size_class: SizeClass) -> u32 {
        match size_class {
            SizeClass::Small => self.small,
            SizeClass::Medium => self.medium,
            SizeClass::Large => self.large,
        }
    }

    /// Fail with `InvalidCapacity` if any class holds zero items
    pub fn validate(&self) -> Result<()> {
        match SizeClass::ALL
            .into_iter()
            .find(|&class| self.items_per_square(class) == 0)
        {
            Some(class) => Err(MapError::InvalidCapacity(class)),
            None => Ok(()),
        }
    }
}
