//! Item category to size class mapping section.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults;
use crate::core::SizeClass;

/// Category mapping settings
///
/// ```yaml
/// categories:
///   default: medium
///   mapping:
///     electronics: small
///     furniture: large
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategorySection {
    /// Size class for categories with no explicit mapping
    #[serde(default = "defaults::default_size_class")]
    pub default: SizeClass,

    /// Category name (case-insensitive) to size class
    #[serde(default)]
    pub mapping: BTreeMap<String, SizeClass>,
}

impl Default for CategorySection {
    fn default() -> Self {
        Self {
            default: SizeClass::Medium,
            mapping: BTreeMap::new(),
        }
    }
}
