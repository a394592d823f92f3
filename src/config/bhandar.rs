//! Main BhandarConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capacity::{CapacityTable, SizeClassifier};
use crate::error::Result;
use crate::layout::{GridTopology, LayoutConfig};
use crate::pathfinding::PathfindingConfig;

use super::categories::CategorySection;
use super::error::ConfigLoadError;

/// Full warehouse configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct BhandarConfig {
    /// Floor plan: dimensions, floors, fixed points and racks
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Items per square for each size class
    #[serde(default)]
    pub capacity: CapacityTable,

    /// Item category to size class mapping
    #[serde(default)]
    pub categories: CategorySection,

    /// Route search settings
    #[serde(default)]
    pub pathfinding: PathfindingConfig,
}

impl BhandarConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/warehouse.yaml)
    pub fn load_default() -> std::result::Result<Self, ConfigLoadError> {
        let path = Path::new("configs/warehouse.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> std::result::Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Build and validate the topology described by the layout section
    pub fn build_topology(&self) -> Result<GridTopology> {
        GridTopology::new(&self.layout)
    }

    /// Category classifier from the categories section
    pub fn classifier(&self) -> SizeClassifier {
        SizeClassifier::from_section(&self.categories)
    }
}
