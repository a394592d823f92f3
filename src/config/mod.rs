//! Unified configuration loading for bhandar-map.
//!
//! Loads all configuration from a single YAML file.

pub(crate) mod defaults;
mod bhandar;
mod categories;
mod error;

pub use bhandar::BhandarConfig;
pub use categories::CategorySection;
pub use error::ConfigLoadError;
