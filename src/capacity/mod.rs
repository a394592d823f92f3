//! Storage capacity planning.
//!
//! - [`CapacityTable`]: items per square for each size class
//! - [`CapacityPlanner`]: required squares and slot suggestions
//! - [`SizeClassifier`]: item category to [`SizeClass`](crate::core::SizeClass)

mod classifier;
mod planner;
mod table;

pub use classifier::SizeClassifier;
pub use planner::{CapacityPlanner, StoragePlan};
pub use table::CapacityTable;
