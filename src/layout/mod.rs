//! Warehouse floor plan.
//!
//! - [`LayoutConfig`], [`RackGroupSpec`]: serde description of a floor plan
//! - [`GridTopology`]: the validated, immutable grid built from it

mod config;
mod topology;

pub use config::{LayoutConfig, RackGroupSpec};
pub use topology::{GridTopology, RackGroup};
