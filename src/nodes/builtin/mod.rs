//! Bundled numeric modules, registered by type string.
//!
//! | Type | Convention | Params |
//! |------|------------|--------|
//! | `scale` | default | `factor` |
//! | `add` | default | |
//! | `split` | default (tuple) | |
//! | `stats` | default (mapping) | |
//! | `gain` | processor | `gain` |
//! | `mse` | loss | `weight` |

mod arithmetic;
mod gain;
mod mse;
pub mod numeric;

use std::sync::Arc;

pub use arithmetic::{Add, Scale, Split, Stats};
pub use gain::Gain;
pub use mse::MeanSquaredError;

use super::ModuleFactoryRegistry;

pub fn register_builtins(registry: &mut ModuleFactoryRegistry) {
    registry.register("scale", Arc::new(Scale::from_params));
    registry.register("add", Arc::new(Add::from_params));
    registry.register("split", Arc::new(Split::from_params));
    registry.register("stats", Arc::new(Stats::from_params));
    registry.register("gain", Arc::new(Gain::from_params));
    registry.register("mse", Arc::new(MeanSquaredError::from_params));
}
