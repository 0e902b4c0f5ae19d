pub mod compat;
pub mod config;
pub mod namespace;
pub mod shape;

pub use config::EngineConfig;
pub use namespace::{OutputNamespace, INPUTS_KEY, OUT_KEY};
