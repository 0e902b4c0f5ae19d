//! Graph execution.

pub mod executor;
pub mod result_shaping;

pub use executor::{run_dag, RunOptions};
pub use result_shaping::{to_mapping, DEFAULT_OUTPUT_KEY};
