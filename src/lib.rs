//! # xdag: declarative DAG execution
//!
//! `xdag` wires named modules into a directed acyclic graph from a flat,
//! list-based specification and runs them in a single deterministic pass.
//! Every intermediate output stays addressable in a nested output namespace.
//!
//! - **Normalization**: modules given inline in the graph are pulled into a
//!   name-indexed registry; the graph itself becomes pure data.
//! - **Nested lookup**: node inputs are `/`-delimited key paths into earlier
//!   outputs (`encoder/z`) or the raw inputs (`inputs/f0_hz`).
//! - **Capability dispatch**: processors, losses and plain modules are each
//!   invoked with their own convention.
//! - **DSL**: graphs and module parameters load from YAML, JSON or TOML.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xdag::{DagLayer, DslFormat, CallKwargs, ModuleFactoryRegistry};
//!
//! let yaml = r#"
//! modules:
//!   double: {type: scale, factor: 2.0}
//! dag:
//!   - [double, [inputs/x], [y]]
//! "#;
//! let layer = DagLayer::from_dsl(yaml, DslFormat::Yaml, &ModuleFactoryRegistry::with_builtins())
//!     .unwrap();
//! let inputs = serde_json::json!({"x": 3.0}).as_object().unwrap().clone();
//! let outputs = layer.call(inputs, CallKwargs::new()).unwrap();
//! println!("{}", outputs.lookup_str("out/y").unwrap());
//! ```
//!
//! # Feature Flags
//!
//! | Flag | Description |
//! |------|-------------|
//! | `builtin-modules` | Registers the bundled numeric modules (`scale`, `add`, `split`, `stats`, `gain`, `mse`) |

pub mod api;
pub mod core;
pub mod domain;
pub mod dsl;
pub mod engine;
pub mod error;
pub mod graph;
pub mod nodes;

pub use crate::api::{DagLayer, DagLayerBuilder};
pub use crate::core::{EngineConfig, OutputNamespace, INPUTS_KEY, OUT_KEY};
pub use crate::domain::model::{Graph, KeyPath, Node};
pub use crate::dsl::{
    load_dsl_file, parse_dsl, DagSchema, DslFormat, ModuleConfig, ModuleSchema, ModuleTable,
};
pub use crate::engine::{run_dag, RunOptions};
pub use crate::error::{DagError, DagResult, LookupError, ModuleError, ModuleResult};
pub use crate::graph::{normalize, GraphSpec, ModuleRef, NodeSpec};
pub use crate::nodes::{
    capability_of, CallKwargs, Capability, Loss, Module, ModuleFactory, ModuleFactoryRegistry,
    ModuleOutput, ModuleRegistry, OutputMap, Processor,
};
