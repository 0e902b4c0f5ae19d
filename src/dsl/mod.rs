//! DAG documents: schema and parsing.

pub mod parser;
pub mod schema;

pub use parser::{load_dsl_file, parse_dsl, DslFormat};
pub use schema::{DagSchema, ModuleConfig, ModuleSchema, ModuleTable};
