//! Error types for the DAG engine.
//!
//! - [`ModuleError`]: Errors raised inside a single module invocation.
//! - [`LookupError`]: A nested key path that did not resolve.
//! - [`DagError`]: Top-level errors for parsing, building and running a graph.

pub mod dag_error;
pub mod lookup_error;
pub mod module_error;

pub use dag_error::DagError;
pub use lookup_error::LookupError;
pub use module_error::ModuleError;

/// Convenience alias for graph-level results.
pub type DagResult<T> = Result<T, DagError>;
/// Convenience alias for module-level results.
pub type ModuleResult<T> = Result<T, ModuleError>;
