//! Graph specification and normalization.
//!
//! A [`GraphSpec`] may carry module instances inline. [`normalize`] splits it
//! into a pure, name-only [`Graph`](crate::domain::model::Graph) plus the
//! extracted modules.

pub mod normalizer;
pub mod spec;

pub use normalizer::normalize;
pub use spec::{GraphSpec, ModuleRef, NodeSpec};
