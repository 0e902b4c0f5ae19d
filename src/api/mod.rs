//! Public API layer: the construction and execution entry points.

mod dag_layer;

pub use dag_layer::{DagLayer, DagLayerBuilder};
