//! Domain layer: pure model types.
//!
//! Nothing here depends on module instances or on the executor; the types are
//! what a serialized graph looks like.

pub mod model;
