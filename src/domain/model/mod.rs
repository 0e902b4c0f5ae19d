//! Pure-data model types shared across layers.

mod key_path;
mod node;

pub use key_path::{KeyPath, KEY_DELIMITER};
pub use node::Node;

/// An ordered, name-only graph ready for execution.
pub type Graph = Vec<Node<String>>;
