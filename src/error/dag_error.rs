//! Graph-level error types.

use super::{LookupError, ModuleError};
use thiserror::Error;

/// Errors raised while parsing, building or running a DAG.
///
/// Every variant is fatal for the run that produced it: the executor does no
/// local recovery and never returns partial outputs.
#[derive(Debug, Error)]
pub enum DagError {
    #[error("DSL parse error: {0}")]
    DslParseError(String),
    #[error("Invalid node #{index}: {reason}")]
    InvalidNode { index: usize, reason: String },
    #[error("Unknown module type: {0}")]
    UnknownModuleType(String),
    #[error("Module not found: node=#{node_index}, name={name}")]
    ModuleNotFound { node_index: usize, name: String },
    #[error("Key not found: node={node}, key={key}, missing segment={segment}")]
    KeyNotFound {
        node: String,
        key: String,
        segment: String,
    },
    #[error("Output arity mismatch: node={node}, expected {expected} value(s), got {found}")]
    ArityMismatch {
        node: String,
        expected: usize,
        found: usize,
    },
    #[error("Module construction failed: name={name}, error={source}")]
    ModuleBuildError {
        name: String,
        #[source]
        source: ModuleError,
    },
    #[error("Module execution error: node={node}, error={source}")]
    ModuleError {
        node: String,
        #[source]
        source: ModuleError,
    },
}

impl DagError {
    pub(crate) fn key_not_found(node: &str, err: LookupError) -> Self {
        DagError::KeyNotFound {
            node: node.to_string(),
            key: err.key,
            segment: err.segment,
        }
    }

    /// Name of the node that failed, when the failure happened during a run.
    pub fn node(&self) -> Option<&str> {
        match self {
            DagError::KeyNotFound { node, .. }
            | DagError::ArityMismatch { node, .. }
            | DagError::ModuleError { node, .. } => Some(node),
            DagError::ModuleNotFound { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dag_error_display() {
        assert_eq!(
            DagError::DslParseError("x".into()).to_string(),
            "DSL parse error: x"
        );
        assert_eq!(
            DagError::InvalidNode {
                index: 2,
                reason: "empty".into()
            }
            .to_string(),
            "Invalid node #2: empty"
        );
        assert_eq!(
            DagError::UnknownModuleType("conv".into()).to_string(),
            "Unknown module type: conv"
        );
        assert_eq!(
            DagError::ModuleNotFound {
                node_index: 0,
                name: "enc".into()
            }
            .to_string(),
            "Module not found: node=#0, name=enc"
        );
        assert_eq!(
            DagError::ArityMismatch {
                node: "split".into(),
                expected: 3,
                found: 2
            }
            .to_string(),
            "Output arity mismatch: node=split, expected 3 value(s), got 2"
        );
    }

    #[test]
    fn test_key_not_found_carries_node_and_segment() {
        let err = DagError::key_not_found(
            "decoder",
            LookupError {
                key: "encoder/z".into(),
                segment: "z".into(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("decoder"));
        assert!(msg.contains("encoder/z"));
        assert_eq!(err.node(), Some("decoder"));
    }

    #[test]
    fn test_module_error_keeps_source() {
        use std::error::Error;

        let err = DagError::ModuleError {
            node: "add".into(),
            source: ModuleError::exact_args(2, 1),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("add"));
    }
}
