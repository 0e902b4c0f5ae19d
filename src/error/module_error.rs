use thiserror::Error;

/// Errors raised from inside a module invocation.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Expected {expected} argument(s), got {found}")]
    ArgumentCount { expected: String, found: usize },
    #[error("Type error: {0}")]
    TypeError(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Execution error: {0}")]
    ExecutionError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ModuleError {
    pub fn exact_args(expected: usize, found: usize) -> Self {
        ModuleError::ArgumentCount {
            expected: expected.to_string(),
            found,
        }
    }

    pub fn at_least_args(expected: usize, found: usize) -> Self {
        ModuleError::ArgumentCount {
            expected: format!("at least {}", expected),
            found,
        }
    }
}

impl From<serde_json::Error> for ModuleError {
    fn from(e: serde_json::Error) -> Self {
        ModuleError::SerializationError(e.to_string())
    }
}
