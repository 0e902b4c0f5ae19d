use thiserror::Error;

/// A nested lookup miss: `segment` is the first path segment that did not
/// resolve while walking `key`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Key '{key}' not found (missing segment '{segment}')")]
pub struct LookupError {
    pub key: String,
    pub segment: String,
}
