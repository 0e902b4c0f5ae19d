use serde_json::Value;

use crate::error::{DagError, DagResult};
use crate::nodes::{ModuleOutput, OutputMap};

/// Label used for a single unlabeled value when a node declares no outputs.
pub const DEFAULT_OUTPUT_KEY: &str = "output";

/// Positional labels for an unlabeled result with `arity` values.
pub fn default_output_keys(arity: usize, single: bool) -> Vec<String> {
    if single {
        vec![DEFAULT_OUTPUT_KEY.to_string()]
    } else {
        (0..arity)
            .map(|i| format!("{}_{}", DEFAULT_OUTPUT_KEY, i))
            .collect()
    }
}

/// Shape a raw module result into an output mapping.
///
/// Mappings pass through and `output_keys` is ignored. Otherwise the values
/// are zipped with `output_keys` (or positional defaults) and the counts must
/// match exactly.
pub fn to_mapping(
    node: &str,
    raw: ModuleOutput,
    output_keys: Option<&[String]>,
) -> DagResult<OutputMap> {
    let (values, single): (Vec<Value>, bool) = match raw {
        ModuleOutput::Mapping(map) => return Ok(map),
        ModuleOutput::Single(value) => (vec![value], true),
        ModuleOutput::Tuple(values) => (values, false),
    };
    let keys = match output_keys {
        Some(keys) => keys.to_vec(),
        None => default_output_keys(values.len(), single),
    };
    if keys.len() != values.len() {
        return Err(DagError::ArityMismatch {
            node: node.to_string(),
            expected: keys.len(),
            found: values.len(),
        });
    }
    Ok(keys.into_iter().zip(values).collect())
}
