//! Compatibility shim: older graphs address raw inputs by bare key (`x`)
//! instead of `inputs/x`. Every input key is mirrored at the namespace root.
//! Node outputs stored later under the same name replace the mirror.

use serde_json::{Map, Value};
use std::sync::Arc;

use super::namespace::OutputNamespace;

pub fn alias_inputs_at_root(namespace: &mut OutputNamespace, inputs: &Map<String, Value>) {
    for (key, value) in inputs {
        namespace.insert(key.clone(), Arc::new(value.clone()));
    }
}
