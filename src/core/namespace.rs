use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::model::KeyPath;
use crate::error::LookupError;
use crate::nodes::OutputMap;

/// Reserved root key holding the raw input mapping.
pub const INPUTS_KEY: &str = "inputs";
/// Reserved root key aliasing the last executed node's outputs.
pub const OUT_KEY: &str = "out";

/// Accumulating outputs of one run.
///
/// Root entries are shared handles so `out` can alias the last node's
/// mapping without copying it.
#[derive(Debug, Clone, Default)]
pub struct OutputNamespace {
    entries: HashMap<String, Arc<Value>>,
}

impl OutputNamespace {
    /// A namespace holding only `{"inputs": inputs}`.
    pub fn new(inputs: Map<String, Value>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(INPUTS_KEY.to_string(), Arc::new(Value::Object(inputs)));
        Self { entries }
    }

    /// Set a root entry, returning whatever it shadowed.
    pub fn insert(&mut self, key: impl Into<String>, value: Arc<Value>) -> Option<Arc<Value>> {
        self.entries.insert(key.into(), value)
    }

    /// Store a node's output mapping under its name and hand back the shared
    /// handle.
    pub fn set_node_outputs(&mut self, node: &str, outputs: OutputMap) -> Arc<Value> {
        let shared = Arc::new(Value::Object(outputs));
        self.entries.insert(node.to_string(), Arc::clone(&shared));
        shared
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Value>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Resolve a nested key path: the head addresses a root entry, the rest
    /// walk nested mappings.
    pub fn lookup(&self, path: &KeyPath) -> Result<&Value, LookupError> {
        let head = path.head().ok_or_else(|| path.miss(""))?;
        let root = self.entries.get(head).ok_or_else(|| path.miss(head))?;
        path.descend(root)
    }

    /// Convenience for `lookup(&KeyPath::parse_str(key))`.
    pub fn lookup_str(&self, key: &str) -> Result<&Value, LookupError> {
        self.lookup(&KeyPath::parse_str(key))
    }

    pub fn inputs(&self) -> Option<&Value> {
        self.entries.get(INPUTS_KEY).map(|v| v.as_ref())
    }

    pub fn out(&self) -> Option<&Arc<Value>> {
        self.entries.get(OUT_KEY)
    }

    /// Root keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Root entries ordered by key.
    fn sorted_entries(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<(&str, &Value)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_ref()))
            .collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }

    /// Deep copy into a plain JSON object, root keys sorted.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .sorted_entries()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for OutputNamespace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.sorted_entries())
    }
}
