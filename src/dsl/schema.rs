//! Serialized form of a DAG document.
//!
//! ```yaml
//! config:
//!   verbose: false
//! modules:
//!   double: { type: scale, factor: 2.0 }
//! dag:
//!   - [double, [inputs/x], [y]]
//!   - module: { type: gain, name: amp, gain: 0.5 }
//!     inputs: [double/y]
//! ```

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::core::EngineConfig;
use crate::domain::model::Node;

/// Top-level DAG document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DagSchema {
    #[serde(default)]
    pub config: EngineConfig,
    /// Externally named modules, built before the graph is normalized.
    #[serde(default)]
    pub modules: ModuleTable,
    pub dag: Vec<Node<ModuleSchema>>,
}

/// A node's module as written in a document: a registry name, or an inline
/// module definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleSchema {
    Name(String),
    Inline(ModuleConfig),
}

/// Construction parameters for one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(rename = "type")]
    pub module_type: String,
    /// Identity name; defaults to the type string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ModuleConfig {
    pub fn identity_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.module_type)
    }
}

/// Named module configurations in document order. A repeated name replaces
/// the earlier entry in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleTable {
    entries: Vec<(String, ModuleConfig)>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, config: ModuleConfig) {
        let name = name.into();
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(index) => self.entries[index].1 = config,
            None => self.entries.push((name, config)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ModuleConfig> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, config)| config)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, ModuleConfig)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ModuleTable {
    type Item = &'a (String, ModuleConfig);
    type IntoIter = std::slice::Iter<'a, (String, ModuleConfig)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ModuleTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|(name, config)| (name, config)))
    }
}

impl<'de> Deserialize<'de> for ModuleTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ModuleTableVisitor;

        impl<'de> Visitor<'de> for ModuleTableVisitor {
            type Value = ModuleTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("mapping of module name to {type, ...params}")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = ModuleTable::new();
                while let Some((name, config)) = map.next_entry::<String, ModuleConfig>()? {
                    table.insert(name, config);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(ModuleTableVisitor)
    }
}
