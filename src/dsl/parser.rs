//! DSL parser: converts raw YAML/JSON/TOML text into [`DagSchema`].

use std::path::Path;

use super::schema::DagSchema;
use crate::error::DagError;

/// Supported DSL input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DslFormat {
    /// YAML format (`.yaml` / `.yml`).
    Yaml,
    /// JSON format (`.json`).
    Json,
    /// TOML format (`.toml`).
    Toml,
}

impl DslFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(DslFormat::Yaml),
            "json" => Some(DslFormat::Json),
            "toml" => Some(DslFormat::Toml),
            _ => None,
        }
    }
}

/// Parse DSL content into DagSchema
pub fn parse_dsl(content: &str, format: DslFormat) -> Result<DagSchema, DagError> {
    match format {
        DslFormat::Yaml => {
            serde_saphyr::from_str(content).map_err(|e| DagError::DslParseError(e.to_string()))
        }
        DslFormat::Json => {
            serde_json::from_str(content).map_err(|e| DagError::DslParseError(e.to_string()))
        }
        DslFormat::Toml => {
            // Go through serde_json::Value so untagged and flattened fields
            // see the same data model as the other formats.
            let toml_val: toml::Value =
                toml::from_str(content).map_err(|e| DagError::DslParseError(e.to_string()))?;
            let json_val = toml_value_to_json(toml_val);
            serde_json::from_value(json_val).map_err(|e| DagError::DslParseError(e.to_string()))
        }
    }
}

/// Read and parse a DSL file, picking the format from its extension.
pub fn load_dsl_file(path: impl AsRef<Path>) -> Result<DagSchema, DagError> {
    let path = path.as_ref();
    let format = DslFormat::from_path(path).ok_or_else(|| {
        DagError::DslParseError(format!("unrecognized DSL extension: {}", path.display()))
    })?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| DagError::DslParseError(format!("{}: {}", path.display(), e)))?;
    parse_dsl(&content, format)
}

/// Convert a [`toml::Value`] into a [`serde_json::Value`].
///
/// TOML has no null; datetimes are stringified.
fn toml_value_to_json(val: toml::Value) -> serde_json::Value {
    match val {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_value_to_json).collect())
        }
        toml::Value::Table(tbl) => {
            let map: serde_json::Map<String, serde_json::Value> = tbl
                .into_iter()
                .map(|(k, v)| (k, toml_value_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
    }
}
