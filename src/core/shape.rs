//! Shape summaries of values, for diagnostics only.

use serde_json::{Map, Value};

/// Summarize the structure of `value`: numbers become `[]`, rectangular
/// numeric arrays their dimension list, mappings a per-key summary, and
/// anything else its type name.
pub fn describe(value: &Value) -> Value {
    match value {
        Value::Number(_) | Value::Bool(_) => Value::Array(Vec::new()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), describe(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(_) => match dims(value) {
            Some(dims) => Value::Array(dims.into_iter().map(Value::from).collect()),
            None => Value::String("list".into()),
        },
        Value::String(_) => Value::String("str".into()),
        Value::Null => Value::String("none".into()),
    }
}

/// Describe a positional argument list.
pub fn describe_all(values: &[Value]) -> Value {
    Value::Array(values.iter().map(describe).collect())
}

fn dims(value: &Value) -> Option<Vec<usize>> {
    match value {
        Value::Number(_) | Value::Bool(_) => Some(Vec::new()),
        Value::Array(items) => {
            let mut inner: Option<Vec<usize>> = None;
            for item in items {
                let d = dims(item)?;
                match &inner {
                    None => inner = Some(d),
                    Some(prev) if *prev == d => {}
                    Some(_) => return None,
                }
            }
            let mut shape = vec![items.len()];
            shape.extend(inner.unwrap_or_default());
            Some(shape)
        }
        _ => None,
    }
}
