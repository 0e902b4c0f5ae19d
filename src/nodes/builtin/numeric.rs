//! Elementwise helpers over JSON numbers and (nested) numeric arrays.

use serde_json::{Map, Value};

use crate::error::{ModuleError, ModuleResult};

pub fn map_unary(value: &Value, f: &impl Fn(f64) -> f64) -> ModuleResult<Value> {
    match value {
        Value::Number(n) => number(f(as_f64(n)?)),
        Value::Array(items) => items
            .iter()
            .map(|item| map_unary(item, f))
            .collect::<ModuleResult<Vec<Value>>>()
            .map(Value::Array),
        other => Err(type_error(other)),
    }
}

/// Combine two values elementwise. A scalar broadcasts against an array;
/// two arrays must have equal length at every level.
pub fn zip_binary(a: &Value, b: &Value, f: &impl Fn(f64, f64) -> f64) -> ModuleResult<Value> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number(f(as_f64(x)?, as_f64(y)?)),
        (Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                return Err(ModuleError::ShapeMismatch(format!(
                    "lengths {} and {}",
                    xs.len(),
                    ys.len()
                )));
            }
            xs.iter()
                .zip(ys)
                .map(|(x, y)| zip_binary(x, y, f))
                .collect::<ModuleResult<Vec<Value>>>()
                .map(Value::Array)
        }
        (Value::Array(xs), scalar @ Value::Number(_)) => xs
            .iter()
            .map(|x| zip_binary(x, scalar, f))
            .collect::<ModuleResult<Vec<Value>>>()
            .map(Value::Array),
        (scalar @ Value::Number(_), Value::Array(ys)) => ys
            .iter()
            .map(|y| zip_binary(scalar, y, f))
            .collect::<ModuleResult<Vec<Value>>>()
            .map(Value::Array),
        (Value::Number(_), other) | (Value::Array(_), other) | (other, _) => Err(type_error(other)),
    }
}

/// All numbers in `value`, depth first.
pub fn flatten(value: &Value) -> ModuleResult<Vec<f64>> {
    let mut out = Vec::new();
    flatten_into(value, &mut out)?;
    Ok(out)
}

fn flatten_into(value: &Value, out: &mut Vec<f64>) -> ModuleResult<()> {
    match value {
        Value::Number(n) => out.push(as_f64(n)?),
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out)?;
            }
        }
        other => return Err(type_error(other)),
    }
    Ok(())
}

pub fn number(x: f64) -> ModuleResult<Value> {
    serde_json::Number::from_f64(x)
        .map(Value::Number)
        .ok_or_else(|| ModuleError::ExecutionError(format!("non-finite result {}", x)))
}

/// Read a float parameter, falling back to `default` when absent.
pub fn param_f64(params: &Map<String, Value>, key: &str, default: f64) -> ModuleResult<f64> {
    match params.get(key) {
        None => Ok(default),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| ModuleError::InvalidParameter(format!("{} must be a number", key))),
    }
}

fn as_f64(n: &serde_json::Number) -> ModuleResult<f64> {
    n.as_f64()
        .ok_or_else(|| ModuleError::TypeError(format!("{} is not representable as f64", n)))
}

fn type_error(value: &Value) -> ModuleError {
    ModuleError::TypeError(format!("expected number or numeric array, got {}", value))
}
