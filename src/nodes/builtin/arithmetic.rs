use serde_json::{Map, Value};
use std::sync::Arc;

use super::numeric::{flatten, map_unary, number, param_f64, zip_binary};
use crate::error::{ModuleError, ModuleResult};
use crate::nodes::{CallKwargs, Module, ModuleOutput, OutputMap};

/// Multiplies its single input by `factor`.
pub struct Scale {
    name: String,
    factor: f64,
}

impl Scale {
    pub fn new(name: impl Into<String>, factor: f64) -> Self {
        Scale {
            name: name.into(),
            factor,
        }
    }

    pub fn from_params(name: &str, params: &Map<String, Value>) -> ModuleResult<Arc<dyn Module>> {
        Ok(Arc::new(Scale::new(name, param_f64(params, "factor", 1.0)?)))
    }
}

impl Module for Scale {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
        let [x] = inputs else {
            return Err(ModuleError::exact_args(1, inputs.len()));
        };
        let factor = self.factor;
        Ok(ModuleOutput::Single(map_unary(x, &|v| v * factor)?))
    }
}

/// Elementwise sum of all inputs.
pub struct Add {
    name: String,
}

impl Add {
    pub fn new(name: impl Into<String>) -> Self {
        Add { name: name.into() }
    }

    pub fn from_params(name: &str, _params: &Map<String, Value>) -> ModuleResult<Arc<dyn Module>> {
        Ok(Arc::new(Add::new(name)))
    }
}

impl Module for Add {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
        let (first, rest) = inputs
            .split_first()
            .ok_or_else(|| ModuleError::at_least_args(1, 0))?;
        let mut acc = first.clone();
        for value in rest {
            acc = zip_binary(&acc, value, &|a, b| a + b)?;
        }
        Ok(ModuleOutput::Single(acc))
    }
}

/// Splits an array into its first and second halves (the second half takes
/// the extra element of an odd-length array).
pub struct Split {
    name: String,
}

impl Split {
    pub fn new(name: impl Into<String>) -> Self {
        Split { name: name.into() }
    }

    pub fn from_params(name: &str, _params: &Map<String, Value>) -> ModuleResult<Arc<dyn Module>> {
        Ok(Arc::new(Split::new(name)))
    }
}

impl Module for Split {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
        let [x] = inputs else {
            return Err(ModuleError::exact_args(1, inputs.len()));
        };
        let items = x
            .as_array()
            .ok_or_else(|| ModuleError::TypeError(format!("split expects an array, got {}", x)))?;
        let (head, tail) = items.split_at(items.len() / 2);
        Ok(ModuleOutput::Tuple(vec![
            Value::Array(head.to_vec()),
            Value::Array(tail.to_vec()),
        ]))
    }
}

/// Summary statistics `{mean, max, min}` over every number in the input.
pub struct Stats {
    name: String,
}

impl Stats {
    pub fn new(name: impl Into<String>) -> Self {
        Stats { name: name.into() }
    }

    pub fn from_params(name: &str, _params: &Map<String, Value>) -> ModuleResult<Arc<dyn Module>> {
        Ok(Arc::new(Stats::new(name)))
    }
}

impl Module for Stats {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
        let [x] = inputs else {
            return Err(ModuleError::exact_args(1, inputs.len()));
        };
        let values = flatten(x)?;
        if values.is_empty() {
            return Err(ModuleError::ShapeMismatch("stats of an empty array".into()));
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);

        let mut out = OutputMap::new();
        out.insert("mean".into(), number(mean)?);
        out.insert("max".into(), number(max)?);
        out.insert("min".into(), number(min)?);
        Ok(ModuleOutput::Mapping(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kw() -> CallKwargs {
        CallKwargs::new()
    }

    #[test]
    fn test_scale() {
        let out = Scale::new("s", 2.0).call(&[json!([1.0, 1.5])], &kw()).unwrap();
        assert_eq!(out, ModuleOutput::Single(json!([2.0, 3.0])));
    }

    #[test]
    fn test_scale_argument_count() {
        let err = Scale::new("s", 2.0).call(&[], &kw()).unwrap_err();
        assert!(matches!(err, ModuleError::ArgumentCount { found: 0, .. }));
    }

    #[test]
    fn test_scale_from_params_default_factor() {
        let module = Scale::from_params("s", &Map::new()).unwrap();
        let out = module.call(&[json!(4.0)], &kw()).unwrap();
        assert_eq!(out, ModuleOutput::Single(json!(4.0)));
    }

    #[test]
    fn test_add() {
        let out = Add::new("a")
            .call(&[json!([1.0, 2.0]), json!([10.0, 20.0]), json!(0.5)], &kw())
            .unwrap();
        assert_eq!(out, ModuleOutput::Single(json!([11.5, 22.5])));
    }

    #[test]
    fn test_add_needs_input() {
        assert!(Add::new("a").call(&[], &kw()).is_err());
    }

    #[test]
    fn test_split_odd_length() {
        let out = Split::new("sp").call(&[json!([1, 2, 3])], &kw()).unwrap();
        assert_eq!(out, ModuleOutput::Tuple(vec![json!([1]), json!([2, 3])]));
    }

    #[test]
    fn test_stats() {
        let out = Stats::new("st").call(&[json!([1.0, 2.0, 6.0])], &kw()).unwrap();
        match out {
            ModuleOutput::Mapping(map) => {
                assert_eq!(Value::Object(map), json!({"mean": 3.0, "max": 6.0, "min": 1.0}));
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_stats_empty() {
        assert!(Stats::new("st").call(&[json!([])], &kw()).is_err());
    }
}
