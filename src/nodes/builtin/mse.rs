use serde_json::{Map, Value};
use std::sync::Arc;

use super::numeric::{flatten, number, param_f64, zip_binary};
use crate::error::{ModuleError, ModuleResult};
use crate::nodes::{CallKwargs, Loss, Module, ModuleOutput, OutputMap};

/// Weighted mean squared error between a target and a prediction.
///
/// As a loss it reports `{"<name>_loss": value}`.
pub struct MeanSquaredError {
    name: String,
    weight: f64,
}

impl MeanSquaredError {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        MeanSquaredError {
            name: name.into(),
            weight,
        }
    }

    pub fn from_params(name: &str, params: &Map<String, Value>) -> ModuleResult<Arc<dyn Module>> {
        Ok(Arc::new(MeanSquaredError::new(
            name,
            param_f64(params, "weight", 1.0)?,
        )))
    }

    fn loss(&self, inputs: &[Value]) -> ModuleResult<Value> {
        let [target, prediction] = inputs else {
            return Err(ModuleError::exact_args(2, inputs.len()));
        };
        let squared = zip_binary(target, prediction, &|t, p| (t - p) * (t - p))?;
        let values = flatten(&squared)?;
        if values.is_empty() {
            return Err(ModuleError::ShapeMismatch("loss of an empty array".into()));
        }
        number(self.weight * values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl Module for MeanSquaredError {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
        self.loss(inputs).map(ModuleOutput::Single)
    }

    fn as_loss(&self) -> Option<&dyn Loss> {
        Some(self)
    }
}

impl Loss for MeanSquaredError {
    fn get_losses(&self, inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<OutputMap> {
        let mut losses = OutputMap::new();
        losses.insert(format!("{}_loss", self.name), self.loss(inputs)?);
        Ok(losses)
    }
}
