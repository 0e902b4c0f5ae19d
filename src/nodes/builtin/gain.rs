use serde_json::{Map, Value};
use std::sync::Arc;

use super::numeric::{map_unary, param_f64};
use crate::error::{ModuleError, ModuleResult};
use crate::nodes::{CallKwargs, Module, ModuleOutput, OutputMap, Processor};

/// Processor applying a fixed gain. Controls are `{amplitudes}`; the signal
/// is the amplitudes themselves.
pub struct Gain {
    name: String,
    gain: f64,
}

impl Gain {
    pub fn new(name: impl Into<String>, gain: f64) -> Self {
        Gain {
            name: name.into(),
            gain,
        }
    }

    pub fn from_params(name: &str, params: &Map<String, Value>) -> ModuleResult<Arc<dyn Module>> {
        Ok(Arc::new(Gain::new(name, param_f64(params, "gain", 1.0)?)))
    }
}

impl Module for Gain {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, inputs: &[Value], kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
        self.process(inputs, false, kwargs)
    }

    fn as_processor(&self) -> Option<&dyn Processor> {
        Some(self)
    }
}

impl Processor for Gain {
    fn get_controls(&self, inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<OutputMap> {
        let [x] = inputs else {
            return Err(ModuleError::exact_args(1, inputs.len()));
        };
        let gain = self.gain;
        let mut controls = OutputMap::new();
        controls.insert("amplitudes".into(), map_unary(x, &|v| v * gain)?);
        Ok(controls)
    }

    fn get_signal(&self, controls: &OutputMap) -> ModuleResult<Value> {
        controls
            .get("amplitudes")
            .cloned()
            .ok_or_else(|| ModuleError::ExecutionError("missing amplitudes control".into()))
    }
}
