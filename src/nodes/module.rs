use serde_json::{Map, Value};
use std::fmt;

use crate::error::ModuleResult;

/// A named output mapping produced by one node.
pub type OutputMap = Map<String, Value>;

/// Raw return value of a module invocation before it is shaped into an
/// [`OutputMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleOutput {
    /// One unlabeled value.
    Single(Value),
    /// An ordered tuple of unlabeled values.
    Tuple(Vec<Value>),
    /// Already labeled; node output keys are ignored.
    Mapping(OutputMap),
}

impl ModuleOutput {
    /// Number of values carried.
    pub fn arity(&self) -> usize {
        match self {
            ModuleOutput::Single(_) => 1,
            ModuleOutput::Tuple(values) => values.len(),
            ModuleOutput::Mapping(map) => map.len(),
        }
    }
}

impl From<Value> for ModuleOutput {
    fn from(value: Value) -> Self {
        ModuleOutput::Single(value)
    }
}

impl From<OutputMap> for ModuleOutput {
    fn from(map: OutputMap) -> Self {
        ModuleOutput::Mapping(map)
    }
}

/// Extra keyword arguments forwarded unchanged to every module in a run
/// (e.g. `training`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallKwargs(Map<String, Value>);

impl CallKwargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn training(&self) -> Option<bool> {
        self.get("training").and_then(Value::as_bool)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for CallKwargs {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A computational unit a node can invoke.
///
/// Every module supports the default call. A module may additionally expose
/// the processor or loss capability by returning `Some(self)` from the
/// matching accessor; the executor then uses that convention instead.
pub trait Module: Send + Sync {
    /// Identity name, used as the registry key when the module is given inline
    /// in a graph.
    fn name(&self) -> &str;

    /// Default call convention.
    fn call(&self, inputs: &[Value], kwargs: &CallKwargs) -> ModuleResult<ModuleOutput>;

    fn as_processor(&self) -> Option<&dyn Processor> {
        None
    }

    fn as_loss(&self) -> Option<&dyn Loss> {
        None
    }
}

/// Modules that turn inputs into named controls, then synthesize a primary
/// signal from those controls.
pub trait Processor {
    fn get_controls(&self, inputs: &[Value], kwargs: &CallKwargs) -> ModuleResult<OutputMap>;

    fn get_signal(&self, controls: &OutputMap) -> ModuleResult<Value>;

    /// Run controls then signal. With `return_outputs_dict` the result is
    /// `{"signal": .., "controls": {..}}`, otherwise the bare signal.
    fn process(
        &self,
        inputs: &[Value],
        return_outputs_dict: bool,
        kwargs: &CallKwargs,
    ) -> ModuleResult<ModuleOutput> {
        let controls = self.get_controls(inputs, kwargs)?;
        let signal = self.get_signal(&controls)?;
        if return_outputs_dict {
            let mut outputs = OutputMap::new();
            outputs.insert("signal".to_string(), signal);
            outputs.insert("controls".to_string(), Value::Object(controls));
            Ok(ModuleOutput::Mapping(outputs))
        } else {
            Ok(ModuleOutput::Single(signal))
        }
    }
}

/// Modules that produce a mapping of named scalar loss terms.
pub trait Loss {
    fn get_losses(&self, inputs: &[Value], kwargs: &CallKwargs) -> ModuleResult<OutputMap>;
}

/// The invocation convention selected for a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Processor,
    Loss,
    Default,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::Processor => "processor",
            Capability::Loss => "loss",
            Capability::Default => "default",
        };
        f.write_str(s)
    }
}

/// Dispatch target for one node, chosen processor > loss > default.
pub enum Invocation<'a> {
    Processor(&'a dyn Processor),
    Loss(&'a dyn Loss),
    Default(&'a dyn Module),
}

impl<'a> Invocation<'a> {
    pub fn select(module: &'a dyn Module) -> Self {
        if let Some(processor) = module.as_processor() {
            Invocation::Processor(processor)
        } else if let Some(loss) = module.as_loss() {
            Invocation::Loss(loss)
        } else {
            Invocation::Default(module)
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            Invocation::Processor(_) => Capability::Processor,
            Invocation::Loss(_) => Capability::Loss,
            Invocation::Default(_) => Capability::Default,
        }
    }

    pub fn invoke(&self, inputs: &[Value], kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
        match self {
            Invocation::Processor(processor) => processor.process(inputs, true, kwargs),
            Invocation::Loss(loss) => loss.get_losses(inputs, kwargs).map(ModuleOutput::Mapping),
            Invocation::Default(module) => module.call(inputs, kwargs),
        }
    }
}

/// Capability a module would be dispatched with.
pub fn capability_of(module: &dyn Module) -> Capability {
    Invocation::select(module).capability()
}
