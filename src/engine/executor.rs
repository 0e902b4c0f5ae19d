use serde_json::{Map, Value};
use std::sync::Arc;

use crate::core::compat::alias_inputs_at_root;
use crate::core::shape;
use crate::core::{EngineConfig, OutputNamespace, OUT_KEY};
use crate::domain::model::Node;
use crate::error::{DagError, DagResult};
use crate::nodes::{CallKwargs, Invocation, ModuleRegistry};

use super::result_shaping::to_mapping;

/// Per-run options.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Emit routing and shape diagnostics for every node.
    pub verbose: bool,
    /// Mirror raw input keys at the namespace root.
    pub input_aliases: bool,
    /// Forwarded to every module invocation.
    pub kwargs: CallKwargs,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl RunOptions {
    pub fn from_config(config: &EngineConfig) -> Self {
        RunOptions {
            verbose: config.verbose,
            input_aliases: config.input_aliases,
            kwargs: CallKwargs::new(),
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn kwargs(mut self, kwargs: CallKwargs) -> Self {
        self.kwargs = kwargs;
        self
    }
}

/// Run every node of `graph` once, in the given order.
///
/// Each node's inputs are resolved against the outputs accumulated so far,
/// its module is invoked with the convention matching its capability, and the
/// shaped outputs are stored under the node's module name. After the last
/// node, `out` aliases that node's outputs. The first failure aborts the run.
pub fn run_dag(
    graph: &[Node],
    registry: &ModuleRegistry,
    inputs: Map<String, Value>,
    options: &RunOptions,
) -> DagResult<OutputNamespace> {
    tracing::debug!(nodes = graph.len(), inputs = inputs.len(), "running dag");

    let mut namespace = if options.input_aliases {
        let mut namespace = OutputNamespace::new(inputs.clone());
        alias_inputs_at_root(&mut namespace, &inputs);
        namespace
    } else {
        OutputNamespace::new(inputs)
    };

    let mut last: Option<Arc<Value>> = None;
    for (index, node) in graph.iter().enumerate() {
        let name = node.module.as_str();
        let module = registry.get(name).ok_or_else(|| DagError::ModuleNotFound {
            node_index: index,
            name: name.to_string(),
        })?;

        let args = node
            .inputs
            .iter()
            .map(|key| {
                namespace
                    .lookup(key)
                    .cloned()
                    .map_err(|e| DagError::key_not_found(name, e))
            })
            .collect::<DagResult<Vec<Value>>>()?;

        let invocation = Invocation::select(module.as_ref());
        tracing::trace!(node = index, module = %name, capability = %invocation.capability(), "invoking");

        if options.verbose {
            let keys: Vec<String> = node.inputs.iter().map(|k| k.to_string()).collect();
            tracing::info!(
                module = %name,
                keys = ?keys,
                shapes = %shape::describe_all(&args),
                "input to module"
            );
        }

        let raw = invocation
            .invoke(&args, &options.kwargs)
            .map_err(|source| DagError::ModuleError {
                node: name.to_string(),
                source,
            })?;
        let outputs = to_mapping(name, raw, node.outputs.as_deref())?;

        if options.verbose {
            let summary = Value::Object(
                outputs
                    .iter()
                    .map(|(k, v)| (k.clone(), shape::describe(v)))
                    .collect(),
            );
            tracing::info!(module = %name, shapes = %summary, "output from module");
        }

        last = Some(namespace.set_node_outputs(name, outputs));
    }

    if let Some(last) = last {
        namespace.insert(OUT_KEY, last);
    }

    tracing::debug!(entries = namespace.len(), "dag finished");
    Ok(namespace)
}
