use serde_json::{Map, Value};
use std::sync::Arc;

use crate::core::{EngineConfig, OutputNamespace};
use crate::domain::model::{Graph, Node};
use crate::dsl::{parse_dsl, DagSchema, DslFormat, ModuleSchema};
use crate::engine::{run_dag, RunOptions};
use crate::error::{DagError, DagResult};
use crate::graph::{normalize, ModuleRef, NodeSpec};
use crate::nodes::{CallKwargs, Module, ModuleFactoryRegistry, ModuleRegistry};

/// A graph of modules wired together and ready to run.
///
/// Construction normalizes the graph (inline instances move into the module
/// registry) and merges the extracted modules over the externally supplied
/// ones.
pub struct DagLayer {
    dag: Graph,
    registry: ModuleRegistry,
    config: EngineConfig,
}

impl DagLayer {
    pub fn new(graph: &[NodeSpec], modules: ModuleRegistry) -> Self {
        Self::with_config(graph, modules, EngineConfig::default())
    }

    pub fn with_config(graph: &[NodeSpec], modules: ModuleRegistry, config: EngineConfig) -> Self {
        let (dag, extracted) = normalize(graph);
        let registry = ModuleRegistry::assemble(modules, extracted);
        tracing::debug!(
            nodes = dag.len(),
            modules = registry.len(),
            "dag layer built"
        );
        DagLayer {
            dag,
            registry,
            config,
        }
    }

    pub fn builder(graph: Vec<NodeSpec>) -> DagLayerBuilder {
        DagLayerBuilder::new(graph)
    }

    /// Build from a parsed document, constructing every configured module with
    /// `factories`.
    pub fn from_schema(schema: DagSchema, factories: &ModuleFactoryRegistry) -> DagResult<Self> {
        let mut external = ModuleRegistry::new();
        for (name, config) in &schema.modules {
            let module = factories.create(&config.module_type, name, &config.params)?;
            external.register(name.clone(), module);
        }

        let mut graph: Vec<NodeSpec> = Vec::with_capacity(schema.dag.len());
        for (index, node) in schema.dag.into_iter().enumerate() {
            let module = match &node.module {
                ModuleSchema::Name(name) if name.is_empty() => {
                    return Err(DagError::InvalidNode {
                        index,
                        reason: "empty module name".into(),
                    })
                }
                ModuleSchema::Name(name) => ModuleRef::Name(name.clone()),
                ModuleSchema::Inline(config) => ModuleRef::Instance(factories.create(
                    &config.module_type,
                    config.identity_name(),
                    &config.params,
                )?),
            };
            graph.push(node.map_module(|_| module));
        }

        Ok(Self::with_config(&graph, external, schema.config))
    }

    pub fn from_dsl(
        content: &str,
        format: DslFormat,
        factories: &ModuleFactoryRegistry,
    ) -> DagResult<Self> {
        Self::from_schema(parse_dsl(content, format)?, factories)
    }

    /// The normalized, name-only graph.
    pub fn dag(&self) -> &Graph {
        &self.dag
    }

    /// Registered module names: external modules first, then those taken
    /// from the graph.
    pub fn module_names(&self) -> &[String] {
        self.registry.names()
    }

    pub fn module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.registry.get(name)
    }

    pub fn modules(&self) -> Vec<&Arc<dyn Module>> {
        self.registry.iter().map(|(_, module)| module).collect()
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Add or replace a module between runs.
    pub fn register_module(
        &mut self,
        name: impl Into<String>,
        module: Arc<dyn Module>,
    ) -> Option<Arc<dyn Module>> {
        self.registry.register(name, module)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Run the graph with explicit options.
    pub fn run_dag(
        &self,
        inputs: Map<String, Value>,
        options: &RunOptions,
    ) -> DagResult<OutputNamespace> {
        run_dag(&self.dag, &self.registry, inputs, options)
    }

    /// Run the graph with the configured verbosity, forwarding `kwargs` to
    /// every module.
    pub fn call(&self, inputs: Map<String, Value>, kwargs: CallKwargs) -> DagResult<OutputNamespace> {
        let options = RunOptions::from_config(&self.config).kwargs(kwargs);
        self.run_dag(inputs, &options)
    }
}

/// Builder for [`DagLayer`].
pub struct DagLayerBuilder {
    graph: Vec<NodeSpec>,
    modules: ModuleRegistry,
    config: EngineConfig,
}

impl DagLayerBuilder {
    pub fn new(graph: Vec<NodeSpec>) -> Self {
        DagLayerBuilder {
            graph,
            modules: ModuleRegistry::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn module(mut self, name: impl Into<String>, module: Arc<dyn Module>) -> Self {
        self.modules.register(name, module);
        self
    }

    pub fn modules(mut self, modules: ModuleRegistry) -> Self {
        self.modules.extend(modules);
        self
    }

    pub fn node(mut self, node: NodeSpec) -> Self {
        self.graph.push(node);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> DagLayer {
        DagLayer::with_config(&self.graph, self.modules, self.config)
    }
}

impl From<Vec<Node<ModuleRef>>> for DagLayerBuilder {
    fn from(graph: Vec<Node<ModuleRef>>) -> Self {
        DagLayerBuilder::new(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModuleResult;
    use crate::nodes::ModuleOutput;
    use serde_json::json;

    struct AddOne(&'static str);

    impl Module for AddOne {
        fn name(&self) -> &str {
            self.0
        }

        fn call(&self, inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
            let x = inputs[0].as_i64().unwrap_or_default();
            Ok(ModuleOutput::Single(json!(x + 1)))
        }
    }

    fn inputs(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_construction_exposes_graph_and_names() {
        let inline: Arc<dyn Module> = Arc::new(AddOne("second"));
        let layer = DagLayer::builder(vec![
            Node::new("first", ["inputs/x"]).with_outputs(["y"]),
            Node::new(Arc::clone(&inline), ["first/y"]).with_outputs(["y"]),
        ])
        .module("first", Arc::new(AddOne("first")))
        .build();

        assert_eq!(layer.module_names(), &["first".to_string(), "second".to_string()]);
        assert_eq!(layer.dag()[1].module, "second");
        assert!(Arc::ptr_eq(layer.module("second").unwrap(), &inline));
        assert_eq!(layer.modules().len(), 2);
    }

    #[test]
    fn test_inline_overrides_external_with_same_name() {
        let inline: Arc<dyn Module> = Arc::new(AddOne("enc"));
        let layer = DagLayer::builder(vec![Node::new(Arc::clone(&inline), ["inputs/x"])])
            .module("enc", Arc::new(AddOne("enc")))
            .build();

        assert_eq!(layer.module_names(), &["enc".to_string()]);
        assert!(Arc::ptr_eq(layer.module("enc").unwrap(), &inline));
    }

    #[test]
    fn test_call_runs_graph() {
        let layer = DagLayer::builder(vec![
            Node::new("inc", ["inputs/x"]).with_outputs(["y"]),
            Node::new("inc", ["inc/y"]).with_outputs(["y"]),
        ])
        .module("inc", Arc::new(AddOne("inc")))
        .build();

        let ns = layer.call(inputs(json!({"x": 1})), CallKwargs::new()).unwrap();

        assert_eq!(ns.lookup_str("out/y").unwrap(), &json!(3));
    }

    #[test]
    fn test_register_module_between_runs() {
        let mut layer = DagLayer::new(
            &[Node::new("late", ["inputs/x"])],
            ModuleRegistry::new(),
        );
        assert!(matches!(
            layer.call(inputs(json!({"x": 0})), CallKwargs::new()),
            Err(DagError::ModuleNotFound { .. })
        ));

        layer.register_module("late", Arc::new(AddOne("late")));
        let ns = layer.call(inputs(json!({"x": 0})), CallKwargs::new()).unwrap();
        assert_eq!(ns.lookup_str("late/output").unwrap(), &json!(1));
    }

    #[cfg(feature = "builtin-modules")]
    #[test]
    fn test_from_dsl_with_builtins() {
        let yaml = r#"
modules:
  double: {type: scale, factor: 2.0}
dag:
  - [double, [inputs/x], [y]]
  - module: {type: gain, name: amp, gain: 0.5}
    inputs: [double/y]
"#;
        let factories = ModuleFactoryRegistry::with_builtins();
        let layer = DagLayer::from_dsl(yaml, DslFormat::Yaml, &factories).unwrap();

        assert_eq!(layer.module_names(), &["double".to_string(), "amp".to_string()]);
        let ns = layer.call(inputs(json!({"x": [1.0, 2.0]})), CallKwargs::new()).unwrap();
        assert_eq!(ns.lookup_str("amp/signal").unwrap(), &json!([1.0, 2.0]));
        assert_eq!(ns.lookup_str("amp/controls/amplitudes").unwrap(), &json!([1.0, 2.0]));
    }

    #[cfg(feature = "builtin-modules")]
    #[test]
    fn test_module_names_follow_document_order() {
        let factories = ModuleFactoryRegistry::with_builtins();
        let yaml = r#"
modules:
  zeta: {type: scale}
  alpha: {type: add}
dag:
  - [{type: stats, name: summary}, [inputs/x]]
"#;
        let layer = DagLayer::from_dsl(yaml, DslFormat::Yaml, &factories).unwrap();
        assert_eq!(layer.module_names(), &["zeta", "alpha", "summary"]);

        let toml = r#"
[modules.zeta]
type = "scale"

[modules.alpha]
type = "add"

[[dag]]
module = "zeta"
inputs = ["inputs/x"]
"#;
        let layer = DagLayer::from_dsl(toml, DslFormat::Toml, &factories).unwrap();
        assert_eq!(layer.module_names(), &["zeta", "alpha"]);
    }

    #[test]
    fn test_from_dsl_unknown_type() {
        let json = r#"{"dag": [[{"type": "conv"}, ["inputs/x"]]]}"#;
        let err = DagLayer::from_dsl(json, DslFormat::Json, &ModuleFactoryRegistry::new())
            .err()
            .unwrap();
        assert!(matches!(err, DagError::UnknownModuleType(t) if t == "conv"));
    }

    #[test]
    fn test_from_dsl_empty_module_name() {
        let json = r#"{"dag": [["", ["inputs/x"]]]}"#;
        let err = DagLayer::from_dsl(json, DslFormat::Json, &ModuleFactoryRegistry::new())
            .err()
            .unwrap();
        assert!(matches!(err, DagError::InvalidNode { index: 0, .. }));
    }
}
