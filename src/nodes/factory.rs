use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::Module;
use crate::error::{DagError, DagResult, ModuleResult};

/// Builds a module instance from its configuration parameters.
pub trait ModuleFactory: Send + Sync {
    fn create(&self, name: &str, params: &Map<String, Value>) -> ModuleResult<Arc<dyn Module>>;
}

impl<F> ModuleFactory for F
where
    F: Fn(&str, &Map<String, Value>) -> ModuleResult<Arc<dyn Module>> + Send + Sync,
{
    fn create(&self, name: &str, params: &Map<String, Value>) -> ModuleResult<Arc<dyn Module>> {
        self(name, params)
    }
}

/// Registry of module factories keyed by module type string.
pub struct ModuleFactoryRegistry {
    factories: HashMap<String, Arc<dyn ModuleFactory>>,
}

impl ModuleFactoryRegistry {
    /// An empty registry. Use [`ModuleFactoryRegistry::with_builtins`] for the
    /// bundled numeric modules.
    pub fn new() -> Self {
        ModuleFactoryRegistry {
            factories: HashMap::new(),
        }
    }

    #[cfg(feature = "builtin-modules")]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::builtin::register_builtins(&mut registry);
        registry
    }

    pub fn register(&mut self, module_type: &str, factory: Arc<dyn ModuleFactory>) {
        self.factories.insert(module_type.to_string(), factory);
    }

    pub fn get(&self, module_type: &str) -> Option<&dyn ModuleFactory> {
        self.factories.get(module_type).map(|f| f.as_ref())
    }

    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.factories.keys().cloned().collect();
        types.sort();
        types
    }

    /// Construct a module of `module_type` named `name`.
    pub fn create(
        &self,
        module_type: &str,
        name: &str,
        params: &Map<String, Value>,
    ) -> DagResult<Arc<dyn Module>> {
        let factory = self
            .get(module_type)
            .ok_or_else(|| DagError::UnknownModuleType(module_type.to_string()))?;
        factory
            .create(name, params)
            .map_err(|source| DagError::ModuleBuildError {
                name: name.to_string(),
                source,
            })
    }
}

impl Default for ModuleFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
