use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Module;

/// Name-indexed module registry.
///
/// Names keep their first-insertion order. Registering an existing name
/// replaces the module in place (last write wins).
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Arc<dyn Module>>,
    order: Vec<String>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under `name`, returning the module it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        module: Arc<dyn Module>,
    ) -> Option<Arc<dyn Module>> {
        let name = name.into();
        let previous = self.modules.insert(name.clone(), module);
        if previous.is_none() {
            self.order.push(name);
        }
        previous
    }

    /// Register a module under its own identity name.
    pub fn register_named(&mut self, module: Arc<dyn Module>) -> Option<Arc<dyn Module>> {
        let name = module.name().to_string();
        self.register(name, module)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Module>> {
        let removed = self.modules.remove(name)?;
        self.order.retain(|n| n != name);
        Some(removed)
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Module>)> {
        self.order
            .iter()
            .filter_map(|name| self.modules.get(name).map(|m| (name.as_str(), m)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Fold `other` into `self`; entries from `other` overwrite same-named ones.
    pub fn extend(&mut self, other: ModuleRegistry) {
        let ModuleRegistry { mut modules, order } = other;
        for name in order {
            if let Some(module) = modules.remove(&name) {
                self.register(name, module);
            }
        }
    }

    /// Union of externally supplied modules and modules extracted from a
    /// graph, merged external first so extracted entries win collisions.
    pub fn assemble(external: ModuleRegistry, extracted: ModuleRegistry) -> Self {
        let mut registry = external;
        for name in extracted.names() {
            if registry.contains(name) {
                tracing::debug!(module = %name, "graph module overrides external module");
            }
        }
        registry.extend(extracted);
        registry
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("names", &self.order)
            .finish()
    }
}

impl FromIterator<(String, Arc<dyn Module>)> for ModuleRegistry {
    fn from_iter<T: IntoIterator<Item = (String, Arc<dyn Module>)>>(iter: T) -> Self {
        let mut registry = ModuleRegistry::new();
        for (name, module) in iter {
            registry.register(name, module);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModuleResult;
    use crate::nodes::{CallKwargs, ModuleOutput};
    use serde_json::{json, Value};

    struct Const(&'static str, i64);

    impl Module for Const {
        fn name(&self) -> &str {
            self.0
        }

        fn call(&self, _inputs: &[Value], _kwargs: &CallKwargs) -> ModuleResult<ModuleOutput> {
            Ok(ModuleOutput::Single(json!(self.1)))
        }
    }

    fn value_of(registry: &ModuleRegistry, name: &str) -> Value {
        match registry
            .get(name)
            .unwrap()
            .call(&[], &CallKwargs::new())
            .unwrap()
        {
            ModuleOutput::Single(v) => v,
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = ModuleRegistry::new();
        registry.register("enc", Arc::new(Const("enc", 1)));

        assert!(registry.get("enc").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_register_overwrites_and_keeps_position() {
        let mut registry = ModuleRegistry::new();
        registry.register("a", Arc::new(Const("a", 1)));
        registry.register("b", Arc::new(Const("b", 2)));
        let previous = registry.register("a", Arc::new(Const("a", 3)));

        assert!(previous.is_some());
        assert_eq!(registry.names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(value_of(&registry, "a"), json!(3));
    }

    #[test]
    fn test_register_named_uses_identity_name() {
        let mut registry = ModuleRegistry::new();
        registry.register_named(Arc::new(Const("dec", 0)));
        assert!(registry.contains("dec"));
    }

    #[test]
    fn test_assemble_extracted_wins() {
        let external: ModuleRegistry = vec![
            ("enc".to_string(), Arc::new(Const("enc", 1)) as Arc<dyn Module>),
            ("dec".to_string(), Arc::new(Const("dec", 2)) as Arc<dyn Module>),
        ]
        .into_iter()
        .collect();
        let mut extracted = ModuleRegistry::new();
        extracted.register("dec", Arc::new(Const("dec", 20)));
        extracted.register("loss", Arc::new(Const("loss", 30)));

        let registry = ModuleRegistry::assemble(external, extracted);

        assert_eq!(
            registry.names(),
            &["enc".to_string(), "dec".to_string(), "loss".to_string()]
        );
        assert_eq!(value_of(&registry, "dec"), json!(20));
        assert_eq!(value_of(&registry, "enc"), json!(1));
    }

    #[test]
    fn test_remove() {
        let mut registry = ModuleRegistry::new();
        registry.register("a", Arc::new(Const("a", 1)));
        assert!(registry.remove("a").is_some());
        assert!(registry.is_empty());
        assert!(registry.remove("a").is_none());
    }
}
