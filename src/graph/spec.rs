use std::fmt;
use std::sync::Arc;

use crate::domain::model::Node;
use crate::nodes::Module;

/// A node's module: either a registry name or a live instance given inline.
#[derive(Clone)]
pub enum ModuleRef {
    Name(String),
    Instance(Arc<dyn Module>),
}

impl ModuleRef {
    pub fn instance(module: impl Module + 'static) -> Self {
        ModuleRef::Instance(Arc::new(module))
    }

    /// The name this reference resolves to in a registry.
    pub fn name(&self) -> &str {
        match self {
            ModuleRef::Name(name) => name,
            ModuleRef::Instance(module) => module.name(),
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, ModuleRef::Instance(_))
    }
}

impl fmt::Debug for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleRef::Name(name) => f.debug_tuple("Name").field(name).finish(),
            ModuleRef::Instance(module) => f.debug_tuple("Instance").field(&module.name()).finish(),
        }
    }
}

impl From<&str> for ModuleRef {
    fn from(name: &str) -> Self {
        ModuleRef::Name(name.to_string())
    }
}

impl From<String> for ModuleRef {
    fn from(name: String) -> Self {
        ModuleRef::Name(name)
    }
}

impl From<Arc<dyn Module>> for ModuleRef {
    fn from(module: Arc<dyn Module>) -> Self {
        ModuleRef::Instance(module)
    }
}

/// A graph node that may still hold an inline module instance.
pub type NodeSpec = Node<ModuleRef>;

/// A graph specification as supplied by a caller.
pub type GraphSpec = Vec<NodeSpec>;
