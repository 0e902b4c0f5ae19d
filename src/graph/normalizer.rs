use crate::domain::model::Graph;
use crate::nodes::ModuleRegistry;

use super::spec::{ModuleRef, NodeSpec};

/// Separate topology from module instances.
///
/// Inline instances are recorded under their identity name and replaced by
/// that name; name references pass through. The returned graph has the same
/// nodes in the same order, and the registry holds exactly the instances that
/// were inline (a later instance with the same name replaces an earlier one).
pub fn normalize(graph: &[NodeSpec]) -> (Graph, ModuleRegistry) {
    let mut extracted = ModuleRegistry::new();
    let pure = graph
        .iter()
        .map(|node| {
            node.clone().map_module(|module| match module {
                ModuleRef::Name(name) => name,
                ModuleRef::Instance(instance) => {
                    let name = instance.name().to_string();
                    extracted.register(name.clone(), instance);
                    name
                }
            })
        })
        .collect();
    (pure, extracted)
}
