//! Modules, their capabilities, and the registries that hold them.
//!
//! - [`Module`]: the default call convention every module supports.
//! - [`Processor`] / [`Loss`]: optional capabilities that change dispatch.
//! - [`ModuleRegistry`]: name → module instance, used by the executor.
//! - [`ModuleFactoryRegistry`]: type string → factory, used when building
//!   modules from configuration.

#[cfg(feature = "builtin-modules")]
pub mod builtin;
pub mod factory;
pub mod module;
pub mod registry;

pub use factory::{ModuleFactory, ModuleFactoryRegistry};
pub use module::{
    capability_of, CallKwargs, Capability, Invocation, Loss, Module, ModuleOutput, OutputMap,
    Processor,
};
pub use registry::ModuleRegistry;
