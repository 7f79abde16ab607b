//! The parameter and service registry.
//!
//! Assembly happens in two phases with distinct types:
//!
//! 1. [`ContainerBuilder`] — mutable; description files merge into it,
//!    factories and synthetic services register with it, and parameter
//!    reads resolve placeholders on demand.
//! 2. [`Container`] — produced by [`ContainerBuilder::compile`];
//!    immutable, fully resolved, services constructed once and shared.
//!
//! The builder is consumed by `compile`, so "mutation after
//! compilation" is unrepresentable rather than merely checked.

mod builder;
mod compiled;
mod registry;

pub use builder::ContainerBuilder;
pub use compiled::Container;
pub use registry::{
    FactoryRegistry, ResolvedArgument, ServiceFactory, ServiceObject, CONSOLE_LOGGER_CLASS,
};
