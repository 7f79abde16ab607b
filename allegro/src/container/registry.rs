//! Service factories and resolved constructor arguments.
//!
//! Rust has no runtime class loading, so the `class` field of a service
//! definition names a factory registered here instead. A factory
//! receives its arguments fully resolved: parameter placeholders
//! substituted and `@service` references replaced by the constructed
//! dependency.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use serde_yaml::Value;

use crate::error::AllegroError;
use crate::logging::{ConsoleLogger, LoggerService};

/// A constructed service held by the container.
pub type ServiceObject = Arc<dyn Any + Send + Sync>;

/// Factory name bound to [`ConsoleLogger`] out of the box.
pub const CONSOLE_LOGGER_CLASS: &str = "console_logger";

/// One fully resolved constructor argument.
#[derive(Clone)]
pub enum ResolvedArgument {
    /// A literal value with all placeholders substituted.
    Value(Value),
    /// A constructed service dependency.
    Service(ServiceObject),
}

impl ResolvedArgument {
    /// The literal value, when this argument is one.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ResolvedArgument::Value(value) => Some(value),
            ResolvedArgument::Service(_) => None,
        }
    }

    /// The literal value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    /// The literal value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(Value::as_bool)
    }

    /// The literal value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.value().and_then(Value::as_i64)
    }

    /// The service dependency downcast to its concrete type.
    pub fn service<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        match self {
            ResolvedArgument::Service(object) => object.clone().downcast::<T>().ok(),
            ResolvedArgument::Value(_) => None,
        }
    }
}

/// Constructor signature for registered service classes.
pub type ServiceFactory =
    Box<dyn Fn(&[ResolvedArgument]) -> Result<ServiceObject, AllegroError> + Send + Sync>;

/// Mapping of service class names to factories.
pub struct FactoryRegistry {
    factories: HashMap<String, ServiceFactory>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in factories: currently just
    /// [`CONSOLE_LOGGER_CLASS`], which the vendored service definitions
    /// bind to the `logger` service.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(CONSOLE_LOGGER_CLASS, |args| {
            let force_stderr = args
                .first()
                .and_then(ResolvedArgument::as_bool)
                .unwrap_or(false);
            let logger = ConsoleLogger::new().with_force_stderr(force_stderr);
            Ok(Arc::new(LoggerService::new(Arc::new(logger))))
        });
        registry
    }

    /// Registers (or replaces) a factory for `class`.
    pub fn register<F>(&mut self, class: impl Into<String>, factory: F)
    where
        F: Fn(&[ResolvedArgument]) -> Result<ServiceObject, AllegroError> + Send + Sync + 'static,
    {
        self.factories.insert(class.into(), Box::new(factory));
    }

    /// Looks up the factory for `class`.
    pub(crate) fn get(&self, class: &str) -> Option<&ServiceFactory> {
        self.factories.get(class)
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_console_logger() {
        let registry = FactoryRegistry::with_defaults();
        let factory = registry.get(CONSOLE_LOGGER_CLASS).unwrap();
        let object = factory(&[]).unwrap();
        assert!(object.downcast::<LoggerService>().is_ok());
    }

    #[test]
    fn test_registered_factory_replaces_default() {
        struct Marker;
        let mut registry = FactoryRegistry::with_defaults();
        registry.register(CONSOLE_LOGGER_CLASS, |_| Ok(Arc::new(Marker)));
        let object = registry.get(CONSOLE_LOGGER_CLASS).unwrap()(&[]).unwrap();
        assert!(object.downcast::<Marker>().is_ok());
    }

    #[test]
    fn test_resolved_argument_accessors() {
        let arg = ResolvedArgument::Value(Value::from("hello"));
        assert_eq!(arg.as_str(), Some("hello"));
        assert_eq!(arg.as_bool(), None);

        let arg = ResolvedArgument::Value(Value::from(true));
        assert_eq!(arg.as_bool(), Some(true));

        let arg = ResolvedArgument::Service(Arc::new(7u32) as ServiceObject);
        assert_eq!(arg.value(), None);
        assert_eq!(*arg.service::<u32>().unwrap(), 7);
        assert!(arg.service::<String>().is_none());
    }
}
