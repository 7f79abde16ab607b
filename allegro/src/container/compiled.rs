//! The compiled, immutable container.

use std::collections::HashMap;
use std::sync::Arc;

use serde_yaml::Value;

use crate::container::registry::ServiceObject;
use crate::error::AllegroError;

/// The compiled registry of parameters and constructed services.
///
/// Produced by [`crate::container::ContainerBuilder::compile`]; read-only
/// thereafter. Parameter values are fully resolved literals and service
/// objects are shared (`Arc`), so the container is safe for
/// unsynchronized concurrent reads.
pub struct Container {
    parameters: HashMap<String, Value>,
    services: HashMap<String, ServiceObject>,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("parameters", &self.parameters)
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Container {
    pub(crate) fn new(
        parameters: HashMap<String, Value>,
        services: HashMap<String, ServiceObject>,
    ) -> Self {
        Self {
            parameters,
            services,
        }
    }

    /// Returns a parameter value. Values are fully resolved at compile
    /// time and returned as-is.
    pub fn get_parameter(&self, name: &str) -> Result<&Value, AllegroError> {
        self.parameters
            .get(name)
            .ok_or_else(|| AllegroError::UnknownParameter(name.to_string()))
    }

    /// Returns whether a parameter is present.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Returns a shared handle to a constructed service.
    pub fn get_service(&self, name: &str) -> Result<ServiceObject, AllegroError> {
        self.services.get(name).cloned().ok_or_else(|| {
            AllegroError::initialization(format!("service '{name}' is not registered"), None)
        })
    }

    /// Returns a service downcast to its concrete type.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, AllegroError> {
        self.get_service(name)?.downcast::<T>().map_err(|_| {
            AllegroError::initialization(
                format!("service '{name}' is not of the requested type"),
                None,
            )
        })
    }

    /// Returns whether a service is present.
    pub fn has_service(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container_with(name: &str, object: ServiceObject) -> Container {
        let mut parameters = HashMap::new();
        parameters.insert("app.name".to_string(), Value::from("billing"));
        let mut services = HashMap::new();
        services.insert(name.to_string(), object);
        Container::new(parameters, services)
    }

    #[test]
    fn test_parameter_lookup() {
        let container = container_with("thing", Arc::new(1u8) as ServiceObject);
        assert_eq!(
            container.get_parameter("app.name").unwrap(),
            &Value::from("billing")
        );
        assert!(matches!(
            container.get_parameter("absent").unwrap_err(),
            AllegroError::UnknownParameter(name) if name == "absent"
        ));
    }

    #[test]
    fn test_typed_service_lookup() {
        let container = container_with("counter", Arc::new(41u32) as ServiceObject);
        assert_eq!(*container.get::<u32>("counter").unwrap(), 41);
        assert!(container.get::<String>("counter").is_err());
        assert!(container.get::<u32>("absent").is_err());
        assert!(container.has_service("counter"));
        assert!(!container.has_service("absent"));
    }
}
