//! The mutable registry accumulating configuration before compilation.

use std::collections::{HashMap, HashSet};

use serde_yaml::Value;

use crate::config::placeholder;
use crate::config::{Argument, ConfigDocument, ServiceDefinition};
use crate::container::compiled::Container;
use crate::container::registry::{FactoryRegistry, ResolvedArgument, ServiceObject};
use crate::error::AllegroError;

/// Accumulates parameters, service definitions and factories, then
/// compiles them into an immutable [`Container`].
///
/// `compile` consumes the builder, so mutation after compilation is
/// impossible by construction.
pub struct ContainerBuilder {
    parameters: HashMap<String, Value>,
    definitions: HashMap<String, ServiceDefinition>,
    synthetic: HashMap<String, ServiceObject>,
    factories: FactoryRegistry,
}

impl ContainerBuilder {
    /// Creates a builder with the default factory registry.
    pub fn new() -> Self {
        Self {
            parameters: HashMap::new(),
            definitions: HashMap::new(),
            synthetic: HashMap::new(),
            factories: FactoryRegistry::with_defaults(),
        }
    }

    /// Sets a parameter, overriding any earlier value.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(name.into(), value.into());
    }

    /// Returns a parameter value, resolving placeholders on demand
    /// against the current parameters and the live environment.
    pub fn get_parameter(&self, name: &str) -> Result<Value, AllegroError> {
        let value = self
            .parameters
            .get(name)
            .ok_or_else(|| AllegroError::UnknownParameter(name.to_string()))?;
        placeholder::resolve_value(value, &self.parameters, 0)
    }

    /// Returns whether a parameter has been set.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Merges one description file into the registry. Later documents
    /// win for both parameters and whole service definitions.
    pub fn merge_document(&mut self, document: ConfigDocument) {
        for (name, value) in document.parameters {
            self.parameters.insert(name, value);
        }
        for (name, definition) in document.services {
            self.definitions.insert(name, definition);
        }
    }

    /// Registers (or replaces) a factory for a service class.
    pub fn register_factory<F>(&mut self, class: impl Into<String>, factory: F)
    where
        F: Fn(&[ResolvedArgument]) -> Result<ServiceObject, AllegroError> + Send + Sync + 'static,
    {
        self.factories.register(class, factory);
    }

    /// Registers a pre-built (synthetic) service under `name`.
    ///
    /// Synthetic services participate in `@service` argument resolution
    /// and shadow any definition of the same name.
    pub fn register_service(&mut self, name: impl Into<String>, object: ServiceObject) {
        let name = name.into();
        self.definitions.remove(&name);
        self.synthetic.insert(name, object);
    }

    /// Compiles the registry: resolves all placeholders permanently,
    /// validates service references, and constructs every defined
    /// service in dependency order. Reference cycles, unknown services,
    /// unknown classes and unresolvable placeholders are all
    /// initialization errors.
    pub fn compile(self) -> Result<Container, AllegroError> {
        let ContainerBuilder {
            parameters,
            definitions,
            synthetic,
            factories,
        } = self;

        let mut resolved_parameters = HashMap::with_capacity(parameters.len());
        for (name, value) in &parameters {
            let resolved = placeholder::resolve_value(value, &parameters, 0)
                .map_err(|e| e.into_initialization(&format!("resolving parameter '{name}'")))?;
            resolved_parameters.insert(name.clone(), resolved);
        }

        let mut services = synthetic;
        let mut visiting = HashSet::new();
        let mut names: Vec<&String> = definitions.keys().collect();
        names.sort(); // deterministic construction and error order
        for name in names {
            build_service(
                name,
                None,
                &definitions,
                &factories,
                &resolved_parameters,
                &mut services,
                &mut visiting,
            )?;
        }
        tracing::debug!(
            services = services.len(),
            parameters = resolved_parameters.len(),
            "container compiled"
        );

        Ok(Container::new(resolved_parameters, services))
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn build_service(
    name: &str,
    requested_by: Option<&str>,
    definitions: &HashMap<String, ServiceDefinition>,
    factories: &FactoryRegistry,
    parameters: &HashMap<String, Value>,
    services: &mut HashMap<String, ServiceObject>,
    visiting: &mut HashSet<String>,
) -> Result<ServiceObject, AllegroError> {
    if let Some(existing) = services.get(name) {
        return Ok(existing.clone());
    }
    let Some(definition) = definitions.get(name) else {
        let message = match requested_by {
            Some(parent) => format!("service '{parent}' references unknown service '{name}'"),
            None => format!("service '{name}' is not defined"),
        };
        return Err(AllegroError::initialization(message, None));
    };
    if !visiting.insert(name.to_string()) {
        return Err(AllegroError::initialization(
            format!("circular service dependency involving '{name}'"),
            None,
        ));
    }

    let mut arguments = Vec::with_capacity(definition.arguments.len());
    for raw in &definition.arguments {
        match Argument::classify(raw) {
            Argument::Service(dependency) => {
                let object = build_service(
                    &dependency,
                    Some(name),
                    definitions,
                    factories,
                    parameters,
                    services,
                    visiting,
                )?;
                arguments.push(ResolvedArgument::Service(object));
            }
            Argument::Raw(value) => {
                let resolved = placeholder::resolve_value(&value, parameters, 0).map_err(|e| {
                    e.into_initialization(&format!("resolving arguments of service '{name}'"))
                })?;
                arguments.push(ResolvedArgument::Value(resolved));
            }
        }
    }

    let factory = factories.get(&definition.class).ok_or_else(|| {
        AllegroError::initialization(
            format!(
                "unknown service class '{}' for service '{name}'",
                definition.class
            ),
            None,
        )
    })?;
    let object = factory(&arguments)
        .map_err(|e| e.into_initialization(&format!("constructing service '{name}'")))?;

    visiting.remove(name);
    services.insert(name.to_string(), object.clone());
    Ok(object)
}
