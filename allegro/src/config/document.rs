//! Description-file document model.
//!
//! A description file is a YAML document with two optional top-level
//! mappings:
//!
//! ```yaml
//! parameters:
//!   app.name: billing
//!   db.dsn: "pgsql://%db.host%/billing"
//!
//! services:
//!   logger:
//!     class: console_logger
//!   mailer:
//!     class: smtp_mailer
//!     arguments: ["%app.name%", "@logger"]
//! ```
//!
//! Parameter values are arbitrary YAML trees whose strings may contain
//! placeholders (see [`crate::config::placeholder`]). Service arguments
//! are literals, `%param%` references, or `@service` references.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::AllegroError;

/// Parsed contents of one description file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigDocument {
    /// Parameter assignments, merged last-write-wins across files.
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,

    /// Service definitions, overridden whole-definition across files.
    #[serde(default)]
    pub services: BTreeMap<String, ServiceDefinition>,
}

/// Definition of one constructible service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDefinition {
    /// Factory name registered in the
    /// [`crate::container::FactoryRegistry`].
    pub class: String,

    /// Constructor arguments, in order.
    #[serde(default)]
    pub arguments: Vec<Value>,
}

/// A service argument after reference classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// A literal value; strings still go through placeholder resolution.
    Raw(Value),
    /// A reference to another service (`@name` in the file).
    Service(String),
}

impl Argument {
    /// Classifies one raw YAML argument value.
    pub fn classify(value: &Value) -> Argument {
        if let Value::String(text) = value {
            if let Some(name) = text.strip_prefix('@') {
                if !name.is_empty() {
                    return Argument::Service(name.to_string());
                }
            }
        }
        Argument::Raw(value.clone())
    }
}

impl ConfigDocument {
    /// Parses a YAML document.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        // An entirely empty file deserializes to no document at all;
        // treat it the same as `parameters: {} / services: {}`.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Reads and parses a description file from disk.
    pub fn load(path: &Path) -> Result<Self, AllegroError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AllegroError::initialization(
                format!("could not read config file '{}'", path.display()),
                Some(Box::new(e)),
            )
        })?;
        Self::parse(&text).map_err(|e| {
            AllegroError::initialization(
                format!("malformed config file '{}'", path.display()),
                Some(Box::new(e)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_parameters_and_services() {
        let doc = ConfigDocument::parse(
            "parameters:\n  app.name: billing\n  retries: 3\nservices:\n  logger:\n    class: console_logger\n  mailer:\n    class: smtp_mailer\n    arguments: ['%app.name%', '@logger']\n",
        )
        .unwrap();

        assert_eq!(doc.parameters["app.name"], Value::from("billing"));
        assert_eq!(doc.parameters["retries"], Value::from(3));
        assert_eq!(doc.services["logger"].class, "console_logger");
        assert!(doc.services["logger"].arguments.is_empty());
        assert_eq!(doc.services["mailer"].arguments.len(), 2);
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let doc = ConfigDocument::parse("").unwrap();
        assert!(doc.parameters.is_empty());
        assert!(doc.services.is_empty());

        let doc = ConfigDocument::parse("parameters: {}\n").unwrap();
        assert!(doc.services.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        assert!(ConfigDocument::parse("parameters: [not a mapping").is_err());
    }

    #[test]
    fn test_argument_classification() {
        assert_eq!(
            Argument::classify(&Value::from("@logger")),
            Argument::Service("logger".to_string())
        );
        assert_eq!(
            Argument::classify(&Value::from("%app.name%")),
            Argument::Raw(Value::from("%app.name%"))
        );
        assert_eq!(
            Argument::classify(&Value::from(42)),
            Argument::Raw(Value::from(42))
        );
        // A bare "@" is not a reference
        assert_eq!(
            Argument::classify(&Value::from("@")),
            Argument::Raw(Value::from("@"))
        );
    }

    #[test]
    fn test_load_missing_file_is_initialization_error() {
        let err = ConfigDocument::load(Path::new("/nonexistent/allegro.yml")).unwrap_err();
        assert!(matches!(err, AllegroError::Initialization { .. }));
    }
}
