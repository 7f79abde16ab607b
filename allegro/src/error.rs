//! Error types for the Allegro bootstrap layer.
//!
//! The taxonomy is deliberately small and maps directly onto the failure
//! modes of the bootstrap sequence:
//!
//! - [`AllegroError::Configuration`] — the application root could not be
//!   located. This is a usage/setup error and is never wrapped.
//! - [`AllegroError::Initialization`] — anything that went wrong while
//!   loading description files or compiling the container. Fatal; the
//!   application should not start. Carries the underlying cause.
//! - [`AllegroError::UnknownParameter`] — a parameter name absent from the
//!   registry was requested. Programmer error.
//! - [`AllegroError::RuntimeFault`] — a recoverable-severity runtime
//!   condition promoted to an error by the [`crate::error_trap`] module.
//!
//! No component in this crate retries anything; retry policy belongs to
//! the hosting application.

use thiserror::Error;

use crate::error_trap::FaultSeverity;

/// Errors surfaced by the Allegro bootstrap layer.
#[derive(Debug, Error)]
pub enum AllegroError {
    /// The application root directory could not be located.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A description file failed to load, or the container failed to
    /// compile. The application must not start.
    #[error("Allegro initialization error ({message})")]
    Initialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A parameter name was requested that the registry does not contain.
    #[error("unknown container parameter '{0}'")]
    UnknownParameter(String),

    /// A recoverable runtime condition promoted to an error by the trap.
    #[error("{severity} at {file}:{line}: {message}")]
    RuntimeFault {
        severity: FaultSeverity,
        message: String,
        file: &'static str,
        line: u32,
    },
}

impl AllegroError {
    /// Builds an initialization error with an optional underlying cause.
    pub(crate) fn initialization(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        AllegroError::Initialization {
            message: message.into(),
            source,
        }
    }

    /// Wraps an arbitrary error into an initialization error.
    ///
    /// `Configuration` errors pass through untouched: a missing app root is
    /// a usage error, not a data error, and must stay distinguishable.
    /// Errors that are already `Initialization` are kept as-is.
    pub(crate) fn into_initialization(self, context: &str) -> Self {
        match self {
            AllegroError::Configuration(_) | AllegroError::Initialization { .. } => self,
            other => AllegroError::Initialization {
                message: format!("{context}: {other}"),
                source: Some(Box::new(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_display_carries_message() {
        let err = AllegroError::initialization("services.yml not found", None);
        assert_eq!(
            err.to_string(),
            "Allegro initialization error (services.yml not found)"
        );
    }

    #[test]
    fn test_initialization_preserves_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = AllegroError::initialization("could not read allegro.yml", Some(Box::new(io)));
        let source = std::error::Error::source(&err).expect("source should be kept");
        assert!(source.to_string().contains("no such file"));
    }

    #[test]
    fn test_configuration_is_never_wrapped() {
        let err = AllegroError::Configuration("app dir not found".to_string());
        let wrapped = err.into_initialization("loading config");
        assert!(matches!(wrapped, AllegroError::Configuration(_)));
    }

    #[test]
    fn test_unknown_parameter_wraps_into_initialization() {
        let err = AllegroError::UnknownParameter("db.host".to_string());
        let wrapped = err.into_initialization("compiling container");
        match wrapped {
            AllegroError::Initialization { message, source } => {
                assert!(message.contains("db.host"));
                assert!(source.is_some());
            }
            other => panic!("expected Initialization, got {other:?}"),
        }
    }
}
