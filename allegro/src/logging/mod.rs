//! Application-facing logging.
//!
//! Two distinct concerns live here:
//!
//! - The [`Logger`] trait and its always-available [`ConsoleLogger`]
//!   implementation, plus the [`LoggerFacade`] that resolves the
//!   configured `logger` service with a one-time fallback. This is the
//!   logging surface hosted applications use.
//! - [`init_tracing`], which wires the crate's own `tracing`
//!   diagnostics to stderr with an `RUST_LOG`-style filter. Purely
//!   internal plumbing, kept separate from the application logger.

mod console;
mod facade;

use std::any::type_name;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use console::ConsoleLogger;
pub use facade::LoggerFacade;

/// Canonical name of the configured logging service.
pub const LOGGER_SERVICE: &str = "logger";

/// Log severity levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl LogLevel {
    /// The lowercase level name.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Alert => "alert",
            LogLevel::Emergency => "emergency",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional structured context attached to a log call.
///
/// Currently carries at most an associated error, whose summary and
/// cause chain the logger appends to the formatted line.
#[derive(Default)]
pub struct LogContext {
    error: Option<ContextError>,
}

struct ContextError {
    kind: &'static str,
    inner: Box<dyn Error + Send + Sync>,
}

impl LogContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context carrying `error`, remembering its concrete type name.
    pub fn with_error<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self {
            error: Some(ContextError {
                kind: type_name::<E>(),
                inner: Box::new(error),
            }),
        }
    }

    /// The attached error, as (type name, error), when present.
    pub fn error(&self) -> Option<(&'static str, &(dyn Error + 'static))> {
        self.error
            .as_ref()
            .map(|e| (e.kind, e.inner.as_ref() as &(dyn Error + 'static)))
    }
}

/// The logging interface hosted applications program against.
pub trait Logger: Send + Sync {
    /// Logs with an arbitrary level.
    fn log(&self, level: LogLevel, message: &str, context: &LogContext);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, &LogContext::new());
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, &LogContext::new());
    }

    fn notice(&self, message: &str) {
        self.log(LogLevel::Notice, message, &LogContext::new());
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message, &LogContext::new());
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, &LogContext::new());
    }

    fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message, &LogContext::new());
    }
}

/// Container wrapper for logger services.
///
/// Services are stored type-erased; factories producing loggers wrap
/// them in this newtype so the facade can recover an `Arc<dyn Logger>`
/// with a single downcast.
pub struct LoggerService {
    inner: Arc<dyn Logger>,
}

impl LoggerService {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { inner: logger }
    }

    /// A shared handle to the wrapped logger.
    pub fn logger(&self) -> Arc<dyn Logger> {
        self.inner.clone()
    }
}

/// Initializes the crate's internal `tracing` subscriber: stderr output,
/// `RUST_LOG` filtering, `info` by default. Idempotent; a subscriber
/// already installed by the host wins.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::Info.as_str(), "info");
        assert_eq!(LogLevel::Emergency.to_string(), "emergency");
        assert!(LogLevel::Debug < LogLevel::Warning);
    }

    #[test]
    fn test_context_remembers_error_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let context = LogContext::with_error(io);
        let (kind, error) = context.error().unwrap();
        assert!(kind.contains("io::error"));
        assert_eq!(error.to_string(), "disk on fire");
    }

    #[test]
    fn test_empty_context_has_no_error() {
        assert!(LogContext::new().error().is_none());
    }
}
