//! Lazy logger resolution with one-time fallback.
//!
//! An application should never crash merely because its diagnostic sink
//! is misconfigured. The facade takes the result of looking up the
//! configured logger service and, on any failure, substitutes a
//! [`ConsoleLogger`] — announcing the substitution exactly once for the
//! life of the facade so a perpetually broken logger cannot cause a
//! warning storm.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::AllegroError;
use crate::logging::{ConsoleLogger, LogContext, LogLevel, Logger};

/// One-shot fallback state for logger resolution.
#[derive(Default)]
pub struct LoggerFacade {
    fallback_announced: AtomicBool,
}

impl LoggerFacade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns a logger lookup result into a usable logger, substituting
    /// a [`ConsoleLogger`] on failure.
    pub fn resolve(&self, lookup: Result<Arc<dyn Logger>, AllegroError>) -> Arc<dyn Logger> {
        self.resolve_with(lookup, || Arc::new(ConsoleLogger::new()))
    }

    /// Like [`resolve`](Self::resolve) with an explicit fallback
    /// constructor. The first failure emits one warning through the
    /// fallback, carrying the original error as context; later failures
    /// substitute silently.
    pub fn resolve_with<F>(
        &self,
        lookup: Result<Arc<dyn Logger>, AllegroError>,
        fallback: F,
    ) -> Arc<dyn Logger>
    where
        F: FnOnce() -> Arc<dyn Logger>,
    {
        match lookup {
            Ok(logger) => logger,
            Err(cause) => {
                let logger = fallback();
                if !self.fallback_announced.swap(true, Ordering::SeqCst) {
                    logger.log(
                        LogLevel::Warning,
                        "Original logger initialization failed, falling back to ConsoleLogger.",
                        &LogContext::with_error(cause),
                    );
                }
                logger
            }
        }
    }

    /// Whether the fallback warning has already been emitted.
    pub fn fallback_announced(&self) -> bool {
        self.fallback_announced.load(Ordering::SeqCst)
    }
}
