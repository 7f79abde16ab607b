//! The minimal always-available logger.
//!
//! `ConsoleLogger` is what applications get before the configured
//! logging service exists, and what they fall back to if it never
//! materializes. It writes plain lines: informational messages go out
//! unprefixed to keep normal output uncluttered, every other level is
//! prefixed with its uppercased name.
//!
//! Stream routing: debug, info and notice go to stdout, warning and
//! above to stderr. The force-to-stderr mode sends everything to
//! stderr regardless of level, for programs whose stdout is reserved
//! for structured data. The force flag always wins.

use crate::logging::{LogContext, LogLevel, Logger};

/// Dual-stream fallback logger.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger {
    force_stderr: bool,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes every level to stderr when `force` is set.
    pub fn with_force_stderr(mut self, force: bool) -> Self {
        self.force_stderr = force;
        self
    }

    fn routes_to_stderr(&self, level: LogLevel) -> bool {
        if self.force_stderr {
            return true;
        }
        !matches!(level, LogLevel::Debug | LogLevel::Info | LogLevel::Notice)
    }

    fn format_line(level: LogLevel, message: &str, context: &LogContext) -> String {
        let mut line = String::new();
        if level != LogLevel::Info {
            line.push_str(&level.as_str().to_uppercase());
            line.push(' ');
        }
        line.push_str(message);
        if let Some((kind, error)) = context.error() {
            line.push_str(&format!(" [{kind}: {error}]"));
            let mut cause = error.source();
            while let Some(c) = cause {
                line.push_str(&format!("\n  caused by: {c}"));
                cause = c.source();
            }
        }
        line.push('\n');
        line
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        let line = Self::format_line(level, message, context);
        if self.routes_to_stderr(level) {
            eprint!("{line}");
        } else {
            print!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AllegroError;

    #[test]
    fn test_info_line_has_no_prefix() {
        let line = ConsoleLogger::format_line(LogLevel::Info, "hello", &LogContext::new());
        assert_eq!(line, "hello\n");
    }

    #[test]
    fn test_other_levels_are_prefixed_uppercase() {
        let line = ConsoleLogger::format_line(LogLevel::Error, "boom", &LogContext::new());
        assert_eq!(line, "ERROR boom\n");
        let line = ConsoleLogger::format_line(LogLevel::Notice, "heads up", &LogContext::new());
        assert_eq!(line, "NOTICE heads up\n");
    }

    #[test]
    fn test_error_context_appends_summary_and_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no services.yml");
        let err = AllegroError::initialization("could not load config", Some(Box::new(io)));
        let line = ConsoleLogger::format_line(
            LogLevel::Warning,
            "startup degraded",
            &LogContext::with_error(err),
        );
        let mut lines = line.lines();
        let first = lines.next().unwrap();
        assert!(first.starts_with("WARNING startup degraded ["));
        assert!(first.contains("AllegroError"));
        assert!(first.contains("could not load config"));
        assert_eq!(lines.next().unwrap(), "  caused by: no services.yml");
    }

    #[test]
    fn test_default_routing_splits_by_level() {
        let logger = ConsoleLogger::new();
        assert!(!logger.routes_to_stderr(LogLevel::Debug));
        assert!(!logger.routes_to_stderr(LogLevel::Info));
        assert!(!logger.routes_to_stderr(LogLevel::Notice));
        assert!(logger.routes_to_stderr(LogLevel::Warning));
        assert!(logger.routes_to_stderr(LogLevel::Error));
        assert!(logger.routes_to_stderr(LogLevel::Emergency));
    }

    #[test]
    fn test_force_stderr_overrides_level_routing() {
        let logger = ConsoleLogger::new().with_force_stderr(true);
        assert!(logger.routes_to_stderr(LogLevel::Debug));
        assert!(logger.routes_to_stderr(LogLevel::Info));
        assert!(logger.routes_to_stderr(LogLevel::Error));
    }
}
