//! Console logger implementation

use std::ffi::OsStr;
use std::sync::Arc;

use super::noop::NoOpLogger;
use super::traits::{Logger, SharedLogger};

/// Variable that switches host bindings to console logging
pub const VERBOSE_VAR: &str = "DOCKER_SECRETS_VERBOSE";

/// A logger that outputs to the console
///
/// Everything goes to stderr except `info`, which goes to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a new console logger with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "[docker-secrets]".to_string(),
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        eprintln!("{} DEBUG: {}", self.prefix, message);
    }

    fn info(&self, message: &str) {
        println!("{} INFO: {}", self.prefix, message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} WARN: {}", self.prefix, message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} ERROR: {}", self.prefix, message);
    }
}

/// Logger for host bindings: console when `DOCKER_SECRETS_VERBOSE` is set,
/// silent otherwise
pub fn logger_from_env() -> SharedLogger {
    if verbose_requested(std::env::var_os(VERBOSE_VAR).as_deref()) {
        Arc::new(ConsoleLogger::new())
    } else {
        Arc::new(NoOpLogger::new())
    }
}

/// Any value counts except empty, `0` and `false`
fn verbose_requested(value: Option<&OsStr>) -> bool {
    match value.and_then(OsStr::to_str) {
        Some(v) => !(v.is_empty() || v == "0" || v.eq_ignore_ascii_case("false")),
        None => value.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_prefix() {
        assert_eq!(ConsoleLogger::new().prefix(), "[docker-secrets]");
        assert_eq!(ConsoleLogger::with_prefix("[app]").prefix(), "[app]");
    }

    #[test]
    fn test_console_logger_logs() {
        let logger = ConsoleLogger::new();
        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");
    }

    #[test]
    fn test_verbose_requested() {
        assert!(!verbose_requested(None));
        assert!(!verbose_requested(Some(OsStr::new(""))));
        assert!(!verbose_requested(Some(OsStr::new("0"))));
        assert!(!verbose_requested(Some(OsStr::new("FALSE"))));
        assert!(verbose_requested(Some(OsStr::new("1"))));
        assert!(verbose_requested(Some(OsStr::new("true"))));
    }

    #[test]
    fn test_logger_from_env_logs() {
        let logger = logger_from_env();
        logger.debug("debug message");
        logger.info("info message");
    }
}
