//! Logging abstractions
//!
//! - `Logger` trait injected into `SecretsAccessor`
//! - `file_logger`: opt-in global debug file

mod traits;
mod noop;
mod console;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::{logger_from_env, ConsoleLogger, VERBOSE_VAR};

pub use file_logger::{log_file_path, LogLevel};
