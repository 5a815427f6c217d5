//! Accessor configuration
//!
//! - `SecretsConfig`: default location, override variable, directory policy
//! - YAML loading via `SecretsConfig::from_file`

mod settings;
mod file;

pub use settings::{DirectorySelection, SecretsConfig, DEFAULT_OVERRIDE_VAR, DEFAULT_SECRETS_PATH};
pub use file::{ConfigError, ConfigResult};
