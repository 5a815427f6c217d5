//! File-based settings (YAML)

use std::fs;
use std::path::Path;

use super::settings::SecretsConfig;

/// Errors that can occur while loading settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl SecretsConfig {
    /// Load settings from a YAML file
    ///
    /// A missing file yields the defaults. Unset fields fall back to their
    /// defaults. JSON is valid YAML, so JSON settings files load as well.
    ///
    /// ```yaml
    /// secrets_path: /var/run/app-secrets
    /// override_var: DEV_SECRETS
    /// directory_selection: require_single
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        // An empty document deserializes to null, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
