//! Accessor settings

use std::path::{PathBuf, MAIN_SEPARATOR_STR};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Conventional mount point where the runtime places secret files
pub static DEFAULT_SECRETS_PATH: Lazy<PathBuf> =
    Lazy::new(|| PathBuf::from(MAIN_SEPARATOR_STR).join("run").join("secrets"));

/// Variable whose value, when set, supplies secrets as inline JSON
pub const DEFAULT_OVERRIDE_VAR: &str = "LOCAL_SECRETS";

/// How a file is picked when the secrets path is a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectorySelection {
    /// Sort entries by file name and use the first
    #[default]
    FirstSorted,
    /// Fail unless the directory holds exactly one entry
    RequireSingle,
}

impl DirectorySelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectorySelection::FirstSorted => "first_sorted",
            DirectorySelection::RequireSingle => "require_single",
        }
    }
}

/// Settings for a `SecretsAccessor`
///
/// # Example
///
/// ```
/// use docker_secrets_core::config::{DirectorySelection, SecretsConfig};
///
/// let config = SecretsConfig::default()
///     .with_secrets_path("/var/run/app-secrets")
///     .with_directory_selection(DirectorySelection::RequireSingle);
/// assert_eq!(config.override_var, "LOCAL_SECRETS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// Location used when a call does not name one
    pub secrets_path: PathBuf,
    /// Override variable checked before the file system
    pub override_var: String,
    /// Directory tie-break policy
    pub directory_selection: DirectorySelection,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            secrets_path: DEFAULT_SECRETS_PATH.clone(),
            override_var: DEFAULT_OVERRIDE_VAR.to_string(),
            directory_selection: DirectorySelection::default(),
        }
    }
}

impl SecretsConfig {
    pub fn with_secrets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_path = path.into();
        self
    }

    pub fn with_override_var(mut self, name: impl Into<String>) -> Self {
        self.override_var = name.into();
        self
    }

    pub fn with_directory_selection(mut self, selection: DirectorySelection) -> Self {
        self.directory_selection = selection;
        self
    }
}
