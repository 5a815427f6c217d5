//! Environment trait definition

use std::env::VarError;
use std::sync::Arc;

/// Key/value environment that secrets are read from and written into
///
/// Implementations only ever add or overwrite keys. Nothing in this crate
/// removes a variable.
pub trait Environment: Send + Sync {
    /// Human-readable name of this environment
    fn name(&self) -> &str;

    /// Read a variable, `None` when unset
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable, overwriting any existing value
    fn set(&self, key: &str, value: &str);

    /// Read a variable, telling "unset" apart from "set but not unicode"
    ///
    /// Environments that only ever hold strings can keep the default.
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.get(key).ok_or(VarError::NotPresent)
    }

    /// Check if a variable is set
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Type alias for an Arc-wrapped environment
pub type SharedEnvironment = Arc<dyn Environment>;

/// Check that a pair can be stored as an environment variable
///
/// Names must be non-empty and free of `=` and NUL; values must be free of
/// NUL. `std::env::set_var` panics on anything else.
pub fn validate_var(key: &str, value: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("empty name cannot be used as an environment variable".to_string());
    }
    if key.contains('=') || key.contains('\0') {
        return Err(format!("name '{}' cannot be used as an environment variable", key.escape_debug()));
    }
    if value.contains('\0') {
        return Err(format!("value of '{}' contains a NUL byte", key.escape_debug()));
    }
    Ok(())
}
