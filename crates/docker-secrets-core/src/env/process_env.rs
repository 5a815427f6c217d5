//! Process environment

use std::env;

use super::traits::Environment;

/// Environment backed by the real process environment
///
/// No internal locking is done. Callers must not mutate the process
/// environment from other threads while secrets are being loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Create a handle to the process environment
    pub fn new() -> Self {
        Self
    }
}

impl Environment for ProcessEnvironment {
    fn name(&self) -> &str {
        "process"
    }

    fn get(&self, key: &str) -> Option<String> {
        // Non-unicode values are treated as unset
        env::var(key).ok()
    }

    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    fn set(&self, key: &str, value: &str) {
        env::set_var(key, value);
    }
}
