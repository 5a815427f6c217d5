//! In-memory environment

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::Environment;

/// In-memory environment for testing and embedding
///
/// Stands in for the process environment so that loads can be asserted on
/// without touching global state. Internally synchronized.
///
/// # Example
///
/// ```
/// use docker_secrets_core::env::{Environment, MemoryEnvironment};
///
/// let environment = MemoryEnvironment::new();
/// environment.set("DB_PASSWORD", "hunter2");
/// assert_eq!(environment.get("DB_PASSWORD"), Some("hunter2".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnvironment {
    /// Create a new empty environment
    pub fn new() -> Self {
        Self {
            vars: RwLock::new(HashMap::new()),
        }
    }

    /// Create an environment with initial variables
    pub fn with_vars(initial: HashMap<String, String>) -> Self {
        Self {
            vars: RwLock::new(initial),
        }
    }

    /// Get the number of variables
    pub fn len(&self) -> usize {
        self.vars.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every variable currently set
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.vars.read().clone()
    }
}

impl Environment for MemoryEnvironment {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.vars.write().insert(key.to_string(), value.to_string());
    }
}

impl Clone for MemoryEnvironment {
    fn clone(&self) -> Self {
        Self::with_vars(self.snapshot())
    }
}
