//! docker-secrets core
//!
//! Reads secrets that a container runtime exposes to a process, either as a
//! JSON file under a mount point (`/run/secrets` by default) or inline
//! through the `LOCAL_SECRETS` variable, and applies them to the
//! environment. Runtime agnostic: the Python and Node.js bindings are thin
//! wrappers over this crate.
//!
//! ```rust,no_run
//! use docker_secrets_core::{get_secret, load_selective_secrets};
//!
//! let password = get_secret("DB_PASSWORD", None)?;
//!
//! // Sets both or neither
//! load_selective_secrets(&["DB_USER", "DB_PASSWORD"], None)?;
//! # Ok::<(), docker_secrets_core::SecretsError>(())
//! ```

pub mod secrets;
pub mod env;
pub mod logging;
pub mod config;

// Re-export commonly used types
#[allow(deprecated)]
pub use secrets::{
    SecretsAccessor, SecretsError, SecretsMap, SecretsResult, SecretsSource,
    get_secret, load_all_secrets, load_selective_secrets, get_docker_secrets,
};

pub use env::{Environment, MemoryEnvironment, ProcessEnvironment, SharedEnvironment};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, SharedLogger, logger_from_env};

pub use config::{DirectorySelection, SecretsConfig, ConfigError};
