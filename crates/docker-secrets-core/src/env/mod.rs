//! Environment abstractions
//!
//! Secrets are applied by writing them into an environment. The process
//! environment is global mutable state, so writes go through the
//! `Environment` trait:
//! - `ProcessEnvironment`: the real process environment
//! - `MemoryEnvironment`: an in-memory map for tests and embedding

mod traits;
mod process_env;
mod memory_env;

pub use traits::{validate_var, Environment, SharedEnvironment};
pub use process_env::ProcessEnvironment;
pub use memory_env::MemoryEnvironment;
