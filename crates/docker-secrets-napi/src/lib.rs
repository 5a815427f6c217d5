//! Node.js bindings for docker-secrets via napi-rs

#![deny(clippy::all)]

use std::collections::HashMap;
use std::path::PathBuf;

use napi::bindgen_prelude::*;
use napi_derive::napi;

use docker_secrets_core::{logger_from_env, SecretsAccessor, SecretsConfig, SecretsError};

/// Error reasons start with a stable code (`NOT_FOUND`, `IO`, `PARSE`) so
/// JavaScript callers can branch on the cause.
fn to_napi_err(err: SecretsError) -> Error {
    Error::from_reason(format!("{}: {}", err.code(), err))
}

fn accessor() -> SecretsAccessor {
    SecretsAccessor::new().with_logger(logger_from_env())
}

fn path_arg(path: Option<String>) -> Option<PathBuf> {
    path.map(PathBuf::from)
}

// ============================================================================
// Module Functions
// ============================================================================

/// Get a single secret
#[napi]
pub fn get_secret(name: String, path: Option<String>) -> Result<String> {
    let path = path_arg(path);
    accessor()
        .get(&name, path.as_deref())
        .map_err(to_napi_err)
}

/// Write every secret into `process.env`
#[napi]
pub fn load_all_secrets(path: Option<String>) -> Result<()> {
    let path = path_arg(path);
    accessor()
        .load_all(path.as_deref())
        .map_err(to_napi_err)
}

/// Write the named secrets into `process.env`, all or nothing
#[napi]
pub fn load_selective_secrets(names: Vec<String>, path: Option<String>) -> Result<()> {
    let path = path_arg(path);
    accessor()
        .load_selective(&names, path.as_deref())
        .map_err(to_napi_err)
}

/// Every secret as a plain object
#[napi]
pub fn get_all_secrets(path: Option<String>) -> Result<HashMap<String, String>> {
    let path = path_arg(path);
    accessor()
        .resolve(path.as_deref())
        .map(|map| map.into_inner().into_iter().collect())
        .map_err(to_napi_err)
}

/// Default secrets mount point
#[napi]
pub fn default_secrets_path() -> String {
    SecretsConfig::default().secrets_path.display().to_string()
}
