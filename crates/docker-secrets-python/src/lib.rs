//! Python bindings for docker-secrets via PyO3
//!
//! Errors map to the exception types Python callers already branch on:
//! a missing name raises `KeyError`, an unreadable location `IOError`
//! (`OSError`), and bad JSON `ValueError`.

use std::path::PathBuf;

use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;

use docker_secrets_core::{logger_from_env, SecretsAccessor, SecretsConfig, SecretsError};

fn to_py_err(err: SecretsError) -> PyErr {
    match err {
        SecretsError::NotFound { .. } => PyKeyError::new_err(err.to_string()),
        SecretsError::Io { .. } => PyIOError::new_err(err.to_string()),
        SecretsError::Parse { .. } => PyValueError::new_err(err.to_string()),
    }
}

fn accessor() -> SecretsAccessor {
    SecretsAccessor::new().with_logger(logger_from_env())
}

// ============================================================================
// Module Functions
// ============================================================================

/// Fetch a docker secret by name
///
/// Raises KeyError if the name is absent, IOError if the secrets path cannot
/// be opened, ValueError if the secrets cannot be parsed.
#[pyfunction]
#[pyo3(signature = (name, secrets_path=None))]
pub fn get_docker_secrets(name: &str, secrets_path: Option<PathBuf>) -> PyResult<String> {
    accessor()
        .get(name, secrets_path.as_deref())
        .map_err(to_py_err)
}

/// Load every docker secret into environment variables
#[pyfunction]
#[pyo3(signature = (secrets_path=None))]
pub fn load_all_secrets(secrets_path: Option<PathBuf>) -> PyResult<()> {
    accessor()
        .load_all(secrets_path.as_deref())
        .map_err(to_py_err)
}

/// Load the named docker secrets into environment variables
///
/// Raises KeyError naming every missing secret, in which case no variable
/// is set.
#[pyfunction]
#[pyo3(signature = (names, secrets_path=None))]
pub fn load_selective_secrets(names: Vec<String>, secrets_path: Option<PathBuf>) -> PyResult<()> {
    accessor()
        .load_selective(&names, secrets_path.as_deref())
        .map_err(to_py_err)
}

/// Return every docker secret as a dict
#[pyfunction]
#[pyo3(signature = (secrets_path=None))]
pub fn get_all_secrets(secrets_path: Option<PathBuf>) -> PyResult<std::collections::BTreeMap<String, String>> {
    accessor()
        .resolve(secrets_path.as_deref())
        .map(|map| map.into_inner())
        .map_err(to_py_err)
}

/// Default secrets mount point
#[pyfunction]
pub fn default_secrets_path() -> PathBuf {
    SecretsConfig::default().secrets_path
}

// ============================================================================
// Module Definition
// ============================================================================

#[pymodule]
fn docker_secrets(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(get_docker_secrets, m)?)?;
    m.add_function(wrap_pyfunction!(load_all_secrets, m)?)?;
    m.add_function(wrap_pyfunction!(load_selective_secrets, m)?)?;
    m.add_function(wrap_pyfunction!(get_all_secrets, m)?)?;
    m.add_function(wrap_pyfunction!(default_secrets_path, m)?)?;

    // Earlier names, kept for existing callers
    let get = m.getattr("get_docker_secrets")?;
    m.add("getDockerSecrets", &get)?;
    m.add("getDocketSecrets", &get)?;

    m.add("LOCAL_SECRETS", docker_secrets_core::config::DEFAULT_OVERRIDE_VAR)?;

    Ok(())
}
