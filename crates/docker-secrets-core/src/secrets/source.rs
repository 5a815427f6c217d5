//! Secrets source resolution
//!
//! Checks sources in priority order:
//! 1. The override variable (inline JSON, file system untouched)
//! 2. The given path, either a JSON file or a directory holding one

use std::env::VarError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::DirectorySelection;
use crate::env::Environment;
use crate::logging::file_logger as log;

use super::error::{SecretsError, SecretsResult};
use super::map::SecretsMap;

/// Where secrets are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretsSource {
    /// Raw JSON taken from an override variable
    Override { var: String, json: String },
    /// Override variable that is set but holds non-unicode bytes
    UnreadableOverride { var: String },
    /// A JSON file, or a directory containing the JSON file
    Path(PathBuf),
}

impl SecretsSource {
    /// Pick the source for one call
    ///
    /// The override variable wins whenever it is set, even to an empty
    /// string, so a bad override surfaces as a parse error instead of
    /// silently falling back to the mount point.
    pub fn detect(environment: &dyn Environment, override_var: &str, path: &Path) -> Self {
        match environment.var(override_var) {
            Ok(json) => {
                log::debug(module_path!(), &format!("Using override variable {}", override_var));
                SecretsSource::Override {
                    var: override_var.to_string(),
                    json,
                }
            }
            Err(VarError::NotUnicode(_)) => {
                log::warn(module_path!(), &format!("Override variable {} is not unicode", override_var));
                SecretsSource::UnreadableOverride {
                    var: override_var.to_string(),
                }
            }
            Err(VarError::NotPresent) => SecretsSource::Path(path.to_path_buf()),
        }
    }

    /// Read and parse the source into a fresh map
    pub fn load(&self, selection: DirectorySelection) -> SecretsResult<SecretsMap> {
        match self {
            SecretsSource::Override { var, json } => SecretsMap::from_json(json, var),
            SecretsSource::UnreadableOverride { var } => {
                Err(SecretsError::parse(var, "value is not valid UTF-8"))
            }
            SecretsSource::Path(path) => {
                let file = select_file(path, selection)?;
                log::debug(module_path!(), &format!("Reading secrets file {}", file.display()));

                let bytes = fs::read(&file).map_err(|e| SecretsError::io(&file, e))?;
                let origin = file.display().to_string();
                let text = std::str::from_utf8(&bytes)
                    .map_err(|e| SecretsError::parse(&origin, format!("invalid UTF-8: {}", e)))?;

                SecretsMap::from_json(text, &origin)
            }
        }
    }

    /// Human-readable description, safe to log
    pub fn describe(&self) -> String {
        match self {
            SecretsSource::Override { var, .. } | SecretsSource::UnreadableOverride { var } => {
                format!("override variable {}", var)
            }
            SecretsSource::Path(path) => path.display().to_string(),
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(
            self,
            SecretsSource::Override { .. } | SecretsSource::UnreadableOverride { .. }
        )
    }
}

/// Resolve `path` to the file holding the secrets
///
/// A non-directory path is returned as-is and any problem with it shows up
/// when it is opened.
fn select_file(path: &Path, selection: DirectorySelection) -> SecretsResult<PathBuf> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    let mut names = fs::read_dir(path)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.file_name()))
                .collect::<io::Result<Vec<_>>>()
        })
        .map_err(|e| SecretsError::io(path, e))?;
    names.sort();

    if selection == DirectorySelection::RequireSingle && names.len() > 1 {
        return Err(SecretsError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected exactly one secret file, found {}", names.len()),
            ),
        ));
    }

    match names.into_iter().next() {
        Some(first) => Ok(path.join(first)),
        None => Err(SecretsError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "no secret files found in directory"),
        )),
    }
}
