//! Secrets error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or applying secrets
///
/// The three kinds stay distinct so callers can branch on the cause:
/// a missing name, an unreadable location, or unparseable content.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// One or more requested names are absent from a loaded map
    #[error("Secrets not found: {}", names.join(", "))]
    NotFound { names: Vec<String> },

    /// The secrets location could not be accessed
    #[error("Failed to read secrets from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The location was read but its content is not a JSON object
    #[error("Failed to parse secrets JSON from {origin}: {message}")]
    Parse { origin: String, message: String },
}

impl SecretsError {
    /// Create a not-found error for a single name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            names: vec![name.into()],
        }
    }

    /// Create a not-found error for several names
    pub fn not_found_many(names: Vec<String>) -> Self {
        Self::NotFound { names }
    }

    /// Create an I/O error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Names reported missing, empty for I/O and parse errors
    pub fn missing_names(&self) -> &[String] {
        match self {
            Self::NotFound { names } => names,
            _ => &[],
        }
    }

    /// Short stable code for host-language bindings
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Io { .. } => "IO",
            Self::Parse { .. } => "PARSE",
        }
    }
}

pub type SecretsResult<T> = Result<T, SecretsError>;
