//! Container secrets lookup
//!
//! - `SecretsSource`: override variable or mounted file/directory
//! - `SecretsMap`: parsed, read-only name/value mapping
//! - `SecretsAccessor`: single lookups and environment loads

mod error;
mod map;
mod source;
mod accessor;

pub use error::{SecretsError, SecretsResult};
pub use map::SecretsMap;
pub use source::SecretsSource;
#[allow(deprecated)]
pub use accessor::{
    get_docker_secrets, get_secret, load_all_secrets, load_selective_secrets, SecretsAccessor,
};
