//! Secrets lookups and environment loading

use std::path::Path;
use std::sync::Arc;

use crate::config::SecretsConfig;
use crate::env::{validate_var, Environment, ProcessEnvironment, SharedEnvironment};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::{log_debug, log_info, log_warn};

use super::error::{SecretsError, SecretsResult};
use super::map::SecretsMap;
use super::source::SecretsSource;

/// Reads secrets mounted by the container runtime
///
/// Every call resolves the source again; nothing is cached between calls.
/// Loads write through the configured `Environment`, which is the real
/// process environment unless another one is supplied.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use docker_secrets_core::env::{Environment, MemoryEnvironment};
/// use docker_secrets_core::SecretsAccessor;
///
/// let environment = Arc::new(MemoryEnvironment::new());
/// environment.set("LOCAL_SECRETS", r#"{"DB_PASSWORD": "hunter2"}"#);
///
/// let accessor = SecretsAccessor::new().with_environment(environment.clone());
/// assert_eq!(accessor.get("DB_PASSWORD", None).unwrap(), "hunter2");
///
/// accessor.load_selective(&["DB_PASSWORD"], None).unwrap();
/// assert_eq!(environment.get("DB_PASSWORD"), Some("hunter2".to_string()));
/// ```
pub struct SecretsAccessor {
    config: SecretsConfig,
    environment: SharedEnvironment,
    logger: SharedLogger,
}

impl Default for SecretsAccessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretsAccessor {
    /// Accessor over the process environment with default settings
    pub fn new() -> Self {
        Self {
            config: SecretsConfig::default(),
            environment: Arc::new(ProcessEnvironment::new()),
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    pub fn with_config(mut self, config: SecretsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_environment(mut self, environment: SharedEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &SecretsConfig {
        &self.config
    }

    pub fn environment(&self) -> &SharedEnvironment {
        &self.environment
    }

    /// Source a call would read, `None` meaning the configured path
    pub fn source(&self, path: Option<&Path>) -> SecretsSource {
        let path = path.unwrap_or(&self.config.secrets_path);
        SecretsSource::detect(self.environment.as_ref(), &self.config.override_var, path)
    }

    /// Load every secret from the source
    ///
    /// # Errors
    ///
    /// - `SecretsError::Io` if the location cannot be accessed
    /// - `SecretsError::Parse` if its content is not a JSON object
    pub fn resolve(&self, path: Option<&Path>) -> SecretsResult<SecretsMap> {
        let source = self.source(path);
        let map = source.load(self.config.directory_selection)?;
        log_debug!(self.logger, "Resolved {} secrets from {}", map.len(), source.describe());
        Ok(map)
    }

    /// Get a single secret value
    ///
    /// # Errors
    ///
    /// Same as [`SecretsAccessor::resolve`], plus `SecretsError::NotFound`
    /// when `name` is absent.
    pub fn get(&self, name: &str, path: Option<&Path>) -> SecretsResult<String> {
        let map = self.resolve(path)?;
        map.get(name)
            .map(str::to_string)
            .ok_or_else(|| {
                log_warn!(self.logger, "Secret '{}' not found", name);
                SecretsError::not_found(name)
            })
    }

    /// Write every secret into the environment
    ///
    /// Existing variables with the same name are overwritten. Names are
    /// checked before anything is written, so a secret that cannot be an
    /// environment variable fails the whole load with `SecretsError::Parse`.
    pub fn load_all(&self, path: Option<&Path>) -> SecretsResult<()> {
        let source = self.source(path);
        let map = source.load(self.config.directory_selection)?;

        for (name, value) in map.iter() {
            validate_var(name, value).map_err(|m| SecretsError::parse(source.describe(), m))?;
        }

        for (name, value) in map.iter() {
            self.environment.set(name, value);
        }

        log_info!(
            self.logger,
            "Loaded {} secrets from {} into {} environment",
            map.len(),
            source.describe(),
            self.environment.name()
        );
        Ok(())
    }

    /// Write only the named secrets into the environment
    ///
    /// All-or-nothing: if any name is missing, the error lists every missing
    /// name and the environment is left untouched.
    pub fn load_selective<S: AsRef<str>>(&self, names: &[S], path: Option<&Path>) -> SecretsResult<()> {
        let source = self.source(path);
        let map = source.load(self.config.directory_selection)?;

        let missing = map.missing(names);
        if !missing.is_empty() {
            log_warn!(self.logger, "Secrets not found: {}", missing.join(", "));
            return Err(SecretsError::not_found_many(
                missing.into_iter().map(str::to_string).collect(),
            ));
        }

        let mut selected = Vec::with_capacity(names.len());
        for name in names.iter().map(|name| name.as_ref()) {
            // Presence was checked above
            if let Some(value) = map.get(name) {
                validate_var(name, value).map_err(|m| SecretsError::parse(source.describe(), m))?;
                selected.push((name, value));
            }
        }

        for (name, value) in &selected {
            self.environment.set(name, value);
        }

        log_info!(
            self.logger,
            "Loaded {} selected secrets from {} into {} environment",
            selected.len(),
            source.describe(),
            self.environment.name()
        );
        Ok(())
    }
}

impl std::fmt::Debug for SecretsAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsAccessor")
            .field("config", &self.config)
            .field("environment", &self.environment.name())
            .finish()
    }
}

/// Get a secret from `path`, or from the default mount point
///
/// ```no_run
/// let password = docker_secrets_core::get_secret("DB_PASSWORD", None)?;
/// # Ok::<(), docker_secrets_core::SecretsError>(())
/// ```
pub fn get_secret(name: &str, path: Option<&Path>) -> SecretsResult<String> {
    SecretsAccessor::new().get(name, path)
}

/// Load every secret into the process environment
pub fn load_all_secrets(path: Option<&Path>) -> SecretsResult<()> {
    SecretsAccessor::new().load_all(path)
}

/// Load the named secrets into the process environment
pub fn load_selective_secrets<S: AsRef<str>>(names: &[S], path: Option<&Path>) -> SecretsResult<()> {
    SecretsAccessor::new().load_selective(names, path)
}

/// Earlier name of [`get_secret`]
#[deprecated(note = "use get_secret")]
pub fn get_docker_secrets(name: &str, path: Option<&Path>) -> SecretsResult<String> {
    get_secret(name, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirectorySelection;
    use crate::env::MemoryEnvironment;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Directory holding a single `secrets.json` with `content`
    fn secrets_dir(content: &str) -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("secrets.json"), content).unwrap();
        dir
    }

    fn accessor_with(environment: &Arc<MemoryEnvironment>) -> SecretsAccessor {
        SecretsAccessor::new().with_environment(environment.clone())
    }

    #[test]
    fn test_get_from_directory() {
        let dir = secrets_dir(r#"{"a":"1"}"#);
        let environment = Arc::new(MemoryEnvironment::new());

        let value = accessor_with(&environment).get("a", Some(dir.path())).unwrap();
        assert_eq!(value, "1");
    }

    #[test]
    fn test_get_missing_name_is_not_found() {
        let dir = secrets_dir(r#"{"my_secret":"secret_value"}"#);
        let environment = Arc::new(MemoryEnvironment::new());

        let err = accessor_with(&environment)
            .get("missing_secret", Some(dir.path()))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.missing_names(), &["missing_secret".to_string()]);
    }

    #[test]
    fn test_malformed_json_is_parse_error_for_every_operation() {
        let dir = secrets_dir("{invalid_json}");
        let environment = Arc::new(MemoryEnvironment::new());
        let accessor = accessor_with(&environment);

        assert!(accessor.get("my_secret", Some(dir.path())).unwrap_err().is_parse());
        assert!(accessor.resolve(Some(dir.path())).unwrap_err().is_parse());
        assert!(accessor.load_all(Some(dir.path())).unwrap_err().is_parse());
        assert!(accessor
            .load_selective(&["my_secret"], Some(dir.path()))
            .unwrap_err()
            .is_parse());
        assert!(environment.is_empty());
    }

    #[test]
    fn test_unreachable_path_is_io_error_for_every_operation() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let environment = Arc::new(MemoryEnvironment::new());
        let accessor = accessor_with(&environment);

        assert!(accessor.get("a", Some(missing.as_path())).unwrap_err().is_io());
        assert!(accessor.load_all(Some(missing.as_path())).unwrap_err().is_io());
        assert!(accessor.load_selective(&["a"], Some(missing.as_path())).unwrap_err().is_io());
    }

    #[test]
    fn test_load_all_touches_only_secret_keys() {
        let dir = secrets_dir(r#"{"x":"1","y":"2"}"#);
        let mut initial = HashMap::new();
        initial.insert("HOME".to_string(), "/root".to_string());
        let environment = Arc::new(MemoryEnvironment::with_vars(initial));

        accessor_with(&environment).load_all(Some(dir.path())).unwrap();

        let mut expected = HashMap::new();
        expected.insert("HOME".to_string(), "/root".to_string());
        expected.insert("x".to_string(), "1".to_string());
        expected.insert("y".to_string(), "2".to_string());
        assert_eq!(environment.snapshot(), expected);
    }

    #[test]
    fn test_load_all_overwrites_existing() {
        let dir = secrets_dir(r#"{"x":"new"}"#);
        let environment = Arc::new(MemoryEnvironment::new());
        environment.set("x", "old");

        accessor_with(&environment).load_all(Some(dir.path())).unwrap();
        assert_eq!(environment.get("x"), Some("new".to_string()));
    }

    #[test]
    fn test_load_all_stringifies_values() {
        let dir = secrets_dir(r#"{"PORT": 5432, "DEBUG": false}"#);
        let environment = Arc::new(MemoryEnvironment::new());

        accessor_with(&environment).load_all(Some(dir.path())).unwrap();
        assert_eq!(environment.get("PORT"), Some("5432".to_string()));
        assert_eq!(environment.get("DEBUG"), Some("false".to_string()));
    }

    #[test]
    fn test_load_all_rejects_unusable_name_before_writing() {
        let dir = secrets_dir(r#"{"A=B":"1","GOOD":"2"}"#);
        let environment = Arc::new(MemoryEnvironment::new());

        let err = accessor_with(&environment).load_all(Some(dir.path())).unwrap_err();
        assert!(err.is_parse());
        assert!(environment.is_empty());
    }

    #[test]
    fn test_load_selective_sets_only_requested() {
        let dir = secrets_dir(r#"{"x":"1","y":"2"}"#);
        let environment = Arc::new(MemoryEnvironment::new());

        accessor_with(&environment)
            .load_selective(&["x"], Some(dir.path()))
            .unwrap();

        assert_eq!(environment.get("x"), Some("1".to_string()));
        assert_eq!(environment.get("y"), None);
        assert_eq!(environment.len(), 1);
    }

    #[test]
    fn test_load_selective_is_all_or_nothing() {
        let dir = secrets_dir(r#"{"x":"1"}"#);
        let environment = Arc::new(MemoryEnvironment::new());

        let err = accessor_with(&environment)
            .load_selective(&["x", "z"], Some(dir.path()))
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.missing_names(), &["z".to_string()]);
        assert!(err.to_string().contains('z'));
        assert_eq!(environment.get("x"), None);
        assert!(environment.is_empty());
    }

    #[test]
    fn test_load_selective_names_every_missing_key() {
        let dir = secrets_dir(r#"{"x":"1"}"#);
        let environment = Arc::new(MemoryEnvironment::new());

        let names = vec!["w".to_string(), "x".to_string(), "z".to_string()];
        let err = accessor_with(&environment)
            .load_selective(&names, Some(dir.path()))
            .unwrap_err();

        assert_eq!(err.missing_names(), &["w".to_string(), "z".to_string()]);
        assert_eq!(err.to_string(), "Secrets not found: w, z");
    }

    #[test]
    fn test_override_bypasses_file_system() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let environment = Arc::new(MemoryEnvironment::new());
        environment.set("LOCAL_SECRETS", r#"{"a":"9"}"#);

        let value = accessor_with(&environment).get("a", Some(missing.as_path())).unwrap();
        assert_eq!(value, "9");
    }

    #[test]
    fn test_override_takes_precedence_over_file() {
        let dir = secrets_dir(r#"{"a":"from_file"}"#);
        let environment = Arc::new(MemoryEnvironment::new());
        environment.set("LOCAL_SECRETS", r#"{"a":"from_override"}"#);

        let value = accessor_with(&environment).get("a", Some(dir.path())).unwrap();
        assert_eq!(value, "from_override");
    }

    #[test]
    fn test_malformed_override_is_parse_error() {
        let environment = Arc::new(MemoryEnvironment::new());
        environment.set("LOCAL_SECRETS", "not json");

        let err = accessor_with(&environment).get("a", None).unwrap_err();
        assert!(err.is_parse());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_override_does_not_fall_back_to_files() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        // Own variable name so parallel tests never see it
        let var = "DOCKER_SECRETS_TEST_RAW_OVERRIDE";
        let dir = secrets_dir(r#"{"a":"from_file"}"#);
        std::env::set_var(var, OsStr::from_bytes(b"{\"a\":\"\xff\"}"));

        let accessor = SecretsAccessor::new()
            .with_config(SecretsConfig::default().with_override_var(var));
        let result = accessor.get("a", Some(dir.path()));
        std::env::remove_var(var);

        let err = result.unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains(var));
    }

    #[test]
    fn test_custom_override_var() {
        let environment = Arc::new(MemoryEnvironment::new());
        environment.set("DEV_SECRETS", r#"{"a":"dev"}"#);
        environment.set("LOCAL_SECRETS", r#"{"a":"local"}"#);

        let accessor = accessor_with(&environment)
            .with_config(SecretsConfig::default().with_override_var("DEV_SECRETS"));
        assert_eq!(accessor.get("a", None).unwrap(), "dev");
    }

    #[test]
    fn test_override_feeds_load_all() {
        let environment = Arc::new(MemoryEnvironment::new());
        environment.set("LOCAL_SECRETS", r#"{"TOKEN":"abc"}"#);

        accessor_with(&environment).load_all(None).unwrap();
        assert_eq!(environment.get("TOKEN"), Some("abc".to_string()));
    }

    #[test]
    fn test_configured_default_path() {
        let dir = secrets_dir(r#"{"a":"1"}"#);
        let environment = Arc::new(MemoryEnvironment::new());

        let accessor = accessor_with(&environment)
            .with_config(SecretsConfig::default().with_secrets_path(dir.path()));
        assert_eq!(accessor.get("a", None).unwrap(), "1");
        assert_eq!(accessor.resolve(None).unwrap().len(), 1);
    }

    #[test]
    fn test_require_single_applies_to_operations() {
        let dir = secrets_dir(r#"{"a":"1"}"#);
        fs::write(dir.path().join("other.json"), r#"{"a":"2"}"#).unwrap();
        let environment = Arc::new(MemoryEnvironment::new());

        let accessor = accessor_with(&environment).with_config(
            SecretsConfig::default().with_directory_selection(DirectorySelection::RequireSingle),
        );
        assert!(accessor.get("a", Some(dir.path())).unwrap_err().is_io());
    }

    #[test]
    fn test_process_environment_functions() {
        let dir = secrets_dir(
            r#"{"DOCKER_SECRETS_TEST_FN_X":"1","DOCKER_SECRETS_TEST_FN_Y":"2"}"#,
        );

        assert_eq!(get_secret("DOCKER_SECRETS_TEST_FN_X", Some(dir.path())).unwrap(), "1");
        #[allow(deprecated)]
        let via_alias = get_docker_secrets("DOCKER_SECRETS_TEST_FN_Y", Some(dir.path())).unwrap();
        assert_eq!(via_alias, "2");

        load_selective_secrets(&["DOCKER_SECRETS_TEST_FN_X"], Some(dir.path())).unwrap();
        assert_eq!(std::env::var("DOCKER_SECRETS_TEST_FN_X").unwrap(), "1");
        assert!(std::env::var("DOCKER_SECRETS_TEST_FN_Y").is_err());

        load_all_secrets(Some(dir.path())).unwrap();
        assert_eq!(std::env::var("DOCKER_SECRETS_TEST_FN_Y").unwrap(), "2");

        std::env::remove_var("DOCKER_SECRETS_TEST_FN_X");
        std::env::remove_var("DOCKER_SECRETS_TEST_FN_Y");
    }
}
