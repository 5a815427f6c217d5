//! Parsed secrets mapping

use std::collections::BTreeMap;

use serde_json::Value;

use super::error::{SecretsError, SecretsResult};

/// Read-only mapping from secret name to secret value
///
/// Built fresh from a JSON object on every resolution. Values that are not
/// JSON strings are coerced to their JSON text: `42`, `true`, `null`, and
/// compact serialization for arrays and nested objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretsMap {
    secrets: BTreeMap<String, String>,
}

impl SecretsMap {
    /// Parse a JSON object into a secrets map
    ///
    /// `origin` names where the text came from and is only used in errors.
    pub fn from_json(text: &str, origin: &str) -> SecretsResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SecretsError::parse(origin, e.to_string()))?;

        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(SecretsError::parse(
                    origin,
                    format!("expected a JSON object at the root, found {}", kind_of(&other)),
                ))
            }
        };

        let secrets = object
            .into_iter()
            .map(|(name, value)| (name, stringify(value)))
            .collect();

        Ok(Self { secrets })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.secrets.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.secrets.contains_key(name)
    }

    /// Names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.secrets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.secrets.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Requested names absent from the map, in request order
    pub fn missing<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Consume the map into its owned entries
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.secrets
    }
}

impl From<BTreeMap<String, String>> for SecretsMap {
    fn from(secrets: BTreeMap<String, String>) -> Self {
        Self { secrets }
    }
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        // Display on Value renders compact JSON text for every other kind
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_values() {
        let map = SecretsMap::from_json(r#"{"x":"1","y":"2"}"#, "test").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x"), Some("1"));
        assert_eq!(map.get("y"), Some("2"));
        assert_eq!(map.get("z"), None);
    }

    #[test]
    fn test_scalar_values_are_stringified() {
        let map = SecretsMap::from_json(
            r#"{"port": 5432, "ratio": 1.5, "debug": true, "unset": null}"#,
            "test",
        )
        .unwrap();
        assert_eq!(map.get("port"), Some("5432"));
        assert_eq!(map.get("ratio"), Some("1.5"));
        assert_eq!(map.get("debug"), Some("true"));
        assert_eq!(map.get("unset"), Some("null"));
    }

    #[test]
    fn test_nested_values_become_compact_json() {
        let map = SecretsMap::from_json(
            r#"{"db": {"user": "admin"}, "hosts": [1, 2]}"#,
            "test",
        )
        .unwrap();
        assert_eq!(map.get("db"), Some(r#"{"user":"admin"}"#));
        assert_eq!(map.get("hosts"), Some("[1,2]"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SecretsMap::from_json("{invalid_json}", "secrets.json").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("secrets.json"));
    }

    #[test]
    fn test_non_object_root_is_parse_error() {
        let err = SecretsMap::from_json("[1, 2]", "test").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("an array"));

        let err = SecretsMap::from_json(r#""just a string""#, "test").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_empty_object() {
        let map = SecretsMap::from_json("{}", "test").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_missing_keeps_request_order() {
        let map = SecretsMap::from_json(r#"{"x":"1"}"#, "test").unwrap();
        assert_eq!(map.missing(&["z", "x", "a"]), vec!["z", "a"]);
        assert!(map.missing(&["x"]).is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let map = SecretsMap::from_json(r#"{"b":"2","a":"1","c":"3"}"#, "test").unwrap();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }
}
