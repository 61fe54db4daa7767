//! Raw and normalized views of a tool section.

use serde::Serialize;
use toml::{Table, Value};

use crate::error::Result;
use crate::version::{TargetVersion, TargetVersionSet};

/// Option name that carries the target versions.
pub const TARGET_VERSION_KEY: &str = "target_version";

/// The `[tool.<name>]` table exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawConfig(Table);

impl RawConfig {
    /// Wrap a parsed table.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self(table)
    }

    /// The underlying table.
    #[must_use]
    pub fn as_table(&self) -> &Table {
        &self.0
    }

    /// Rename every key to its option name, leaving values untouched.
    ///
    /// See [`normalize_key`].
    #[must_use]
    pub fn normalize(&self) -> NormalizedConfig {
        let mut table = Table::new();
        // Iteration is in key order; on collision the later key wins.
        for (key, value) in &self.0 {
            table.insert(normalize_key(key), value.clone());
        }
        NormalizedConfig(table)
    }
}

/// Convert a raw option key to its option name.
///
/// Every `-` becomes `_`; nothing else changes.
///
/// # Examples
///
/// ```
/// use projroot::config::normalize_key;
///
/// assert_eq!(normalize_key("line-length"), "line_length");
/// assert_eq!(normalize_key("skip-string-normalization"), "skip_string_normalization");
/// assert_eq!(normalize_key("--line-length"), "__line_length");
/// assert_eq!(normalize_key("target_version"), "target_version");
/// ```
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
}

/// A tool section with option names normalized.
///
/// Serializes as a plain table, so it can be rendered as TOML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedConfig(Table);

impl NormalizedConfig {
    /// The underlying table.
    #[must_use]
    pub fn as_table(&self) -> &Table {
        &self.0
    }

    /// Consume into the underlying table.
    #[must_use]
    pub fn into_table(self) -> Table {
        self.0
    }

    /// Look up an option by normalized name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether an option is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Option names, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// A string option.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// An integer option.
    #[must_use]
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_integer)
    }

    /// A boolean option.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// The configured target versions, if any.
    ///
    /// Accepts a single name or an array of names.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTargetVersion`] for an unknown name or a
    /// value that is not a string.
    pub fn target_versions(&self) -> Result<Option<TargetVersionSet>> {
        let Some(value) = self.get(TARGET_VERSION_KEY) else {
            return Ok(None);
        };
        let names: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        names
            .into_iter()
            .map(|item| match item {
                Value::String(name) => name.parse::<TargetVersion>(),
                other => Err(crate::Error::InvalidTargetVersion {
                    name: other.to_string(),
                }),
            })
            .collect::<Result<TargetVersionSet>>()
            .map(Some)
    }

    /// Set `target_version` to the names of `targets`, ascending.
    pub(crate) fn set_target_versions(&mut self, targets: &TargetVersionSet) {
        let names = targets
            .iter()
            .map(|t| Value::String(t.name()))
            .collect::<Vec<_>>();
        self.0
            .insert(TARGET_VERSION_KEY.to_string(), Value::Array(names));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawConfig {
        RawConfig::new(text.parse::<Table>().unwrap())
    }

    #[test]
    fn test_normalize_renames_keys_only() {
        let config = raw(
            r#"
            line-length = 100
            skip-magic-trailing-comma = true
            include = '\.pyi?$'
            "#,
        )
        .normalize();

        assert_eq!(config.get_integer("line_length"), Some(100));
        assert_eq!(config.get_bool("skip_magic_trailing_comma"), Some(true));
        assert_eq!(config.get_str("include"), Some(r"\.pyi?$"));
        assert!(!config.contains_key("line-length"));
    }

    #[test]
    fn test_normalize_keeps_nested_values() {
        let config = raw(
            r#"
            extend-exclude = ["a-b", "c-d"]
            [nested-table]
            inner-key = "x-y"
            "#,
        )
        .normalize();

        let excluded = config.get("extend_exclude").unwrap().as_array().unwrap();
        assert_eq!(excluded[0].as_str(), Some("a-b"));
        let nested = config.get("nested_table").unwrap().as_table().unwrap();
        assert!(nested.contains_key("inner-key"));
    }

    #[test]
    fn test_normalize_keeps_leading_dashes_as_underscores() {
        let config = raw(r#""--line-length" = 90"#).normalize();
        assert_eq!(config.get_integer("__line_length"), Some(90));
        assert!(!config.contains_key("line_length"));
        assert_eq!(normalize_key("--line-length"), "__line_length");
    }

    #[test]
    fn test_normalize_collision_later_key_wins() {
        let config = raw(
            r#"
            line-length = 80
            line_length = 120
            "#,
        )
        .normalize();
        assert_eq!(config.len(), 1);
        assert_eq!(config.get_integer("line_length"), Some(120));
    }

    #[test]
    fn test_target_versions_accepts_list_and_single() {
        let list = raw(r#"target-version = ["py39", "py38"]"#).normalize();
        let got: Vec<_> = list.target_versions().unwrap().unwrap().into_iter().collect();
        assert_eq!(got, vec![TargetVersion::Py38, TargetVersion::Py39]);

        let single = raw(r#"target-version = "py310""#).normalize();
        let got: Vec<_> = single.target_versions().unwrap().unwrap().into_iter().collect();
        assert_eq!(got, vec![TargetVersion::Py310]);

        assert!(NormalizedConfig::default().target_versions().unwrap().is_none());
    }

    #[test]
    fn test_target_versions_rejects_unknown() {
        let config = raw(r#"target-version = ["py27"]"#).normalize();
        assert!(config.target_versions().is_err());

        let config = raw("target-version = [38]").normalize();
        assert!(config.target_versions().is_err());
    }

    #[test]
    fn test_serializes_as_plain_table() {
        let config = raw("line-length = 88").normalize();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"line_length":88}"#);
    }
}
