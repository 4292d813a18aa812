//! Alias entries: `{ expose, src }` pairs mapping a module prefix to a real location.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// A single declared alias.
///
/// `expose` is the module prefix written in source (`"components"`,
/// `"app/ui"`), `src` is where it really lives: a filesystem path, or an
/// `npm:`-prefixed package reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub expose: String,
    pub src: String,
}

impl AliasEntry {
    pub fn new(expose: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            expose: expose.into(),
            src: src.into(),
        }
    }
}

/// Normalize host-supplied alias options into an ordered list of entries.
///
/// Accepts either a single `{ expose, src }` object or an array of them.
/// Order is preserved so later duplicates can overwrite earlier ones.
///
/// # Errors
///
/// Returns `ConfigError::MissingAliasField` when an entry lacks `expose` or
/// `src` (or either is not a string), and `ConfigError::InvalidValue` when the
/// value is neither an object nor an array.
///
/// # Example
///
/// ```
/// use modmap_config::aliases_from_value;
/// use serde_json::json;
///
/// let entries = aliases_from_value(&json!({ "expose": "ui", "src": "./src/ui" })).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].expose, "ui");
/// ```
pub fn aliases_from_value(value: &Value) -> Result<Vec<AliasEntry>> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        Value::Null => Vec::new(),
        other => {
            return Err(ConfigError::InvalidValue {
                field: "aliases".to_string(),
                hint: Some(format!(
                    "expected an alias object or an array of them, found {other}"
                )),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let field = |name: &'static str| {
                item.get(name)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or(ConfigError::MissingAliasField { index, field: name })
            };
            Ok(AliasEntry {
                expose: field("expose")?,
                src: field("src")?,
            })
        })
        .collect()
}

/// Serde adapter accepting the same one-or-many shape as [`aliases_from_value`].
pub(crate) fn deserialize_aliases<'de, D>(deserializer: D) -> std::result::Result<Vec<AliasEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    aliases_from_value(&value).map_err(serde::de::Error::custom)
}
