//! Top-level configuration for a rewrite pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alias::{AliasEntry, aliases_from_value, deserialize_aliases};
use crate::error::{ConfigError, Result as ConfigResult};
use crate::platform::PlatformOptions;

/// Default token marking a path that should be swapped for a platform variant.
pub const DEFAULT_MARKER: &str = "autoimport:";

/// What to do when a marker-bearing path has no matching variant file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingVariant {
    /// Leave the original specifier untouched and warn.
    Keep,
    /// Fail the compilation unit.
    #[default]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModmapConfig {
    #[serde(default, deserialize_with = "deserialize_aliases")]
    pub aliases: Vec<AliasEntry>,

    #[serde(default)]
    pub platform: PlatformOptions,

    #[serde(default)]
    pub missing_variant: MissingVariant,

    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

impl Default for ModmapConfig {
    fn default() -> Self {
        Self {
            aliases: Vec::new(),
            platform: PlatformOptions::default(),
            missing_variant: MissingVariant::default(),
            marker: default_marker(),
        }
    }
}

impl ModmapConfig {
    /// Config carrying only the given aliases.
    pub fn with_aliases(aliases: Vec<AliasEntry>) -> Self {
        Self {
            aliases,
            ..Self::default()
        }
    }

    /// Create from serde_json::Value (for plugin options handed over by a host)
    ///
    /// # Example
    ///
    /// ```
    /// use modmap_config::ModmapConfig;
    /// use serde_json::json;
    ///
    /// let config = ModmapConfig::from_value(json!({
    ///     "aliases": { "expose": "components", "src": "./src/components" },
    ///     "missing_variant": "keep"
    /// }))
    /// .unwrap();
    /// assert_eq!(config.aliases.len(), 1);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        // Alias errors are surfaced with their own variants rather than a
        // generic serde message.
        if let Some(aliases) = value.get("aliases") {
            aliases_from_value(aliases)?;
        }

        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ModmapConfig::default();
        assert!(config.aliases.is_empty());
        assert!(!config.platform.enabled);
        assert_eq!(config.missing_variant, MissingVariant::Error);
        assert_eq!(config.marker, "autoimport:");
    }

    #[test]
    fn test_from_value_accepts_alias_array() {
        let config = ModmapConfig::from_value(json!({
            "aliases": [
                { "expose": "components", "src": "./src/components" },
                { "expose": "vendor", "src": "npm:lodash" }
            ],
            "platform": { "enabled": true, "platform": "Android" }
        }))
        .unwrap();

        assert_eq!(config.aliases[1], AliasEntry::new("vendor", "npm:lodash"));
        assert!(config.platform.enabled);
        assert_eq!(config.platform.platform, "android");
    }

    #[test]
    fn test_from_value_reports_malformed_alias() {
        let err = ModmapConfig::from_value(json!({
            "aliases": [{ "src": "./x" }]
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingAliasField { index: 0, field: "expose" }
        ));
    }

    #[test]
    fn test_value_round_trip_keeps_policy() {
        let mut config = ModmapConfig::default();
        config.missing_variant = MissingVariant::Keep;

        let value = config.to_value().unwrap();
        assert_eq!(value["missing_variant"], json!("keep"));
        assert_eq!(ModmapConfig::from_value(value).unwrap(), config);
    }
}
