//! File-based config discovery
//!
//! Finds a modmap configuration file and layers it between the built-in
//! defaults and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format as _, Json, Serialized, Toml},
};
use serde_json::Value;

use crate::alias::aliases_from_value;
use crate::config::ModmapConfig;
use crate::error::{ConfigError, Result};
use crate::platform::env_provider;

/// Name of the dedicated TOML config file.
pub const CONFIG_FILE: &str = "modmap.toml";

/// Field holding modmap options inside `package.json`.
pub const PACKAGE_FIELD: &str = "modmap";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use modmap_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `modmap.toml`
    /// 2. `package.json` with a non-null `modmap` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load the discovered config, with `REACT_NATIVE*` variables taking
    /// precedence over the file's `platform` table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<ModmapConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load config from a specific file path
    ///
    /// # Errors
    ///
    /// An alias entry without `expose` or `src` is reported as
    /// `ConfigError::MissingAliasField`, the same as [`ModmapConfig::from_value`].
    pub fn load_from(&self, path: &Path) -> Result<ModmapConfig> {
        if !path.is_file() {
            return Err(ConfigError::Unreadable(path.to_path_buf()));
        }

        let file = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            Figment::from(Json::file(path)).focus(PACKAGE_FIELD)
        } else {
            Figment::from(Toml::file(path))
        };

        tracing::debug!("Loading modmap config from: {}", path.display());

        let figment = Figment::from(Serialized::defaults(ModmapConfig::default()))
            .merge(file)
            .merge(env_provider());

        if let Ok(aliases) = figment.extract_inner::<Value>("aliases") {
            aliases_from_value(&aliases)?;
        }

        let mut config: ModmapConfig =
            figment.extract().map_err(|e| ConfigError::InvalidValue {
                field: path.display().to_string(),
                hint: Some(e.to_string()),
            })?;
        config.platform.apply_env_flag();
        Ok(config)
    }
}

/// Discover and load config from current directory (convenience function)
pub fn discover() -> Result<ModmapConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
