//! Platform-variant mode flags.
//!
//! The mode is normally taken from the process environment:
//!
//! - `REACT_NATIVE` enables platform substitution when set to anything other
//!   than blank (so `REACT_NATIVE=false` still enables it)
//! - `REACT_NATIVE_ENV` names the target platform (`ios`, `android`, `desktop`, ...)
//!
//! Both are read once per run; a `PlatformOptions` value is immutable after that.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};

/// Environment variable enabling platform substitution.
pub const ENABLED_VAR: &str = "REACT_NATIVE";

/// Environment variable selecting the target platform.
pub const PLATFORM_VAR: &str = "REACT_NATIVE_ENV";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOptions {
    /// Whether marker-bearing paths are rewritten to a platform variant.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub enabled: bool,

    /// Lower-cased platform tag. Empty selects the default (web) tier.
    #[serde(default, deserialize_with = "deserialize_tag")]
    pub platform: String,
}

impl PlatformOptions {
    pub fn new(enabled: bool, platform: impl AsRef<str>) -> Self {
        Self {
            enabled,
            platform: platform.as_ref().to_lowercase(),
        }
    }

    /// Substitution disabled, default platform.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Read the mode flags from the process environment.
    ///
    /// Unset variables fall back to the defaults (disabled, empty platform).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use modmap_config::PlatformOptions;
    ///
    /// let platform = PlatformOptions::from_env().unwrap();
    /// if platform.enabled {
    ///     println!("rewriting for {}", platform.platform);
    /// }
    /// ```
    pub fn from_env() -> Result<Self> {
        let mut opts: Self = Figment::from(Serialized::default("platform", Self::default()))
            .merge(env_provider())
            .extract_inner("platform")
            .map_err(|e| ConfigError::InvalidValue {
                field: PLATFORM_VAR.to_string(),
                hint: Some(e.to_string()),
            })?;
        opts.apply_env_flag();
        Ok(opts)
    }

    /// Let a set `REACT_NATIVE` override `enabled`.
    pub fn apply_env_flag(&mut self) {
        if let Some(flag) = env_flag() {
            self.enabled = flag;
        }
    }
}

/// Figment provider exposing `REACT_NATIVE_ENV` as `platform.platform`.
///
/// `REACT_NATIVE` is left out: figment would parse `false` or `0` into typed
/// values, while the flag only cares whether the variable holds anything.
/// See [`env_flag`].
pub fn env_provider() -> Env {
    Env::raw()
        .only(&[PLATFORM_VAR])
        .map(|_| "platform.platform".into())
}

/// Raw `REACT_NATIVE` state: `None` when unset, otherwise whether the value
/// is non-blank.
pub fn env_flag() -> Option<bool> {
    Env::raw()
        .only(&[ENABLED_VAR])
        .iter()
        .next()
        .map(|(_, value)| !value.trim().is_empty())
}

/// Any scalar an environment variable or config file can carry.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Int(n) => *n != 0,
            Scalar::Float(f) => *f != 0.0,
            Scalar::Text(s) => !s.trim().is_empty(),
        }
    }

    fn into_tag(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s.trim().to_lowercase(),
        }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.is_truthy())
}

fn deserialize_tag<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_tag())
}
