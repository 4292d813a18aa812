//! Configuration for modmap: alias declarations, platform mode flags and
//! config-file discovery.

pub mod alias;
pub mod config;
pub mod discovery;
pub mod error;
pub mod platform;

pub use alias::{AliasEntry, aliases_from_value};
pub use config::{DEFAULT_MARKER, MissingVariant, ModmapConfig};
pub use discovery::{CONFIG_FILE, ConfigDiscovery, PACKAGE_FIELD, discover};
pub use error::{ConfigError, Result};
pub use platform::{ENABLED_VAR, PLATFORM_VAR, PlatformOptions, env_flag, env_provider};
