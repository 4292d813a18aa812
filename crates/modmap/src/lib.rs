//! # modmap
//!
//! Alias-aware module path resolution.
//!
//! Given declared aliases (`expose` → `src`) this crate turns a module
//! specifier such as `components/Button` into the relative specifier that
//! reaches the real file from the importing module (`../components/Button`),
//! optionally swapping in a platform-specific variant of that file
//! (`Button.ios.js`, `Button.web.js`, ...).
//!
//! The crate never parses source code. Hosts find specifiers themselves and
//! ask for replacements; see `modmap-transform` for an OXC-based adapter.
//!
//! ## Quick Start
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use modmap::{AliasTable, Resolution, Resolver, runtime::NativeRuntime};
//! use modmap_config::{AliasEntry, PlatformOptions};
//!
//! let table = AliasTable::build(&[AliasEntry::new("components", "/project/src/components")])?;
//! let resolver = Resolver::new(Arc::new(NativeRuntime::new()), PlatformOptions::disabled());
//!
//! let resolution = resolver.resolve(
//!     "components/Button",
//!     Path::new("/project/src/pages/Home.js"),
//!     &table,
//! )?;
//! assert_eq!(resolution, Resolution::Rewritten("../components/Button".to_string()));
//! # Ok::<(), modmap::Error>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod alias;
pub mod cache;
pub mod mapper;
pub mod relative;
pub mod resolver;
pub mod runtime;
pub mod variant;

#[cfg(feature = "logging")]
pub mod logging;

pub use alias::AliasTable;
pub use cache::{DirectoryCache, DirectoryListing};
pub use mapper::{AliasMatch, map_module, match_alias};
pub use relative::{RelativeTarget, to_relative};
pub use resolver::{Resolution, Resolver, strip_marker};
pub use runtime::{NativeRuntime, Runtime, RuntimeError, RuntimeResult};
pub use variant::{PlatformTier, pick_variant, suffix_cascade};

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::MemoryRuntime;

use modmap_config::{ConfigError, ModmapConfig};

/// Error types for modmap operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed alias configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A variant directory could not be listed. Fatal for the file being
    /// resolved; never cached.
    #[error("Failed to list {path} for platform variants: {source}")]
    DirectoryListing {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// The marker-bearing target has no variant for the configured platform.
    #[error("No platform variant found for '{specifier}' (mapped to '{marked}')")]
    NoVariant { specifier: String, marked: String },

    /// No relative path exists between the two locations.
    #[error("Cannot express {} relative to {}", to.display(), from.display())]
    NotRelative { from: PathBuf, to: PathBuf },

    /// Runtime (filesystem / environment) failure.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result type alias for modmap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Resolve one specifier against `config` using the OS filesystem.
///
/// Builds a fresh alias table and directory cache on every call; hosts
/// rewriting many files should keep a [`Resolver`] and [`AliasTable`] instead.
///
/// Returns `Ok(None)` when the specifier should be left as written.
///
/// # Errors
///
/// Malformed aliases, unreadable variant directories, and (under
/// `missing_variant = "error"`) unresolvable variants.
pub fn resolve(specifier: &str, importing_file: &Path, config: &ModmapConfig) -> Result<Option<String>> {
    let table = AliasTable::from_config(config)?;
    let resolver = Resolver::from_config(Arc::new(NativeRuntime::new()), config);
    resolver
        .resolve(specifier, importing_file, &table)?
        .into_rewrite(specifier, config.missing_variant)
}
