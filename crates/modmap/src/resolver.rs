//! Resolver: alias mapping, relativization and platform-variant selection.

use std::path::Path;
use std::sync::Arc;

use modmap_config::{DEFAULT_MARKER, MissingVariant, ModmapConfig, PlatformOptions};
use path_clean::PathClean;

use crate::alias::AliasTable;
use crate::cache::DirectoryCache;
use crate::mapper::map_module;
use crate::relative::{RelativeTarget, importing_dir, to_relative};
use crate::runtime::{NativeRuntime, Runtime};
use crate::variant::pick_variant;
use crate::{Error, Result};

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No alias prefix matched. Leave the specifier untouched.
    Unmapped,
    /// Replace the specifier with this string.
    Rewritten(String),
    /// The mapped path carried the variant marker but no file in its
    /// directory matched the platform cascade.
    NoVariant { marked: String },
}

impl Resolution {
    pub fn rewritten(&self) -> Option<&str> {
        match self {
            Resolution::Rewritten(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        matches!(self, Resolution::Unmapped)
    }

    /// Collapse to "replacement or nothing" under a missing-variant policy.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoVariant` for [`Resolution::NoVariant`] when the
    /// policy is [`MissingVariant::Error`].
    pub fn into_rewrite(self, specifier: &str, policy: MissingVariant) -> Result<Option<String>> {
        match self {
            Resolution::Unmapped => Ok(None),
            Resolution::Rewritten(s) => Ok(Some(s)),
            Resolution::NoVariant { marked } => match policy {
                MissingVariant::Keep => {
                    tracing::warn!(
                        "No platform variant for '{}' (mapped to '{}'), leaving it unchanged",
                        specifier,
                        marked
                    );
                    Ok(None)
                }
                MissingVariant::Error => Err(Error::NoVariant {
                    specifier: specifier.to_string(),
                    marked,
                }),
            },
        }
    }
}

/// Resolves aliased specifiers relative to the file that imports them.
///
/// Owns the runtime used for I/O, the platform mode and the directory cache.
/// Cloning is cheap and clones share the cache.
#[derive(Debug, Clone)]
pub struct Resolver {
    runtime: Arc<dyn Runtime>,
    platform: PlatformOptions,
    marker: String,
    cache: DirectoryCache,
}

impl Resolver {
    pub fn new(runtime: Arc<dyn Runtime>, platform: PlatformOptions) -> Self {
        Self {
            runtime,
            platform,
            marker: DEFAULT_MARKER.to_string(),
            cache: DirectoryCache::new(),
        }
    }

    /// Resolver over the OS filesystem.
    pub fn native(platform: PlatformOptions) -> Self {
        Self::new(Arc::new(NativeRuntime::new()), platform)
    }

    /// Resolver taking its platform mode and marker from `config`.
    pub fn from_config(runtime: Arc<dyn Runtime>, config: &ModmapConfig) -> Self {
        Self::new(runtime, config.platform.clone()).with_marker(config.marker.clone())
    }

    /// Use an existing (possibly shared) directory cache.
    pub fn with_cache(mut self, cache: DirectoryCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn runtime(&self) -> &Arc<dyn Runtime> {
        &self.runtime
    }

    pub fn platform(&self) -> &PlatformOptions {
        &self.platform
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn cache(&self) -> &DirectoryCache {
        &self.cache
    }

    /// Resolve `specifier` as written in `importing_file`.
    ///
    /// # Errors
    ///
    /// Fails when the working directory is unavailable, when no relative path
    /// can be formed, or when a variant directory cannot be listed.
    pub fn resolve(
        &self,
        specifier: &str,
        importing_file: &Path,
        table: &AliasTable,
    ) -> Result<Resolution> {
        let Some(target) = map_module(specifier, table) else {
            return Ok(Resolution::Unmapped);
        };

        let resolution = self.relativize(importing_file, &target)?;
        tracing::debug!(
            "Resolved '{}' in {} to {:?}",
            specifier,
            importing_file.display(),
            resolution
        );
        Ok(resolution)
    }

    /// Turn an already-mapped target into a specifier usable from
    /// `importing_file`, selecting a platform variant when enabled.
    pub fn relativize(&self, importing_file: &Path, target: &str) -> Result<Resolution> {
        let cwd = self.runtime.get_cwd()?;

        let path = match to_relative(importing_file, target, &cwd)? {
            RelativeTarget::Package(name) => return Ok(Resolution::Rewritten(name)),
            RelativeTarget::Path(path) => path,
        };

        if !self.platform.enabled {
            return Ok(Resolution::Rewritten(path));
        }

        match strip_marker(&path, &self.marker) {
            Some(stripped) => self.select_variant(importing_file, &cwd, path, &stripped),
            None => Ok(Resolution::Rewritten(path)),
        }
    }

    fn select_variant(
        &self,
        importing_file: &Path,
        cwd: &Path,
        marked: String,
        stripped: &str,
    ) -> Result<Resolution> {
        let (dir, file) = stripped.rsplit_once('/').unwrap_or((".", stripped));
        let base = file.strip_suffix(".js").unwrap_or(file);

        let listing_dir = importing_dir(importing_file, cwd).join(dir).clean();
        let listing = self.cache.listing(&listing_dir, self.runtime.as_ref())?;

        match pick_variant(&self.platform.platform, base, &listing) {
            Some(name) => Ok(Resolution::Rewritten(format!("{dir}/{name}"))),
            None => Ok(Resolution::NoVariant { marked }),
        }
    }
}

/// Remove every case-insensitive occurrence of `marker` from `path`.
///
/// Returns `None` when the marker does not occur (or is empty).
pub fn strip_marker(path: &str, marker: &str) -> Option<String> {
    if marker.is_empty() {
        return None;
    }

    let haystack = path.to_ascii_lowercase();
    let needle = marker.to_ascii_lowercase();
    let mut out = String::with_capacity(path.len());
    let mut last = 0;
    for (idx, _) in haystack.match_indices(&needle) {
        out.push_str(&path[last..idx]);
        last = idx + needle.len();
    }

    if last == 0 {
        return None;
    }
    out.push_str(&path[last..]);
    Some(out)
}
