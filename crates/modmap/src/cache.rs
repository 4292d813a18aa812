//! Directory listing cache for platform-variant probing.
//!
//! Each directory is read at most once per cache lifetime and the listing is
//! never refreshed; files created after the first read are not seen. A
//! failed read is not cached, so a later file may retry it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxHashMap;

use crate::runtime::Runtime;
use crate::{Error, Result};

/// Case-insensitive view of one directory's entries.
///
/// Keys are lower-cased names; values keep the on-disk spelling so a
/// rewritten specifier still matches the real file on case-sensitive systems.
/// When several names differ only in case, the first in byte order wins
/// (`Button.js` over `button.js`), whatever order the directory was read in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    names: FxHashMap<String, String>,
}

impl DirectoryListing {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_unstable();

        let mut map = FxHashMap::default();
        for name in names {
            map.entry(name.to_lowercase()).or_insert(name);
        }
        Self { names: map }
    }

    /// On-disk name matching `name` case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Shared cache of directory listings keyed by absolute directory path.
///
/// Clones share the same storage. Safe to use from several threads at once;
/// two threads racing on a cold directory may both read it, but only one
/// listing is kept.
#[derive(Debug, Clone, Default)]
pub struct DirectoryCache {
    listings: Arc<DashMap<PathBuf, Arc<DirectoryListing>>>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing for `dir`, reading it through `runtime` on first use.
    ///
    /// # Errors
    ///
    /// Returns `Error::DirectoryListing` if the directory cannot be read.
    /// Nothing is cached in that case.
    pub fn listing(&self, dir: &Path, runtime: &dyn Runtime) -> Result<Arc<DirectoryListing>> {
        if let Some(hit) = self.listings.get(dir) {
            return Ok(Arc::clone(hit.value()));
        }

        let names = runtime
            .read_dir(dir)
            .map_err(|source| Error::DirectoryListing {
                path: dir.to_path_buf(),
                source,
            })?;

        tracing::trace!(
            "Indexed {} entries of {} for variant lookup",
            names.len(),
            dir.display()
        );

        let listing = Arc::new(DirectoryListing::from_names(names));
        Ok(Arc::clone(
            self.listings
                .entry(dir.to_path_buf())
                .or_insert(listing)
                .value(),
        ))
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.listings.contains_key(dir)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Drop every cached listing.
    pub fn clear(&self) {
        self.listings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MemoryRuntime;

    #[test]
    fn test_listing_is_case_insensitive_and_keeps_spelling() {
        let listing = DirectoryListing::from_names(["Button.iOS.js", "button.js"]);
        assert_eq!(listing.get("button.ios.js"), Some("Button.iOS.js"));
        assert_eq!(listing.get("BUTTON.JS"), Some("button.js"));
        assert!(!listing.contains("button.web.js"));
    }

    #[test]
    fn test_case_collision_ignores_read_order() {
        let forward = DirectoryListing::from_names(["button.js", "Button.js", "BUTTON.js"]);
        let backward = DirectoryListing::from_names(["BUTTON.js", "Button.js", "button.js"]);

        assert_eq!(forward.get("button.js"), Some("BUTTON.js"));
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 1);
    }

    #[test]
    fn test_directory_is_read_once() {
        let runtime = MemoryRuntime::new("/p").with_files(["ui/a.js", "ui/b.js"]);
        let cache = DirectoryCache::new();

        let first = cache.listing(Path::new("/p/ui"), &runtime).unwrap();
        let second = cache.listing(Path::new("/p/ui"), &runtime).unwrap();

        assert_eq!(runtime.dir_reads(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_clones_share_storage() {
        let runtime = MemoryRuntime::new("/p").with_files(["ui/a.js"]);
        let cache = DirectoryCache::new();
        let other = cache.clone();

        cache.listing(Path::new("/p/ui"), &runtime).unwrap();
        assert!(other.contains(Path::new("/p/ui")));
    }

    #[test]
    fn test_failed_read_is_not_cached() {
        let runtime = MemoryRuntime::new("/p").with_files(["ui/a.js"]);
        runtime.deny("ui");
        let cache = DirectoryCache::new();

        let err = cache.listing(Path::new("/p/ui"), &runtime).unwrap_err();
        assert!(matches!(err, Error::DirectoryListing { .. }));
        assert!(cache.is_empty());

        runtime.allow("ui");
        let listing = cache.listing(Path::new("/p/ui"), &runtime).unwrap();
        assert!(listing.contains("a.js"));
        assert_eq!(runtime.dir_reads(), 2);
    }

    #[test]
    fn test_clear_forces_reread() {
        let runtime = MemoryRuntime::new("/p").with_files(["ui/a.js"]);
        let cache = DirectoryCache::new();

        cache.listing(Path::new("/p/ui"), &runtime).unwrap();
        cache.clear();
        assert!(cache.is_empty());

        cache.listing(Path::new("/p/ui"), &runtime).unwrap();
        assert_eq!(runtime.dir_reads(), 2);
    }
}
