//! In-memory runtime for tests.
//!
//! Holds a flat map of absolute file paths to contents; directories exist
//! implicitly as the parents of those files. Directory reads are counted so
//! tests can observe cache behaviour, and individual directories can be made
//! to fail on demand.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashSet;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Runtime, RuntimeError, RuntimeResult};

#[derive(Debug)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: FxHashMap<PathBuf, String>,
    denied: DashSet<PathBuf>,
    dir_reads: AtomicUsize,
}

impl MemoryRuntime {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            files: FxHashMap::default(),
            denied: DashSet::new(),
            dir_reads: AtomicUsize::new(0),
        }
    }

    /// Add a file. Relative paths are placed under the runtime's cwd.
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = self.cwd.join(path);
        self.files.insert(path, content.into());
        self
    }

    /// Add several empty files.
    pub fn with_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self = self.with_file(path, "");
        }
        self
    }

    /// Make reads of `dir` fail with a permission-style I/O error.
    pub fn deny(&self, dir: impl AsRef<Path>) {
        self.denied.insert(self.cwd.join(dir));
    }

    /// Undo [`MemoryRuntime::deny`].
    pub fn allow(&self, dir: impl AsRef<Path>) {
        self.denied.remove(&self.cwd.join(dir));
    }

    /// Number of `read_dir` calls served so far, failed ones included.
    pub fn dir_reads(&self) -> usize {
        self.dir_reads.load(Ordering::SeqCst)
    }
}

impl Runtime for MemoryRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        self.dir_reads.fetch_add(1, Ordering::SeqCst);

        if self.denied.contains(path) {
            return Err(RuntimeError::Io(format!(
                "Failed to read directory {}: permission denied",
                path.display()
            )));
        }

        let mut names = FxHashSet::default();
        for file in self.files.keys() {
            if let Ok(rest) = file.strip_prefix(path) {
                if let Some(first) = rest.components().next() {
                    names.insert(first.as_os_str().to_string_lossy().into_owned());
                }
            }
        }

        if names.is_empty() {
            return Err(RuntimeError::FileNotFound(path.to_path_buf()));
        }

        let mut names: Vec<String> = names.into_iter().collect();
        names.sort();
        Ok(names)
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_direct_children_only() {
        let runtime = MemoryRuntime::new("/project").with_files([
            "src/ui/Button.js",
            "src/ui/Button.ios.js",
            "src/ui/icons/Star.js",
        ]);

        let names = runtime.read_dir(Path::new("/project/src/ui")).unwrap();
        assert_eq!(names, vec!["Button.ios.js", "Button.js", "icons"]);
        assert_eq!(runtime.dir_reads(), 1);
    }

    #[test]
    fn test_unknown_directory_is_not_found() {
        let runtime = MemoryRuntime::new("/project").with_files(["src/a.js"]);
        let err = runtime.read_dir(Path::new("/project/lib")).unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(_)));
    }

    #[test]
    fn test_denied_directory_fails_until_allowed() {
        let runtime = MemoryRuntime::new("/project").with_files(["src/a.js"]);
        runtime.deny("src");
        assert!(runtime.read_dir(Path::new("/project/src")).is_err());

        runtime.allow("src");
        assert!(runtime.read_dir(Path::new("/project/src")).is_ok());
    }
}
