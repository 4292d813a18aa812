//! Native Runtime Implementation
//!
//! Wraps `std::fs` and `std::env` behind the `Runtime` trait.

// NativeRuntime is the one place allowed to touch the OS filesystem
#![allow(clippy::disallowed_methods)]

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, action: &str, e: std::io::Error) -> RuntimeError {
    if e.kind() == ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
    }
}

impl Runtime for NativeRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<String> {
        std::fs::read_to_string(path).map_err(|e| io_error(path, "read", e))
    }

    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| io_error(path, "read directory", e))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| RuntimeError::Io(format!("Failed to read directory entry: {}", e)))?;

            match entry.file_name().into_string() {
                Ok(name) => result.push(name),
                Err(raw) => tracing::trace!(
                    "Skipping non-UTF-8 entry {:?} in {}",
                    raw,
                    path.display()
                ),
            }
        }

        Ok(result)
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        std::env::current_dir().map_err(|e| {
            RuntimeError::Io(format!("Failed to get current working directory: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir_lists_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Button.ios.js"), "").unwrap();
        fs::write(temp.path().join("Button.js"), "").unwrap();

        let mut names = NativeRuntime::new().read_dir(temp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["Button.ios.js", "Button.js"]);
    }

    #[test]
    fn test_read_dir_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = NativeRuntime::new().read_dir(&missing).unwrap_err();
        assert_eq!(err, RuntimeError::FileNotFound(missing));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_read_dir_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(OsStr::from_bytes(b"bad\xff.js")), "").unwrap();
        fs::write(temp.path().join("good.js"), "").unwrap();

        let names = NativeRuntime::new().read_dir(temp.path()).unwrap();
        assert_eq!(names, vec!["good.js"]);
    }

    #[test]
    fn test_read_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.js");
        fs::write(&path, "import 'x';").unwrap();

        assert_eq!(NativeRuntime::new().read_file(&path).unwrap(), "import 'x';");
    }
}
