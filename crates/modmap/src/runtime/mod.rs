//! Platform runtime abstraction
//!
//! This module defines the `Runtime` trait covering the few filesystem
//! operations resolution needs: listing a directory for variant probing,
//! reading a source file, and locating the working directory that relative
//! alias targets are resolved against.
//!
//! Resolution is synchronous: one file is rewritten at a time and the only
//! I/O is a single directory read per directory, so the trait has no async
//! surface.

pub mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use std::path::{Path, PathBuf};

pub use native::NativeRuntime;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryRuntime;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// File or directory not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// Platform runtime trait
///
/// Implementations must be shareable across threads so a single resolver
/// (and its directory cache) can serve parallel file rewrites.
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file as UTF-8 text
    fn read_file(&self, path: &Path) -> RuntimeResult<String>;

    /// List the entry names of a directory
    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>>;

    /// Get the current working directory
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;
}
