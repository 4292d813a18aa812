//! # modmap-transform
//!
//! Rewrites aliased module specifiers inside JavaScript and TypeScript
//! sources. Each module is parsed with OXC; every `import ... from`,
//! `export ... from`, `import()` and `require()` string literal is handed to
//! the [`modmap`] resolver and replaced in place when it maps to something.
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use modmap::runtime::NativeRuntime;
//! use modmap_config::{AliasEntry, ModmapConfig};
//! use modmap_transform::SourceRewriter;
//!
//! let config = ModmapConfig::with_aliases(vec![AliasEntry::new("utils", "/app/src/lib/utils")]);
//! let rewriter = SourceRewriter::from_config(Arc::new(NativeRuntime::new()), &config)?;
//!
//! let out = rewriter.rewrite_source(
//!     Path::new("/app/src/index.js"),
//!     "import { clamp } from 'utils/math';",
//! )?;
//! assert_eq!(out.code, "import { clamp } from './lib/utils/math';");
//! # Ok::<(), modmap_transform::TransformError>(())
//! ```

use std::path::PathBuf;

mod collect;
mod rewriter;

pub use collect::{SpecifierKind, SpecifierSite};
pub use rewriter::{
    RewriteOutput, RewriteReport, RewrittenSpecifier, SourceRewriter, collect_specifiers,
};

/// Errors raised while rewriting a source file.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// The module could not be parsed.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A marker-bearing specifier has no variant for the active platform.
    #[error("No platform variant for '{specifier}' imported from {}", path.display())]
    MissingVariant { specifier: String, path: PathBuf },

    /// Alias, filesystem or path failure from the resolver.
    #[error(transparent)]
    Resolve(#[from] modmap::Error),
}

pub type Result<T> = std::result::Result<T, TransformError>;
