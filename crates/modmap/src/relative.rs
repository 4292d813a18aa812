//! Relative specifier computation between an importing file and a target.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::{Error, Result};

/// Token that turns an alias target into a bare package reference.
pub const NPM_PREFIX: &str = "npm:";

/// Outcome of relativizing a mapped target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelativeTarget {
    /// Bare package name taken from after the last `npm:`.
    Package(String),
    /// POSIX relative path beginning with `./` or `../`.
    Path(String),
}

/// Make `path` absolute against `cwd` and normalize `.`/`..` components.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        cwd.join(path).clean()
    }
}

/// Absolute directory containing `importing_file`.
pub fn importing_dir(importing_file: &Path, cwd: &Path) -> PathBuf {
    absolutize(importing_file.parent().unwrap_or(Path::new("")), cwd)
}

/// Replace Windows separators with forward slashes.
pub fn to_posix(path: &str) -> String {
    path.replace('\\', "/")
}

/// Compute the specifier that reaches `target` from `importing_file`.
///
/// Relative inputs are resolved against `cwd`. If the computed path contains
/// `npm:` anywhere, everything after its last occurrence is returned as a
/// package name. Otherwise the result always starts with `.`; a same-directory
/// target gets a `./` prefix.
///
/// # Example
///
/// ```
/// use modmap::relative::{to_relative, RelativeTarget};
/// use std::path::Path;
///
/// let rel = to_relative(
///     Path::new("/project/src/pages/Home.js"),
///     "/project/src/components/Button",
///     Path::new("/project"),
/// )
/// .unwrap();
/// assert_eq!(rel, RelativeTarget::Path("../components/Button".to_string()));
/// ```
pub fn to_relative(importing_file: &Path, target: &str, cwd: &Path) -> Result<RelativeTarget> {
    let from = importing_dir(importing_file, cwd);
    let to = absolutize(Path::new(target), cwd);

    let relative = pathdiff::diff_paths(&to, &from).ok_or_else(|| Error::NotRelative {
        from: from.clone(),
        to: to.clone(),
    })?;
    let relative = to_posix(&relative.to_string_lossy());

    if let Some(idx) = relative.rfind(NPM_PREFIX) {
        return Ok(RelativeTarget::Package(
            relative[idx + NPM_PREFIX.len()..].to_string(),
        ));
    }

    if relative.starts_with('.') {
        Ok(RelativeTarget::Path(relative))
    } else {
        Ok(RelativeTarget::Path(format!("./{relative}")))
    }
}
