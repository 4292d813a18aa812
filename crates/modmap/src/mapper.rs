//! Longest-prefix alias matching over `/`-delimited specifier segments.

use crate::alias::AliasTable;

/// A specifier prefix that matched an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasMatch<'s, 't> {
    /// The matched leading segments of the specifier.
    pub prefix: &'s str,
    /// The unmatched remainder, starting with `/` or empty.
    pub rest: &'s str,
    /// The alias target the prefix maps to.
    pub src: &'t str,
}

impl AliasMatch<'_, '_> {
    /// The specifier with its matched prefix replaced by the alias target.
    pub fn substituted(&self) -> String {
        format!("{}{}", self.src, self.rest)
    }
}

/// Find the longest `/`-segment prefix of `specifier` that is an alias key.
///
/// The whole specifier is tried first, then trailing segments are dropped one
/// at a time, so `{"a", "a/b"}` resolves `"a/b/c"` through `"a/b"`.
pub fn match_alias<'s, 't>(specifier: &'s str, table: &'t AliasTable) -> Option<AliasMatch<'s, 't>> {
    let mut end = specifier.len();
    loop {
        let prefix = &specifier[..end];
        if let Some(src) = table.get(prefix) {
            return Some(AliasMatch {
                prefix,
                rest: &specifier[end..],
                src,
            });
        }
        end = prefix.rfind('/')?;
    }
}

/// Map a specifier through the alias table.
///
/// Returns `None` when no prefix matches; the caller leaves the specifier as is.
pub fn map_module(specifier: &str, table: &AliasTable) -> Option<String> {
    match_alias(specifier, table).map(|m| m.substituted())
}
