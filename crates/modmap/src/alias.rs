//! Alias table: exposed module prefix → real source location.

use modmap_config::{AliasEntry, ConfigError, ModmapConfig};
use rustc_hash::FxHashMap;

use crate::Result;

/// Lookup table built from declared [`AliasEntry`] values.
///
/// Keys are unique and never empty. When the same `expose` is declared more
/// than once the last declaration wins. Targets are not checked against the
/// filesystem here; a bad `src` only shows up when a rewrite is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: FxHashMap<String, String>,
}

impl AliasTable {
    /// Build a table from an ordered sequence of entries.
    ///
    /// A single entry can be passed as `[entry]` or `Some(&entry)`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyAliasField` when an entry has an empty
    /// `expose` or `src`.
    ///
    /// # Example
    ///
    /// ```
    /// use modmap::AliasTable;
    /// use modmap_config::AliasEntry;
    ///
    /// let table = AliasTable::build(&[
    ///     AliasEntry::new("ui", "./src/ui"),
    ///     AliasEntry::new("ui", "./src/ui-next"),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.get("ui"), Some("./src/ui-next"));
    /// ```
    pub fn build<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a AliasEntry>,
    {
        let mut table = FxHashMap::default();
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.expose.is_empty() {
                return Err(ConfigError::EmptyAliasField {
                    index,
                    field: "expose",
                }
                .into());
            }
            if entry.src.is_empty() {
                return Err(ConfigError::EmptyAliasField { index, field: "src" }.into());
            }
            table.insert(entry.expose.clone(), entry.src.clone());
        }

        Ok(Self { entries: table })
    }

    pub fn from_config(config: &ModmapConfig) -> Result<Self> {
        Self::build(&config.aliases)
    }

    /// Exact-key lookup.
    pub fn get(&self, expose: &str) -> Option<&str> {
        self.entries.get(expose).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_later_entries_overwrite_earlier() {
        let entries = vec![
            AliasEntry::new("a", "./first"),
            AliasEntry::new("b", "./b"),
            AliasEntry::new("a", "./second"),
        ];
        let table = AliasTable::build(&entries).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a"), Some("./second"));
        assert_eq!(table.get("b"), Some("./b"));
    }

    #[test]
    fn test_single_entry() {
        let entry = AliasEntry::new("vendor", "npm:lodash");
        let table = AliasTable::build(Some(&entry)).unwrap();
        assert_eq!(table.get("vendor"), Some("npm:lodash"));
    }

    #[test]
    fn test_empty_expose_is_rejected() {
        let err = AliasTable::build(&[AliasEntry::new("", "./src")]).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::EmptyAliasField { index: 0, field: "expose" })
        ));
    }

    #[test]
    fn test_empty_src_is_rejected() {
        let entries = [AliasEntry::new("a", "./a"), AliasEntry::new("b", "")];
        let err = AliasTable::build(&entries).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::EmptyAliasField { index: 1, field: "src" })
        ));
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = AliasTable::build(&[AliasEntry::new("app/ui", "./src/ui")]).unwrap();
        assert_eq!(table.get("app"), None);
        assert_eq!(table.get("app/ui/"), None);
        assert_eq!(table.get("app/ui"), Some("./src/ui"));
    }
}
