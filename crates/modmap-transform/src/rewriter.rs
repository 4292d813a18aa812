//! Source-level specifier rewriting.

use std::path::Path;
use std::sync::Arc;

use modmap::{AliasTable, Resolution, Resolver, Runtime};
use modmap_config::{MissingVariant, ModmapConfig};
use oxc_allocator::Allocator;
use oxc_ast_visit::walk;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::{SourceType, Span};

use crate::collect::{SpecifierCollector, SpecifierKind, SpecifierSite};
use crate::{Result, TransformError};

/// One specifier replaced in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenSpecifier {
    pub kind: SpecifierKind,
    pub original: String,
    pub replacement: String,
}

/// Report of specifier rewriting for one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Specifiers that were replaced, in source order.
    pub rewritten_specifiers: Vec<RewrittenSpecifier>,
    /// Marker-bearing specifiers left as written because no platform variant
    /// exists (only under `missing_variant = "keep"`).
    pub kept_specifiers: Vec<String>,
}

impl RewriteReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of literals replaced.
    pub fn replacements(&self) -> usize {
        self.rewritten_specifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewritten_specifiers.is_empty() && self.kept_specifiers.is_empty()
    }
}

/// Rewritten code plus what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    pub code: String,
    pub report: RewriteReport,
}

impl RewriteOutput {
    pub fn changed(&self) -> bool {
        self.report.replacements() > 0
    }
}

enum Decision {
    Unchanged,
    Replace(String),
    Kept,
}

/// Rewrites aliased specifiers in JavaScript/TypeScript modules.
///
/// The alias table is built once and reused for every file; the resolver's
/// directory cache is shared by all files rewritten through this value.
#[derive(Debug, Clone)]
pub struct SourceRewriter {
    resolver: Resolver,
    table: AliasTable,
    missing_variant: MissingVariant,
}

impl SourceRewriter {
    pub fn new(resolver: Resolver, table: AliasTable, missing_variant: MissingVariant) -> Self {
        Self {
            resolver,
            table,
            missing_variant,
        }
    }

    /// Build the alias table and resolver described by `config`.
    ///
    /// # Errors
    ///
    /// Fails when an alias has an empty `expose` or `src`.
    pub fn from_config(runtime: Arc<dyn Runtime>, config: &ModmapConfig) -> Result<Self> {
        let table = AliasTable::from_config(config)?;
        let resolver = Resolver::from_config(runtime, config);
        Ok(Self::new(resolver, table, config.missing_variant))
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    pub fn missing_variant(&self) -> MissingVariant {
        self.missing_variant
    }

    /// Replacement for one specifier written in `file`, or `None` to leave
    /// it untouched.
    ///
    /// Hosts that find specifiers themselves call this directly.
    pub fn rewrite_specifier(&self, specifier: &str, file: &Path) -> Result<Option<String>> {
        match self.decide(specifier, file)? {
            Decision::Replace(replacement) => Ok(Some(replacement)),
            Decision::Unchanged | Decision::Kept => Ok(None),
        }
    }

    /// Rewrite every import, export, dynamic import and require specifier in
    /// `code`.
    ///
    /// The source type follows the extension of `path`. Text outside the
    /// rewritten literals is returned byte for byte, and each literal keeps
    /// its quote character.
    ///
    /// # Errors
    ///
    /// Parse failures, resolution failures, and missing variants under the
    /// `error` policy.
    pub fn rewrite_source(&self, path: &Path, code: &str) -> Result<RewriteOutput> {
        let sites = collect_specifiers(path, code)?;

        let mut report = RewriteReport::new();
        let mut edits = Vec::new();
        for site in sites {
            match self.decide(&site.value, path)? {
                Decision::Unchanged => {}
                Decision::Kept => report.kept_specifiers.push(site.value),
                Decision::Replace(replacement) => {
                    if replacement == site.value {
                        continue;
                    }
                    edits.push((site.span, replacement.clone()));
                    report.rewritten_specifiers.push(RewrittenSpecifier {
                        kind: site.kind,
                        original: site.value,
                        replacement,
                    });
                }
            }
        }

        let code = apply_edits(code, &edits);
        tracing::debug!(
            "Rewrote {} specifier(s) in {}",
            report.replacements(),
            path.display()
        );

        Ok(RewriteOutput { code, report })
    }

    /// Read `path` through the resolver's runtime and rewrite it.
    pub fn rewrite_file(&self, path: &Path) -> Result<RewriteOutput> {
        let code = self
            .resolver
            .runtime()
            .read_file(path)
            .map_err(modmap::Error::from)?;
        self.rewrite_source(path, &code)
    }

    fn decide(&self, specifier: &str, file: &Path) -> Result<Decision> {
        match self.resolver.resolve(specifier, file, &self.table)? {
            Resolution::Unmapped => Ok(Decision::Unchanged),
            Resolution::Rewritten(replacement) => Ok(Decision::Replace(replacement)),
            Resolution::NoVariant { marked } => match self.missing_variant {
                MissingVariant::Keep => {
                    tracing::warn!(
                        "No platform variant for '{}' (mapped to '{}') in {}, leaving it unchanged",
                        specifier,
                        marked,
                        file.display()
                    );
                    Ok(Decision::Kept)
                }
                MissingVariant::Error => Err(TransformError::MissingVariant {
                    specifier: specifier.to_string(),
                    path: file.to_path_buf(),
                }),
            },
        }
    }
}

/// Parse `code` and return its specifier sites in source order.
pub fn collect_specifiers(path: &Path, code: &str) -> Result<Vec<SpecifierSite>> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or(SourceType::mjs());

    let ParserReturn {
        program, errors, ..
    } = Parser::new(&allocator, code, source_type).parse();

    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(TransformError::Parse {
            path: path.to_path_buf(),
            message,
        });
    }

    let mut collector = SpecifierCollector::default();
    walk::walk_program(&mut collector, &program);

    let mut sites = collector.sites;
    sites.sort_by_key(|site| site.span.start);
    Ok(sites)
}

/// Splice replacement literals into `code`. Spans must not overlap.
fn apply_edits(code: &str, edits: &[(Span, String)]) -> String {
    let mut out = code.to_string();
    for (span, replacement) in edits.iter().rev() {
        let start = span.start as usize;
        let end = span.end as usize;
        let quote = match code[start..].chars().next() {
            Some('\'') => '\'',
            _ => '"',
        };
        out.replace_range(start..end, &quote_literal(replacement, quote));
    }
    out
}

fn quote_literal(value: &str, quote: char) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push(quote);
    for ch in value.chars() {
        if ch == quote || ch == '\\' {
            literal.push('\\');
        }
        literal.push(ch);
    }
    literal.push(quote);
    literal
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmap::MemoryRuntime;
    use modmap_config::{AliasEntry, PlatformOptions};
    use std::path::PathBuf;

    fn rewriter(runtime: MemoryRuntime, platform: PlatformOptions, policy: MissingVariant) -> SourceRewriter {
        let table = AliasTable::build(&[
            AliasEntry::new("components", "/project/src/components"),
            AliasEntry::new("vendor", "npm:lodash"),
            AliasEntry::new("ui", "/project/src/autoimport:ui"),
        ])
        .unwrap();
        SourceRewriter::new(Resolver::new(Arc::new(runtime), platform), table, policy)
    }

    fn home() -> PathBuf {
        PathBuf::from("/project/src/pages/Home.js")
    }

    #[test]
    fn test_quote_literal_escapes() {
        assert_eq!(quote_literal("./a", '\''), "'./a'");
        assert_eq!(quote_literal("it's", '\''), r"'it\'s'");
        assert_eq!(quote_literal(r"a\b", '"'), r#""a\\b""#);
    }

    #[test]
    fn test_rewrites_and_preserves_quotes() {
        let r = rewriter(
            MemoryRuntime::new("/project"),
            PlatformOptions::disabled(),
            MissingVariant::Error,
        );
        let code = "import Button from 'components/Button';\nimport _ from \"vendor\";\nimport React from 'react';\n";

        let out = r.rewrite_source(&home(), code).unwrap();
        assert_eq!(
            out.code,
            "import Button from '../components/Button';\nimport _ from \"lodash\";\nimport React from 'react';\n"
        );
        assert_eq!(out.report.replacements(), 2);
        assert!(out.changed());
    }

    #[test]
    fn test_untouched_source_is_identical() {
        let r = rewriter(
            MemoryRuntime::new("/project"),
            PlatformOptions::disabled(),
            MissingVariant::Error,
        );
        let code = "import x from './x';  // comment\nconst y = require('y');\n";

        let out = r.rewrite_source(&home(), code).unwrap();
        assert_eq!(out.code, code);
        assert!(out.report.is_empty());
    }

    #[test]
    fn test_missing_variant_under_error_policy() {
        let runtime = MemoryRuntime::new("/project").with_files(["src/ui/Other.js"]);
        let r = rewriter(runtime, PlatformOptions::new(true, "ios"), MissingVariant::Error);

        let err = r
            .rewrite_source(&home(), "import B from 'ui/Button';")
            .unwrap_err();
        assert!(matches!(err, TransformError::MissingVariant { ref specifier, .. } if specifier == "ui/Button"));
    }

    #[test]
    fn test_missing_variant_under_keep_policy() {
        let runtime = MemoryRuntime::new("/project").with_files(["src/ui/Other.js"]);
        let r = rewriter(runtime, PlatformOptions::new(true, "ios"), MissingVariant::Keep);
        let code = "import B from 'ui/Button';";

        let out = r.rewrite_source(&home(), code).unwrap();
        assert_eq!(out.code, code);
        assert_eq!(out.report.kept_specifiers, vec!["ui/Button".to_string()]);
        assert!(!out.changed());
    }

    #[test]
    fn test_rewrite_specifier_matches_source_rewrite() {
        let runtime = MemoryRuntime::new("/project").with_files(["src/ui/Button.ios.js"]);
        let r = rewriter(runtime, PlatformOptions::new(true, "ios"), MissingVariant::Error);

        assert_eq!(
            r.rewrite_specifier("ui/Button", &home()).unwrap().as_deref(),
            Some("../ui/Button.ios.js")
        );
        assert_eq!(r.rewrite_specifier("react", &home()).unwrap(), None);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let r = rewriter(
            MemoryRuntime::new("/project"),
            PlatformOptions::disabled(),
            MissingVariant::Error,
        );
        let err = r.rewrite_source(&home(), "import { a from 'b';").unwrap_err();
        assert!(matches!(err, TransformError::Parse { .. }));
    }

    #[test]
    fn test_typescript_source_type_from_extension() {
        let r = rewriter(
            MemoryRuntime::new("/project"),
            PlatformOptions::disabled(),
            MissingVariant::Error,
        );
        let code = "import type { Props } from 'components/Button';\nconst n: number = 1;\n";

        let out = r
            .rewrite_source(Path::new("/project/src/pages/Home.ts"), code)
            .unwrap();
        assert_eq!(
            out.code,
            "import type { Props } from '../components/Button';\nconst n: number = 1;\n"
        );
    }

    #[test]
    fn test_rewrite_file_reads_through_runtime() {
        let runtime = MemoryRuntime::new("/project")
            .with_file("src/pages/Home.js", "export * from \"components\";\n");
        let r = rewriter(runtime, PlatformOptions::disabled(), MissingVariant::Error);

        let out = r.rewrite_file(&home()).unwrap();
        assert_eq!(out.code, "export * from \"../components\";\n");
        assert_eq!(out.report.rewritten_specifiers[0].kind, SpecifierKind::Export);
    }

    #[test]
    fn test_rewrite_file_missing() {
        let r = rewriter(
            MemoryRuntime::new("/project"),
            PlatformOptions::disabled(),
            MissingVariant::Error,
        );
        let err = r.rewrite_file(&home()).unwrap_err();
        assert!(matches!(err, TransformError::Resolve(modmap::Error::Runtime(_))));
    }
}
