//! Locates module specifier string literals in a parsed program.

use oxc_ast::ast::{
    Argument, CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportExpression, StringLiteral,
};
use oxc_ast_visit::{Visit, walk};
use oxc_span::Span;

/// How a specifier was referenced in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecifierKind {
    /// `import ... from "x"` or `import "x"`
    Import,
    /// `export ... from "x"` or `export * from "x"`
    Export,
    /// `import("x")`
    DynamicImport,
    /// `require("x")`, `require.<member>("x")` or `require["<member>"]("x")`
    Require,
}

/// A specifier literal and where it sits in the source text.
///
/// `span` covers the surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierSite {
    pub kind: SpecifierKind,
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Default)]
pub(crate) struct SpecifierCollector {
    pub sites: Vec<SpecifierSite>,
}

impl SpecifierCollector {
    fn push(&mut self, kind: SpecifierKind, literal: &StringLiteral<'_>) {
        self.sites.push(SpecifierSite {
            kind,
            value: literal.value.to_string(),
            span: literal.span,
        });
    }
}

impl<'a> Visit<'a> for SpecifierCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.push(SpecifierKind::Import, &decl.source);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.push(SpecifierKind::Export, &decl.source);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.push(SpecifierKind::Export, source);
        }
        // `export const x = require("y")` still carries a call to visit.
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        if let Expression::StringLiteral(literal) = &expr.source {
            self.push(SpecifierKind::DynamicImport, literal);
        }
        walk::walk_import_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if is_require_callee(&call.callee) {
            if let Some(Argument::StringLiteral(literal)) = call.arguments.first() {
                self.push(SpecifierKind::Require, literal);
            }
        }
        walk::walk_call_expression(self, call);
    }
}

fn is_require_callee(callee: &Expression<'_>) -> bool {
    match callee {
        Expression::Identifier(ident) => ident.name.as_str() == "require",
        Expression::StaticMemberExpression(member) => is_require_object(&member.object),
        Expression::ComputedMemberExpression(member) => is_require_object(&member.object),
        _ => false,
    }
}

fn is_require_object(object: &Expression<'_>) -> bool {
    matches!(object, Expression::Identifier(ident) if ident.name.as_str() == "require")
}
