//! Statement translation

use super::expressions::ExpressionTranslator;
use crate::ast::{Expr, Stmt, StmtKind};
use crate::config::TranslateConfig;
use crate::semantic::{FunctionSignatureTable, ScopeTable, SemanticError};
use log::{debug, warn};
use ptc_codegen::{sanitize_identifier, CStmt};
use ptc_common::{DiagnosticKind, ErrorReporter, InferredType, SourceLocation};

/// Statement translator context
pub struct StatementTranslator<'a> {
    pub scope: &'a mut ScopeTable,
    pub signatures: &'a FunctionSignatureTable,
    pub reporter: &'a mut ErrorReporter,
    pub config: &'a TranslateConfig,
}

impl<'a> StatementTranslator<'a> {
    /// Translate statements in order; the first unknown variable aborts
    pub fn translate_all<'s, I>(&mut self, stmts: I) -> Result<Vec<CStmt>, SemanticError>
    where
        I: IntoIterator<Item = &'s Stmt>,
    {
        let mut out = Vec::new();
        for stmt in stmts {
            self.translate(stmt, &mut out)?;
        }
        Ok(out)
    }

    /// Translate one statement, appending whatever it lowers to
    pub fn translate(&mut self, stmt: &Stmt, out: &mut Vec<CStmt>) -> Result<(), SemanticError> {
        match &stmt.kind {
            StmtKind::Assign { target, annotation, value } => {
                let assignment = self.translate_assign(target, annotation.as_deref(), value, stmt.loc)?;
                out.push(assignment);
            }

            StmtKind::Return { value } => {
                let value = match value {
                    Some(value) => Some(self.expressions().translate(value)?.expr),
                    None => None,
                };
                out.push(CStmt::Return(value));
            }

            StmtKind::If { test, body, orelse } => {
                let condition = self.expressions().translate(test)?.expr;
                let then_body = self.translate_nested(body)?;
                let else_body = if orelse.is_empty() {
                    None
                } else {
                    Some(self.translate_nested(orelse)?)
                };
                out.push(CStmt::If { condition, then_body, else_body });
            }

            StmtKind::Expr { value } => {
                let fragment = self.expressions().translate_discarded(value)?;
                out.push(CStmt::Expr(fragment.expr));
            }

            StmtKind::Pass => {}

            StmtKind::FunctionDef(func) => {
                out.push(self.unsupported(&format!("nested function '{}'", func.name), stmt.loc));
            }

            StmtKind::Unsupported { kind } => {
                out.push(self.unsupported(kind, stmt.loc));
            }
        }
        Ok(())
    }

    fn translate_nested(&mut self, body: &[Stmt]) -> Result<Vec<CStmt>, SemanticError> {
        self.scope.enter_block();
        let result = self.translate_all(body);
        self.scope.exit_block();
        result
    }

    fn translate_assign(
        &mut self,
        target: &str,
        annotation: Option<&str>,
        value: &Expr,
        loc: SourceLocation,
    ) -> Result<CStmt, SemanticError> {
        let fragment = self.expressions().translate(value)?;

        let declared = annotation.and_then(|annotation| {
            let ty = InferredType::from_annotation(annotation);
            if ty.is_none() {
                self.reporter.warning(
                    DiagnosticKind::UnknownAnnotation,
                    format!("annotation '{}' on '{}' is not a numeric type", annotation, target),
                    loc,
                );
            }
            ty
        });
        let ty = declared.unwrap_or(fragment.ty);

        let (effective, first) = self.scope.declare_or_get(target, ty);
        let name = sanitize_identifier(target);

        if first {
            debug!("declare {} {}", effective, target);
            return Ok(CStmt::Declare { ty: effective.into(), name, init: Some(fragment.expr) });
        }

        if effective != ty && self.config.warn_on_reassignment {
            self.reporter
                .warning(
                    DiagnosticKind::AmbiguousReassignment,
                    format!("'{}' is assigned a {} value", target, ty),
                    loc,
                )
                .notes
                .push(format!("'{}' keeps its first type, {}", target, effective));
        }
        Ok(CStmt::Assign { name, value: fragment.expr })
    }

    fn unsupported(&mut self, what: &str, loc: SourceLocation) -> CStmt {
        warn!("unsupported statement '{}' at {}", what, loc);
        self.reporter.warning(
            DiagnosticKind::UnsupportedNodeKind,
            format!("{} is outside the translatable subset", what),
            loc,
        );
        CStmt::Comment(format!("unsupported: {}", what))
    }

    fn expressions(&mut self) -> ExpressionTranslator<'_> {
        ExpressionTranslator {
            scope: &mut *self.scope,
            signatures: self.signatures,
            reporter: &mut *self.reporter,
            config: self.config,
        }
    }
}

/// Move declarations of hoisted variables to the top of a function body.
///
/// Each hoisted variable gets an uninitialized declaration up front and its
/// original in-block declaration becomes a plain assignment.
pub fn hoist_declarations(body: Vec<CStmt>, hoisted: &[(String, InferredType)]) -> Vec<CStmt> {
    if hoisted.is_empty() {
        return body;
    }

    let names: Vec<String> = hoisted.iter().map(|(name, _)| sanitize_identifier(name)).collect();
    let mut out: Vec<CStmt> = hoisted
        .iter()
        .map(|(name, ty)| CStmt::Declare { ty: (*ty).into(), name: sanitize_identifier(name), init: None })
        .collect();
    out.extend(demote_declarations(body, &names));
    out
}

fn demote_declarations(body: Vec<CStmt>, names: &[String]) -> Vec<CStmt> {
    body.into_iter()
        .filter_map(|stmt| match stmt {
            CStmt::Declare { name, init, .. } if names.contains(&name) => {
                init.map(|value| CStmt::Assign { name, value })
            }
            CStmt::If { condition, then_body, else_body } => Some(CStmt::If {
                condition,
                then_body: demote_declarations(then_body, names),
                else_body: else_body.map(|body| demote_declarations(body, names)),
            }),
            other => Some(other),
        })
        .collect()
}
