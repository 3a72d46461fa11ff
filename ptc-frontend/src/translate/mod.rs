//! Translation of an input module into C
//!
//! Function definitions are translated in source order. Each one has its
//! signature inferred and registered before its body is visited, then gets a
//! fresh [`ScopeTable`]. Top-level statements other than definitions are
//! collected and translated last, into the body of the synthesized
//! `int main(void)`.

pub mod expressions;
pub mod statements;

pub use expressions::ExpressionTranslator;
pub use statements::{hoist_declarations, StatementTranslator};

use crate::ast::{CmpOperator, ConstantValue, ExprKind, FunctionDef, Module, Stmt, StmtKind};
use crate::config::TranslateConfig;
use crate::semantic::{
    infer_return_type, FunctionSignature, FunctionSignatureTable, ParamSignature, ScopeTable, SemanticError,
};
use log::{debug, info, warn};
use ptc_codegen::{emit_program, sanitize_identifier, CExpr, CFunction, CItem, CParam, CProgram, CStmt, CType};
use ptc_common::{Diagnostic, DiagnosticKind, ErrorReporter, InferredType, Severity, SourceLocation};
use std::collections::HashMap;

/// C function the output primitive lowers to
pub const OUTPUT_SYMBOL: &str = "printf";
/// Conversion builtin lowered to an `int` cast
pub const INT_BUILTIN: &str = "int";
/// Conversion builtin lowered to a `float` cast
pub const FLOAT_BUILTIN: &str = "float";

/// Name of the synthesized entry point
const C_ENTRY_POINT: &str = "main";
/// Label used in diagnostics for module-level code
const MODULE_LABEL: &str = "<module>";

/// A translated expression and the type it evaluates to
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub expr: CExpr,
    pub ty: InferredType,
}

impl Fragment {
    pub fn new(expr: CExpr, ty: InferredType) -> Self {
        Self { expr, ty }
    }

    /// Rendered C text
    pub fn text(&self) -> String {
        self.expr.to_string()
    }
}

/// Result of one translation pass
#[derive(Debug, Clone)]
pub struct Translation {
    /// The complete C program
    pub code: String,
    pub program: CProgram,
    pub signatures: FunctionSignatureTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Translation {
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Constructs replaced by placeholders
    pub fn unsupported_count(&self) -> usize {
        self.count_of(DiagnosticKind::UnsupportedNodeKind)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }
}

/// C name for a source function, with the entry routine renamed
pub fn c_function_name(config: &TranslateConfig, name: &str) -> String {
    if name == config.entry_function {
        config.entry_symbol.clone()
    } else {
        sanitize_identifier(name)
    }
}

/// Owns the pass-wide state of one translation
pub struct Translator<'c> {
    config: &'c TranslateConfig,
    signatures: FunctionSignatureTable,
    reporter: ErrorReporter,
}

impl<'c> Translator<'c> {
    pub fn new(config: &'c TranslateConfig) -> Self {
        Self {
            config,
            signatures: FunctionSignatureTable::new(),
            reporter: ErrorReporter::new(),
        }
    }

    pub fn translate(mut self, module: &Module) -> Translation {
        let mut items = Vec::new();
        let mut defined: HashMap<&str, (usize, SourceLocation)> = HashMap::new();
        let mut top_level = Vec::new();

        for stmt in &module.body {
            match &stmt.kind {
                StmtKind::FunctionDef(func) => {
                    // A later definition rebinds the name; only the last one is emitted
                    if let Some((index, earlier)) = defined.insert(func.name.as_str(), (items.len(), stmt.loc)) {
                        warn!("'{}' redefined at {}, dropping the definition at {}", func.name, stmt.loc, earlier);
                        self.reporter
                            .warning(
                                DiagnosticKind::Redefinition,
                                format!("function '{}' is defined more than once", func.name),
                                stmt.loc,
                            )
                            .notes
                            .push(format!("the earlier definition at {} is dropped", earlier));
                        items[index] = None;
                    }
                    items.push(Some(self.translate_function(func, stmt.loc)));
                }
                _ => top_level.push(stmt),
            }
        }

        let entry = self.translate_entry(&top_level);
        let program = CProgram {
            includes: self.config.includes.clone(),
            items: items.into_iter().flatten().collect(),
            entry,
        };
        let code = emit_program(&program, &self.config.emit_options());

        info!(
            "translated {} function(s): {}",
            self.signatures.len(),
            self.reporter.summary()
        );

        Translation {
            code,
            program,
            signatures: self.signatures,
            diagnostics: self.reporter.into_diagnostics(),
        }
    }

    fn translate_function(&mut self, func: &FunctionDef, loc: SourceLocation) -> CItem {
        debug!("translating function '{}' at {}", func.name, loc);

        let mut params = Vec::with_capacity(func.params.len());
        for param in &func.params {
            let ty = self.annotation_type(param.annotation.as_deref(), &param.name, loc).unwrap_or_else(|| {
                debug!(
                    "parameter '{}' of '{}' has no usable annotation, assuming {}",
                    param.name,
                    func.name,
                    InferredType::FALLBACK
                );
                InferredType::FALLBACK
            });
            params.push(ParamSignature { name: param.name.clone(), ty });
        }

        let (inference, unknown_annotation) = infer_return_type(func, &self.signatures, FLOAT_BUILTIN);
        if let Some(annotation) = unknown_annotation {
            self.reporter.warning(
                DiagnosticKind::UnknownAnnotation,
                format!("return annotation '{}' of '{}' is not a numeric type", annotation, func.name),
                loc,
            );
        }

        let signature = FunctionSignature {
            name: func.name.clone(),
            params,
            return_type: inference.return_type,
            returns_value: inference.returns_value,
            source: inference.source,
        };
        let return_type = signature.c_return_type();
        let c_params: Vec<CParam> = signature
            .params
            .iter()
            .map(|p| CParam { ty: p.ty.into(), name: sanitize_identifier(&p.name) })
            .collect();

        let mut scope = ScopeTable::new();
        for param in &signature.params {
            scope.declare_or_get(&param.name, param.ty);
        }
        // Registered before the body so recursive calls resolve
        self.signatures.register(signature);

        let mut statements = StatementTranslator {
            scope: &mut scope,
            signatures: &self.signatures,
            reporter: &mut self.reporter,
            config: self.config,
        };

        match statements.translate_all(&func.body) {
            Ok(body) => CItem::Function(CFunction {
                return_type,
                name: c_function_name(self.config, &func.name),
                params: c_params,
                body: hoist_declarations(body, &scope.hoisted()),
            }),
            Err(err) => CItem::Comment(self.abandon(&func.name, err)),
        }
    }

    fn translate_entry(&mut self, top_level: &[&Stmt]) -> CFunction {
        let mut statements_to_run = Vec::new();
        for stmt in top_level {
            match main_guard(stmt) {
                Some((body, orelse)) => {
                    debug!("inlining __main__ guard at {}", stmt.loc);
                    if let Some(first) = orelse.first() {
                        warn!("dropping the else branch of the __main__ guard at {}", first.loc);
                        self.reporter.warning(
                            DiagnosticKind::UnsupportedNodeKind,
                            "else branch of the __main__ guard never runs and is not translated".to_string(),
                            first.loc,
                        );
                    }
                    statements_to_run.extend(body.iter());
                }
                None => statements_to_run.push(*stmt),
            }
        }

        let mut body = if statements_to_run.is_empty() {
            self.entry_call()
        } else {
            let mut scope = ScopeTable::new();
            let mut statements = StatementTranslator {
                scope: &mut scope,
                signatures: &self.signatures,
                reporter: &mut self.reporter,
                config: self.config,
            };
            match statements.translate_all(statements_to_run) {
                Ok(body) => hoist_declarations(body, &scope.hoisted()),
                Err(err) => vec![CStmt::Comment(self.abandon(MODULE_LABEL, err))],
            }
        };
        body.push(CStmt::Return(Some(CExpr::IntLiteral(0))));

        CFunction {
            return_type: CType::Int,
            name: C_ENTRY_POINT.to_string(),
            params: Vec::new(),
            body,
        }
    }

    /// With no module-level statements, the entry point runs the entry routine
    fn entry_call(&self) -> Vec<CStmt> {
        match self.signatures.resolve(&self.config.entry_function) {
            Some(signature) if signature.params.is_empty() => {
                vec![CStmt::Expr(CExpr::call(self.config.entry_symbol.clone(), Vec::new()))]
            }
            Some(_) => {
                warn!("'{}' takes parameters, not calling it from main", self.config.entry_function);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Record an aborted unit and produce the marker left in its place
    fn abandon(&mut self, unit: &str, err: SemanticError) -> String {
        warn!("abandoning translation of '{}': {}", unit, err);
        self.reporter.report(err.to_diagnostic(unit));
        format!("{} not translated: {}", unit, err)
    }

    fn annotation_type(&mut self, annotation: Option<&str>, name: &str, loc: SourceLocation) -> Option<InferredType> {
        let annotation = annotation?;
        let ty = InferredType::from_annotation(annotation);
        if ty.is_none() {
            self.reporter.warning(
                DiagnosticKind::UnknownAnnotation,
                format!("annotation '{}' on '{}' is not a numeric type", annotation, name),
                loc,
            );
        }
        ty
    }
}

/// Body and else branch of an `if __name__ == "__main__":` block
fn main_guard(stmt: &Stmt) -> Option<(&[Stmt], &[Stmt])> {
    let StmtKind::If { test, body, orelse } = &stmt.kind else {
        return None;
    };
    let ExprKind::Compare { left, op: CmpOperator::Eq, right } = &test.kind else {
        return None;
    };

    let is_name = |kind: &ExprKind| matches!(kind, ExprKind::Name { id } if id == "__name__");
    let is_main = |kind: &ExprKind| {
        matches!(kind, ExprKind::Constant { value: ConstantValue::Str(s) } if s == "__main__")
    };

    if (is_name(&left.kind) && is_main(&right.kind)) || (is_main(&left.kind) && is_name(&right.kind)) {
        Some((body, orelse))
    } else {
        None
    }
}
