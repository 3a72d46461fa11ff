//! Return type inference for function definitions
//!
//! A declared annotation wins. Otherwise the body's return statements are
//! walked depth-first in textual order and the first one that visibly
//! produces a Float decides; a Float literal or a call to a function already
//! registered as Float counts. Anything else leaves the function Integer.
//! This is deliberately approximate: a function returning Integer on one
//! path and Float on another gets whichever Float return the walk meets.

use crate::ast::{ConstantValue, Expr, ExprKind, FunctionDef, Stmt, StmtKind, UnaryOperator};
use crate::semantic::signatures::{FunctionSignatureTable, ReturnSource};
use log::debug;
use ptc_common::InferredType;

/// Outcome of inferring one function's return type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnInference {
    pub return_type: InferredType,
    pub returns_value: bool,
    pub source: ReturnSource,
}

/// Annotation spelling that marks a function as returning nothing
const NO_VALUE_ANNOTATION: &str = "None";

/// Infer the return type of `func`.
///
/// `float_builtin` names the conversion builtin whose result is Float. An
/// annotation that is neither a known type nor `None` is ignored for the
/// inference and handed back so the caller can report it.
pub fn infer_return_type(
    func: &FunctionDef,
    signatures: &FunctionSignatureTable,
    float_builtin: &str,
) -> (ReturnInference, Option<String>) {
    let returns_value = body_returns_value(&func.body);
    let mut unknown_annotation = None;

    if let Some(annotation) = &func.returns {
        if annotation.trim() == NO_VALUE_ANNOTATION {
            return (
                ReturnInference {
                    return_type: InferredType::FALLBACK,
                    returns_value: false,
                    source: ReturnSource::Declared,
                },
                None,
            );
        }
        match InferredType::from_annotation(annotation) {
            Some(return_type) => {
                return (
                    ReturnInference { return_type, returns_value: true, source: ReturnSource::Declared },
                    None,
                );
            }
            None => unknown_annotation = Some(annotation.clone()),
        }
    }

    let inference = if has_float_return(&func.body, signatures, float_builtin) {
        ReturnInference {
            return_type: InferredType::Float,
            returns_value,
            source: ReturnSource::Inferred,
        }
    } else {
        if returns_value {
            debug!("no Float return found in '{}', defaulting to {}", func.name, InferredType::FALLBACK);
        }
        ReturnInference {
            return_type: InferredType::FALLBACK,
            returns_value,
            source: ReturnSource::Default,
        }
    };
    (inference, unknown_annotation)
}

/// Whether any `return <value>` occurs in the body (nested definitions excluded)
pub fn body_returns_value(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| match &stmt.kind {
        StmtKind::Return { value } => value.is_some(),
        StmtKind::If { body, orelse, .. } => body_returns_value(body) || body_returns_value(orelse),
        _ => false,
    })
}

fn has_float_return(body: &[Stmt], signatures: &FunctionSignatureTable, float_builtin: &str) -> bool {
    body.iter().any(|stmt| match &stmt.kind {
        StmtKind::Return { value: Some(value) } => produces_float(value, signatures, float_builtin),
        StmtKind::If { body, orelse, .. } => {
            has_float_return(body, signatures, float_builtin)
                || has_float_return(orelse, signatures, float_builtin)
        }
        _ => false,
    })
}

fn produces_float(expr: &Expr, signatures: &FunctionSignatureTable, float_builtin: &str) -> bool {
    match &expr.kind {
        ExprKind::Constant { value: ConstantValue::Float(_) } => true,
        ExprKind::UnaryOp { op: UnaryOperator::USub | UnaryOperator::UAdd, operand } => {
            produces_float(operand, signatures, float_builtin)
        }
        ExprKind::Call { func, args } if signatures.is_builtin_conversion(func, args.len(), float_builtin) => true,
        ExprKind::Call { func, .. } => signatures
            .resolve(func)
            .is_some_and(|sig| sig.returns_value && sig.return_type.is_float()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::ast::{BinOperator, CmpOperator};
    use crate::semantic::signatures::FunctionSignature;

    fn function(stmt: Stmt) -> FunctionDef {
        match stmt.kind {
            StmtKind::FunctionDef(func) => func,
            other => panic!("Expected FunctionDef, got {:?}", other),
        }
    }

    fn infer(stmt: Stmt, signatures: &FunctionSignatureTable) -> ReturnInference {
        infer_return_type(&function(stmt), signatures, "float").0
    }

    #[test]
    fn test_integral_returns_infer_integer() {
        let func = def(
            "sign",
            &["x"],
            vec![
                if_else(compare(name("x"), CmpOperator::Lt, int(0)), vec![ret(int(-1))], vec![]),
                ret(int(1)),
            ],
        );
        let inference = infer(func, &FunctionSignatureTable::new());
        assert_eq!(inference.return_type, InferredType::Integer);
        assert_eq!(inference.source, ReturnSource::Default);
        assert!(inference.returns_value);
    }

    #[test]
    fn test_float_literal_return_infers_float() {
        let func = def(
            "f",
            &["x"],
            vec![if_else(
                compare(name("x"), CmpOperator::LtE, int(0)),
                vec![ret(int(0))],
                vec![ret(float(0.5))],
            )],
        );
        let inference = infer(func, &FunctionSignatureTable::new());
        assert_eq!(inference.return_type, InferredType::Float);
        assert_eq!(inference.source, ReturnSource::Inferred);
    }

    #[test]
    fn test_call_return_resolves_through_table() {
        let mut signatures = FunctionSignatureTable::new();
        signatures.register(FunctionSignature {
            name: "area".to_string(),
            params: vec![],
            return_type: InferredType::Float,
            returns_value: true,
            source: ReturnSource::Declared,
        });

        let wrapper = def("wrapper", &[], vec![ret(call("area", vec![]))]);
        assert_eq!(infer(wrapper, &signatures).return_type, InferredType::Float);

        let unknown = def("other", &[], vec![ret(call("missing", vec![]))]);
        assert_eq!(infer(unknown, &signatures).return_type, InferredType::Integer);
    }

    #[test]
    fn test_declared_annotation_wins() {
        let func = typed_def("divide", &[("a", "float"), ("b", "float")], Some("float"), vec![ret(int(0))]);
        let inference = infer(func, &FunctionSignatureTable::new());
        assert_eq!(inference.return_type, InferredType::Float);
        assert_eq!(inference.source, ReturnSource::Declared);

        let func = typed_def("g", &[], Some("int"), vec![ret(float(1.5))]);
        assert_eq!(infer(func, &FunctionSignatureTable::new()).return_type, InferredType::Integer);
    }

    #[test]
    fn test_no_value_returned_is_void() {
        let func = def("show", &["x"], vec![expr_stmt(call("print", vec![name("x")])), bare_return()]);
        assert!(!infer(func, &FunctionSignatureTable::new()).returns_value);

        let func = typed_def("noop", &[], Some("None"), vec![stmt(StmtKind::Pass)]);
        let inference = infer(func, &FunctionSignatureTable::new());
        assert!(!inference.returns_value);
        assert_eq!(inference.source, ReturnSource::Declared);
    }

    #[test]
    fn test_unknown_annotation_is_reported_and_ignored() {
        let func = typed_def("s", &[], Some("str"), vec![ret(binop(int(1), BinOperator::Add, int(2)))]);
        let (inference, unknown) = infer_return_type(&function(func), &FunctionSignatureTable::new(), "float");
        assert_eq!(unknown.as_deref(), Some("str"));
        assert_eq!(inference.return_type, InferredType::Integer);
    }

    #[test]
    fn test_float_conversion_and_negative_literal() {
        let func = def("h", &["x"], vec![ret(call("float", vec![name("x")]))]);
        assert_eq!(infer(func, &FunctionSignatureTable::new()).return_type, InferredType::Float);

        let func = def("k", &[], vec![ret(unary(UnaryOperator::USub, float(2.0)))]);
        assert_eq!(infer(func, &FunctionSignatureTable::new()).return_type, InferredType::Float);
    }

    #[test]
    fn test_float_call_counts_only_when_it_is_the_builtin() {
        let func = def("h", &["x", "y"], vec![ret(call("float", vec![name("x"), name("y")]))]);
        assert_eq!(infer(func, &FunctionSignatureTable::new()).return_type, InferredType::Integer);

        let mut signatures = FunctionSignatureTable::new();
        signatures.register(FunctionSignature {
            name: "float".to_string(),
            params: vec![],
            return_type: InferredType::Integer,
            returns_value: true,
            source: ReturnSource::Default,
        });
        let func = def("k", &["x"], vec![ret(call("float", vec![name("x")]))]);
        assert_eq!(infer(func, &signatures).return_type, InferredType::Integer);
    }
}
