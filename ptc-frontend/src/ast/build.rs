//! Shorthand constructors for building trees in code
//!
//! Nodes built here carry the unknown location.

use super::*;
use ptc_common::SourceLocation;

pub fn name(id: &str) -> Expr {
    Expr::new(ExprKind::Name { id: id.to_string() }, SourceLocation::dummy())
}

pub fn int(value: i64) -> Expr {
    constant(ConstantValue::Int(value))
}

pub fn float(value: f64) -> Expr {
    constant(ConstantValue::Float(value))
}

pub fn constant(value: ConstantValue) -> Expr {
    Expr::new(ExprKind::Constant { value }, SourceLocation::dummy())
}

pub fn binop(left: Expr, op: BinOperator, right: Expr) -> Expr {
    Expr::new(
        ExprKind::BinOp { left: Box::new(left), op, right: Box::new(right) },
        SourceLocation::dummy(),
    )
}

pub fn unary(op: UnaryOperator, operand: Expr) -> Expr {
    Expr::new(ExprKind::UnaryOp { op, operand: Box::new(operand) }, SourceLocation::dummy())
}

pub fn compare(left: Expr, op: CmpOperator, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Compare { left: Box::new(left), op, right: Box::new(right) },
        SourceLocation::dummy(),
    )
}

pub fn call(func: &str, args: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Call { func: func.to_string(), args }, SourceLocation::dummy())
}

pub fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, SourceLocation::dummy())
}

pub fn assign(target: &str, value: Expr) -> Stmt {
    stmt(StmtKind::Assign { target: target.to_string(), annotation: None, value })
}

pub fn ann_assign(target: &str, annotation: &str, value: Expr) -> Stmt {
    stmt(StmtKind::Assign {
        target: target.to_string(),
        annotation: Some(annotation.to_string()),
        value,
    })
}

pub fn ret(value: Expr) -> Stmt {
    stmt(StmtKind::Return { value: Some(value) })
}

pub fn bare_return() -> Stmt {
    stmt(StmtKind::Return { value: None })
}

pub fn if_else(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::If { test, body, orelse })
}

pub fn expr_stmt(value: Expr) -> Stmt {
    stmt(StmtKind::Expr { value })
}

/// Function with unannotated parameters and no declared return type
pub fn def(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    let params = params
        .iter()
        .map(|p| Param { name: p.to_string(), annotation: None })
        .collect();
    stmt(StmtKind::FunctionDef(FunctionDef { name: name.to_string(), params, returns: None, body }))
}

/// Function with `(name, annotation)` parameters and an optional return annotation
pub fn typed_def(name: &str, params: &[(&str, &str)], returns: Option<&str>, body: Vec<Stmt>) -> Stmt {
    let params = params
        .iter()
        .map(|(p, ann)| Param { name: p.to_string(), annotation: Some(ann.to_string()) })
        .collect();
    stmt(StmtKind::FunctionDef(FunctionDef {
        name: name.to_string(),
        params,
        returns: returns.map(str::to_string),
        body,
    }))
}
