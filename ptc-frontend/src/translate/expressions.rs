//! Expression translation
//!
//! Every expression becomes a [`Fragment`]: the C expression plus the type
//! it evaluates to. Operand types are always resolved before the enclosing
//! node is built, which is what lets binary operations decide on casts.

use super::{c_function_name, Fragment, FLOAT_BUILTIN, INT_BUILTIN, OUTPUT_SYMBOL};
use crate::ast::{BinOperator, CmpOperator, ConstantValue, Expr, ExprKind, UnaryOperator};
use crate::config::TranslateConfig;
use crate::semantic::{FunctionSignatureTable, ScopeTable, SemanticError};
use log::{debug, trace, warn};
use ptc_codegen::{sanitize_identifier, CBinaryOp, CExpr, CType, CUnaryOp};
use ptc_common::{promote, DiagnosticKind, ErrorReporter, InferredType, SourceLocation};

/// Expression translator context
pub struct ExpressionTranslator<'a> {
    pub scope: &'a mut ScopeTable,
    pub signatures: &'a FunctionSignatureTable,
    pub reporter: &'a mut ErrorReporter,
    pub config: &'a TranslateConfig,
}

impl<'a> ExpressionTranslator<'a> {
    pub fn translate(&mut self, expr: &Expr) -> Result<Fragment, SemanticError> {
        trace!("translate {} at {}", expr.kind.name(), expr.loc);
        match &expr.kind {
            ExprKind::Constant { value } => Ok(self.translate_constant(value, expr.loc)),

            ExprKind::Name { id } => {
                let ty = self.scope.lookup(id, expr.loc)?;
                Ok(Fragment::new(CExpr::Ident(sanitize_identifier(id)), ty))
            }

            ExprKind::BinOp { left, op, right } => self.translate_binop(left, *op, right, expr.loc),

            ExprKind::UnaryOp { op, operand } => self.translate_unary(*op, operand, expr.loc),

            ExprKind::Compare { left, op, right } => {
                let left = self.translate(left)?;
                let right = self.translate(right)?;
                // C relational operators yield int; no promotion takes place
                Ok(Fragment::new(
                    CExpr::binary(comparison_op(*op), left.expr, right.expr),
                    InferredType::Integer,
                ))
            }

            ExprKind::Call { func, args } => self.translate_call(func, args, expr.loc, false),

            ExprKind::Unsupported { kind } => Ok(self.unsupported(kind, expr.loc)),
        }
    }

    /// Translate an expression whose value is thrown away. Only here may a
    /// call to a function that returns nothing appear.
    pub fn translate_discarded(&mut self, expr: &Expr) -> Result<Fragment, SemanticError> {
        match &expr.kind {
            ExprKind::Call { func, args } => self.translate_call(func, args, expr.loc, true),
            _ => self.translate(expr),
        }
    }

    fn translate_constant(&mut self, value: &ConstantValue, loc: SourceLocation) -> Fragment {
        match value {
            ConstantValue::Int(n) => Fragment::new(CExpr::IntLiteral(*n), InferredType::Integer),
            ConstantValue::Float(x) => Fragment::new(CExpr::FloatLiteral(*x), InferredType::Float),
            ConstantValue::Bool(b) => Fragment::new(CExpr::IntLiteral(i64::from(*b)), InferredType::Integer),
            ConstantValue::Str(_) => self.unsupported("string constant", loc),
            ConstantValue::None => self.unsupported("None constant", loc),
        }
    }

    fn translate_binop(
        &mut self,
        left: &Expr,
        op: BinOperator,
        right: &Expr,
        loc: SourceLocation,
    ) -> Result<Fragment, SemanticError> {
        let left = self.translate(left)?;
        let right = self.translate(right)?;
        let ty = promote(left.ty, right.ty);

        let Some(c_op) = arithmetic_op(op) else {
            let mut fragment = self.unsupported(&format!("operator {}", op), loc);
            fragment.ty = ty;
            return Ok(fragment);
        };

        let expr = CExpr::binary(c_op, left.expr, right.expr);
        if left.ty == right.ty {
            return Ok(Fragment::new(expr, ty));
        }

        debug!("mixed {} {} {} at {}, casting to {}", left.ty, op, right.ty, loc, ty);
        Ok(Fragment::new(CExpr::cast(ty.into(), expr), ty))
    }

    fn translate_unary(
        &mut self,
        op: UnaryOperator,
        operand: &Expr,
        loc: SourceLocation,
    ) -> Result<Fragment, SemanticError> {
        let operand = self.translate(operand)?;
        let fragment = match op {
            UnaryOperator::USub => Fragment::new(CExpr::unary(CUnaryOp::Minus, operand.expr), operand.ty),
            UnaryOperator::UAdd => Fragment::new(CExpr::unary(CUnaryOp::Plus, operand.expr), operand.ty),
            UnaryOperator::Not => {
                Fragment::new(CExpr::unary(CUnaryOp::LogicalNot, operand.expr), InferredType::Integer)
            }
            UnaryOperator::Invert if operand.ty == InferredType::Integer => {
                Fragment::new(CExpr::unary(CUnaryOp::BitNot, operand.expr), InferredType::Integer)
            }
            UnaryOperator::Invert => self.unsupported("operator ~ on float", loc),
        };
        Ok(fragment)
    }

    fn translate_call(
        &mut self,
        func: &str,
        args: &[Expr],
        loc: SourceLocation,
        discarded: bool,
    ) -> Result<Fragment, SemanticError> {
        if func == self.config.output_function {
            return self.translate_output(args);
        }

        for (builtin, ty) in [(INT_BUILTIN, InferredType::Integer), (FLOAT_BUILTIN, InferredType::Float)] {
            if self.signatures.is_builtin_conversion(func, args.len(), builtin) {
                let operand = self.translate(&args[0])?;
                return Ok(Fragment::new(CExpr::cast(CType::from(ty), operand.expr), ty));
            }
        }

        let mut c_args = Vec::with_capacity(args.len());
        for arg in args {
            c_args.push(self.translate(arg)?.expr);
        }

        let ty = match self.signatures.resolve(func) {
            Some(signature) if !signature.returns_value && !discarded => {
                warn!("'{}' returns nothing but its result is used at {}", func, loc);
                self.reporter
                    .warning(DiagnosticKind::VoidValue, format!("'{}' does not return a value", func), loc)
                    .notes
                    .push("the call is replaced by 0".to_string());
                let placeholder = CExpr::Placeholder(format!("value of void function '{}'", func));
                return Ok(Fragment::new(placeholder, InferredType::FALLBACK));
            }
            Some(signature) => signature.return_type,
            None => {
                self.reporter
                    .warning(DiagnosticKind::UnknownCallee, format!("call to unknown function '{}'", func), loc)
                    .notes
                    .push(format!("assuming it returns {}", InferredType::FALLBACK));
                self.signatures.return_type_of(func)
            }
        };

        Ok(Fragment::new(CExpr::call(c_function_name(self.config, func), c_args), ty))
    }

    /// Lower the output primitive to `printf`, one conversion per argument
    fn translate_output(&mut self, args: &[Expr]) -> Result<Fragment, SemanticError> {
        let mut conversions = Vec::with_capacity(args.len());
        let mut values = Vec::with_capacity(args.len());

        for arg in args {
            // String literals are only meaningful as output arguments
            if let ExprKind::Constant { value: ConstantValue::Str(text) } = &arg.kind {
                conversions.push("%s");
                values.push(CExpr::StringLiteral(text.clone()));
                continue;
            }
            let fragment = self.translate(arg)?;
            conversions.push(fragment.ty.printf_conversion());
            values.push(fragment.expr);
        }

        let mut printf_args = vec![CExpr::StringLiteral(format!("{}\n", conversions.join(" ")))];
        printf_args.extend(values);
        Ok(Fragment::new(CExpr::call(OUTPUT_SYMBOL, printf_args), InferredType::Integer))
    }

    fn unsupported(&mut self, what: &str, loc: SourceLocation) -> Fragment {
        warn!("unsupported expression '{}' at {}", what, loc);
        self.reporter.warning(
            DiagnosticKind::UnsupportedNodeKind,
            format!("{} is outside the translatable subset", what),
            loc,
        );
        Fragment::new(CExpr::Placeholder(what.to_string()), InferredType::FALLBACK)
    }
}

fn arithmetic_op(op: BinOperator) -> Option<CBinaryOp> {
    match op {
        BinOperator::Add => Some(CBinaryOp::Add),
        BinOperator::Sub => Some(CBinaryOp::Sub),
        BinOperator::Mult => Some(CBinaryOp::Mul),
        BinOperator::Div => Some(CBinaryOp::Div),
        _ => None,
    }
}

fn comparison_op(op: CmpOperator) -> CBinaryOp {
    match op {
        CmpOperator::Eq => CBinaryOp::Equal,
        CmpOperator::NotEq => CBinaryOp::NotEqual,
        CmpOperator::Lt => CBinaryOp::Less,
        CmpOperator::LtE => CBinaryOp::LessEqual,
        CmpOperator::Gt => CBinaryOp::Greater,
        CmpOperator::GtE => CBinaryOp::GreaterEqual,
    }
}
