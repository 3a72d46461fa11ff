//! Typed numeric translator - Frontend
//!
//! This crate provides the translation engine:
//! - AST: the input tree produced by the external front-end
//! - Semantic: scope table, function signature table, return type inference
//! - Translate: expression and statement translation into C
//! - Config: translation settings

pub mod ast;
pub mod semantic;
pub mod translate;
pub mod config;

pub use ast::{
    BinOperator, CmpOperator, ConstantValue, Expr, ExprKind, FunctionDef, Module, Param, Stmt, StmtKind,
    UnaryOperator,
};
pub use config::TranslateConfig;
pub use semantic::{FunctionSignature, FunctionSignatureTable, ReturnSource, ScopeTable, SemanticError};
pub use translate::{Fragment, Translation, Translator};

use ptc_common::CompilerError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Decode the serialized input tree.
    ///
    /// JSON nesting is capped by serde_json's recursion limit of 128 levels.
    /// A left-deep operator chain uses one level per operator, plus three for
    /// the module, its body and the enclosing statement; anything deeper is
    /// a [`CompilerError::ParseError`].
    pub fn load_module(json: &str) -> Result<Module, CompilerError> {
        let module = serde_json::from_str(json)?;
        Ok(module)
    }

    /// Translate a module into a complete C program
    pub fn translate(module: &Module, config: &TranslateConfig) -> Translation {
        Translator::new(config).translate(module)
    }

    /// Decode and translate in one step
    pub fn translate_json(json: &str, config: &TranslateConfig) -> Result<Translation, CompilerError> {
        let module = Self::load_module(json)?;
        Ok(Self::translate(&module, config))
    }
}
