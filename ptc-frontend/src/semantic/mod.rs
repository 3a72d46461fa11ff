//! Semantic tables for the translator
//!
//! The per-function [`ScopeTable`], the pass-wide
//! [`FunctionSignatureTable`] and the return type inference that feeds it.

pub mod errors;
pub mod scope;
pub mod signatures;
pub mod returns;

pub use errors::SemanticError;
pub use returns::{infer_return_type, ReturnInference};
pub use scope::ScopeTable;
pub use signatures::{FunctionSignature, FunctionSignatureTable, ParamSignature, ReturnSource};
