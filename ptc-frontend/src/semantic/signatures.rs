//! Function signature table
//!
//! Lives for one translation pass. Definitions register their signature
//! before their body is translated, so recursive calls resolve; calls to
//! functions that are not registered (yet) fall back to
//! [`InferredType::FALLBACK`].

use log::{debug, warn};
use ptc_codegen::CType;
use ptc_common::InferredType;
use serde::Serialize;
use std::collections::HashMap;

/// How a function's return type was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnSource {
    /// From the return annotation
    Declared,
    /// From a Float-producing return statement
    Inferred,
    /// No evidence either way, Integer assumed
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSignature {
    pub name: String,
    pub ty: InferredType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<ParamSignature>,
    pub return_type: InferredType,
    /// False for functions that never return a value; those are emitted as `void`
    pub returns_value: bool,
    pub source: ReturnSource,
}

impl FunctionSignature {
    pub fn c_return_type(&self) -> CType {
        if self.returns_value {
            self.return_type.into()
        } else {
            CType::Void
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FunctionSignatureTable {
    #[serde(skip)]
    by_name: HashMap<String, usize>,
    signatures: Vec<FunctionSignature>,
}

impl FunctionSignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the signature for `signature.name`
    pub fn register(&mut self, signature: FunctionSignature) -> Option<FunctionSignature> {
        debug!(
            "register {}({}) -> {} ({:?})",
            signature.name,
            signature.params.iter().map(|p| p.ty.c_name()).collect::<Vec<_>>().join(", "),
            signature.c_return_type(),
            signature.source
        );
        match self.by_name.get(&signature.name) {
            Some(&index) => Some(std::mem::replace(&mut self.signatures[index], signature)),
            None => {
                self.by_name.insert(signature.name.clone(), self.signatures.len());
                self.signatures.push(signature);
                None
            }
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&FunctionSignature> {
        self.by_name.get(name).map(|&index| &self.signatures[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether a call to `func` with `arg_count` arguments is the conversion
    /// builtin `builtin` rather than a user function of the same name
    pub fn is_builtin_conversion(&self, func: &str, arg_count: usize, builtin: &str) -> bool {
        func == builtin && arg_count == 1 && !self.contains(func)
    }

    /// Return type for a call site; unknown names get the logged fallback
    pub fn return_type_of(&self, name: &str) -> InferredType {
        match self.resolve(name) {
            Some(signature) => signature.return_type,
            None => {
                warn!("return type of '{}' is unknown, assuming {}", name, InferredType::FALLBACK);
                InferredType::FALLBACK
            }
        }
    }

    /// Signatures in registration order
    pub fn iter(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
