//! The type lattice used by the translator
//!
//! Every expression, variable and function return is classified as one of
//! two numeric kinds. Float dominates Integer when the two are combined.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric classification inferred for expressions, variables and returns
///
/// The derived ordering is the promotion order: `Integer < Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InferredType {
    Integer,
    Float,
}

impl InferredType {
    /// Type used whenever the translator has to default instead of infer:
    /// unannotated parameters, unknown callees, unknown annotations
    pub const FALLBACK: InferredType = InferredType::Integer;

    /// Select the wider of two types
    pub fn promote(self, other: InferredType) -> InferredType {
        self.max(other)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, InferredType::Float)
    }

    /// Spelling of this type in the generated C
    pub fn c_name(&self) -> &'static str {
        match self {
            InferredType::Integer => "int",
            InferredType::Float => "float",
        }
    }

    /// printf conversion for a value of this type
    pub fn printf_conversion(&self) -> &'static str {
        match self {
            InferredType::Integer => "%d",
            InferredType::Float => "%f",
        }
    }

    /// Resolve a source annotation such as `int` or `float`
    pub fn from_annotation(annotation: &str) -> Option<InferredType> {
        match annotation.trim() {
            "int" | "bool" => Some(InferredType::Integer),
            "float" => Some(InferredType::Float),
            _ => None,
        }
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.c_name())
    }
}

/// Free-function form of [`InferredType::promote`]
pub fn promote(left: InferredType, right: InferredType) -> InferredType {
    left.promote(right)
}
