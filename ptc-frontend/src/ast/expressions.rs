//! Expression nodes of the input tree

use super::ops::{BinOperator, CmpOperator, UnaryOperator};
use super::{is_unknown, node_header};
use ptc_common::SourceLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(default, skip_serializing_if = "is_unknown")]
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum ExprKind {
    /// Arithmetic or bitwise operation
    BinOp {
        left: Box<Expr>,
        op: BinOperator,
        right: Box<Expr>,
    },

    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },

    /// Single (non-chained) comparison
    Compare {
        left: Box<Expr>,
        op: CmpOperator,
        right: Box<Expr>,
    },

    /// Call of a plain function name
    Call {
        func: String,
        #[serde(default)]
        args: Vec<Expr>,
    },

    /// Variable reference
    Name { id: String },

    Constant {
        #[serde(default)]
        value: ConstantValue,
    },

    /// Any node kind outside the subset, kept by name
    Unsupported { kind: String },
}

impl ExprKind {
    const TAGS: &'static [&'static str] =
        &["BinOp", "UnaryOp", "Compare", "Call", "Name", "Constant", "Unsupported"];

    /// Node kind name as the front-end spells it
    pub fn name(&self) -> &str {
        match self {
            ExprKind::BinOp { .. } => "BinOp",
            ExprKind::UnaryOp { .. } => "UnaryOp",
            ExprKind::Compare { .. } => "Compare",
            ExprKind::Call { .. } => "Call",
            ExprKind::Name { .. } => "Name",
            ExprKind::Constant { .. } => "Constant",
            ExprKind::Unsupported { kind } => kind,
        }
    }
}

/// Literal payload of a `Constant` node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    #[default]
    None,
}

impl Expr {
    pub fn new(kind: ExprKind, loc: SourceLocation) -> Self {
        Self { kind, loc }
    }
}

impl TryFrom<Value> for Expr {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let (tag, loc) = node_header(&value)?;
        let kind = if ExprKind::TAGS.contains(&tag.as_str()) {
            serde_json::from_value(value).map_err(|e| format!("malformed {} expression: {}", tag, e))?
        } else {
            ExprKind::Unsupported { kind: tag }
        };
        Ok(Expr { kind, loc })
    }
}
