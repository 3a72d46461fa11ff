//! Operator definitions
//!
//! Operator names follow the ones the external front-end emits
//! (`"Add"`, `"LtE"`, `"USub"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary arithmetic and bitwise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOperator {
    // Arithmetic
    Add, Sub, Mult, Div, Mod, FloorDiv, Pow,

    // Bitwise
    LShift, RShift, BitOr, BitXor, BitAnd,
}

impl BinOperator {
    /// The four operators with a direct C counterpart
    pub fn is_supported(&self) -> bool {
        matches!(self, BinOperator::Add | BinOperator::Sub | BinOperator::Mult | BinOperator::Div)
    }
}

impl fmt::Display for BinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            BinOperator::Add => "+",
            BinOperator::Sub => "-",
            BinOperator::Mult => "*",
            BinOperator::Div => "/",
            BinOperator::Mod => "%",
            BinOperator::FloorDiv => "//",
            BinOperator::Pow => "**",
            BinOperator::LShift => "<<",
            BinOperator::RShift => ">>",
            BinOperator::BitOr => "|",
            BinOperator::BitXor => "^",
            BinOperator::BitAnd => "&",
        };
        write!(f, "{}", op_str)
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOperator {
    Eq, NotEq, Lt, LtE, Gt, GtE,
}

impl fmt::Display for CmpOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            CmpOperator::Eq => "==",
            CmpOperator::NotEq => "!=",
            CmpOperator::Lt => "<",
            CmpOperator::LtE => "<=",
            CmpOperator::Gt => ">",
            CmpOperator::GtE => ">=",
        };
        write!(f, "{}", op_str)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    USub,
    UAdd,
    Not,
    Invert,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            UnaryOperator::USub => "-",
            UnaryOperator::UAdd => "+",
            UnaryOperator::Not => "not ",
            UnaryOperator::Invert => "~",
        };
        write!(f, "{}", op_str)
    }
}
