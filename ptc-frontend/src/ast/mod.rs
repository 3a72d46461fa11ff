//! Input tree definitions
//!
//! This module defines the already-parsed program the translator consumes.
//! The external front-end hands it over as JSON: every node is an object with
//! a `"node"` tag naming its kind and an optional `"loc"`. Node kinds outside
//! the translatable subset decode to the `Unsupported` variants instead of
//! failing, so the translator can degrade around them.

pub mod ops;
pub mod expressions;
pub mod statements;
pub mod build;

// Re-export commonly used types at module level
pub use ops::{BinOperator, CmpOperator, UnaryOperator};
pub use expressions::{ConstantValue, Expr, ExprKind};
pub use statements::{FunctionDef, Module, Param, Stmt, StmtKind};

use ptc_common::SourceLocation;
use serde_json::Value;

/// Read the kind tag and location shared by every node
fn node_header(value: &Value) -> Result<(String, SourceLocation), String> {
    let tag = value
        .get("node")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("node without a \"node\" tag: {}", value))?
        .to_string();

    let loc = match value.get("loc") {
        Some(loc) if !loc.is_null() => serde_json::from_value(loc.clone())
            .map_err(|e| format!("bad location on {} node: {}", tag, e))?,
        _ => SourceLocation::dummy(),
    };

    Ok((tag, loc))
}

fn is_unknown(loc: &SourceLocation) -> bool {
    !loc.is_known()
}
