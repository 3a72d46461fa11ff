//! Statement nodes, function definitions and the module root

use super::expressions::Expr;
use super::{is_unknown, node_header};
use ptc_common::SourceLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Statement node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Stmt {
    #[serde(flatten)]
    pub kind: StmtKind,
    #[serde(default, skip_serializing_if = "is_unknown")]
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum StmtKind {
    FunctionDef(FunctionDef),

    /// Single-target assignment; `annotation` is set for annotated assignments
    Assign {
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        annotation: Option<String>,
        value: Expr,
    },

    Return {
        #[serde(default)]
        value: Option<Expr>,
    },

    If {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },

    /// Expression statement
    Expr { value: Expr },

    Pass,

    /// Any statement kind outside the subset, kept by name
    Unsupported { kind: String },
}

impl StmtKind {
    const TAGS: &'static [&'static str] =
        &["FunctionDef", "Assign", "Return", "If", "Expr", "Pass", "Unsupported"];

    pub fn name(&self) -> &str {
        match self {
            StmtKind::FunctionDef(_) => "FunctionDef",
            StmtKind::Assign { .. } => "Assign",
            StmtKind::Return { .. } => "Return",
            StmtKind::If { .. } => "If",
            StmtKind::Expr { .. } => "Expr",
            StmtKind::Pass => "Pass",
            StmtKind::Unsupported { kind } => kind,
        }
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    /// Declared return annotation (`-> float`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    pub body: Vec<Stmt>,
}

/// Function parameter with an optional annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// Root of the input tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub body: Vec<Stmt>,
}

impl Stmt {
    pub fn new(kind: StmtKind, loc: SourceLocation) -> Self {
        Self { kind, loc }
    }
}

impl TryFrom<Value> for Stmt {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let (tag, loc) = node_header(&value)?;
        let kind = if StmtKind::TAGS.contains(&tag.as_str()) {
            serde_json::from_value(value).map_err(|e| format!("malformed {} statement: {}", tag, e))?
        } else {
            StmtKind::Unsupported { kind: tag }
        };
        Ok(Stmt { kind, loc })
    }
}

impl Module {
    /// Function definitions at the top level, in source order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.body.iter().filter_map(|stmt| match &stmt.kind {
            StmtKind::FunctionDef(func) => Some(func),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;

    #[test]
    fn test_decode_function() {
        let json = r#"{
            "node": "FunctionDef",
            "name": "area",
            "params": [{"name": "radius", "annotation": "float"}],
            "returns": "float",
            "loc": {"line": 3, "column": 0},
            "body": [
                {"node": "Return", "value": {"node": "Name", "id": "radius"}}
            ]
        }"#;
        let stmt: Stmt = serde_json::from_str(json).unwrap();
        assert_eq!(stmt.loc, SourceLocation::new(3, 0));
        let StmtKind::FunctionDef(func) = stmt.kind else {
            panic!("Expected FunctionDef");
        };
        assert_eq!(func.name, "area");
        assert_eq!(func.params[0].annotation.as_deref(), Some("float"));
        assert_eq!(func.returns.as_deref(), Some("float"));
        assert_eq!(func.body.len(), 1);
    }

    #[test]
    fn test_optional_fields_default() {
        let stmt: Stmt = serde_json::from_str(r#"{"node": "Return"}"#).unwrap();
        assert_eq!(stmt.kind, StmtKind::Return { value: None });

        let stmt: Stmt = serde_json::from_str(
            r#"{"node": "If", "test": {"node": "Name", "id": "x"}, "body": [{"node": "Pass"}]}"#,
        )
        .unwrap();
        let StmtKind::If { test, body, orelse } = stmt.kind else {
            panic!("Expected If");
        };
        assert_eq!(test.kind, ExprKind::Name { id: "x".to_string() });
        assert_eq!(body[0].kind, StmtKind::Pass);
        assert!(orelse.is_empty());
    }

    #[test]
    fn test_unsupported_statement() {
        let module: Module =
            serde_json::from_str(r#"{"body": [{"node": "While", "test": {}, "body": []}]}"#).unwrap();
        assert_eq!(module.body[0].kind, StmtKind::Unsupported { kind: "While".to_string() });
    }

    #[test]
    fn test_malformed_known_node_is_an_error() {
        let err = serde_json::from_str::<Stmt>(r#"{"node": "Assign", "target": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("malformed Assign statement"));
    }
}
