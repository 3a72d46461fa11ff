//! C Intermediate Representation
//!
//! The translator builds these nodes instead of concatenating strings. An
//! expression renders to a single line through `Display`; statements and
//! functions are laid out by the [`Emitter`](crate::emit::Emitter).

use ptc_common::InferredType;
use std::fmt;

/// C types the translator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CType {
    Int,
    Float,
    Void,
}

impl From<InferredType> for CType {
    fn from(ty: InferredType) -> Self {
        match ty {
            InferredType::Integer => CType::Int,
            InferredType::Float => CType::Float,
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CType::Int => write!(f, "int"),
            CType::Float => write!(f, "float"),
            CType::Void => write!(f, "void"),
        }
    }
}

/// Binary operators of the generated C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CBinaryOp {
    // Arithmetic
    Add, Sub, Mul, Div,

    // Comparison
    Equal, NotEqual, Less, LessEqual, Greater, GreaterEqual,
}

impl fmt::Display for CBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            CBinaryOp::Add => "+",
            CBinaryOp::Sub => "-",
            CBinaryOp::Mul => "*",
            CBinaryOp::Div => "/",
            CBinaryOp::Equal => "==",
            CBinaryOp::NotEqual => "!=",
            CBinaryOp::Less => "<",
            CBinaryOp::LessEqual => "<=",
            CBinaryOp::Greater => ">",
            CBinaryOp::GreaterEqual => ">=",
        };
        write!(f, "{}", op_str)
    }
}

/// Unary operators of the generated C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CUnaryOp {
    Plus,
    Minus,
    LogicalNot,
    BitNot,
}

impl fmt::Display for CUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            CUnaryOp::Plus => "+",
            CUnaryOp::Minus => "-",
            CUnaryOp::LogicalNot => "!",
            CUnaryOp::BitNot => "~",
        };
        write!(f, "{}", op_str)
    }
}

/// C expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum CExpr {
    IntLiteral(i64),

    /// Rendered with an `f` suffix
    FloatLiteral(f64),

    StringLiteral(String),

    Ident(String),

    Binary {
        op: CBinaryOp,
        lhs: Box<CExpr>,
        rhs: Box<CExpr>,
    },

    Unary {
        op: CUnaryOp,
        operand: Box<CExpr>,
    },

    Cast {
        ty: CType,
        expr: Box<CExpr>,
    },

    Call {
        callee: String,
        args: Vec<CExpr>,
    },

    /// Stand-in for a construct outside the supported subset. Renders as a
    /// marked comment followed by `0` so the surrounding C still parses.
    Placeholder(String),
}

impl CExpr {
    pub fn binary(op: CBinaryOp, lhs: CExpr, rhs: CExpr) -> Self {
        CExpr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn unary(op: CUnaryOp, operand: CExpr) -> Self {
        CExpr::Unary { op, operand: Box::new(operand) }
    }

    pub fn cast(ty: CType, expr: CExpr) -> Self {
        CExpr::Cast { ty, expr: Box::new(expr) }
    }

    pub fn call(callee: impl Into<String>, args: Vec<CExpr>) -> Self {
        CExpr::Call { callee: callee.into(), args }
    }

    /// Renders without the outermost parentheses of a binary expression,
    /// for positions that already supply their own (`if (...)`)
    pub fn bare(&self) -> BareExpr<'_> {
        BareExpr(self)
    }
}

impl fmt::Display for CExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CExpr::IntLiteral(value) => write!(f, "{}", value),
            CExpr::FloatLiteral(value) => write!(f, "{}", format_float_literal(*value)),
            CExpr::StringLiteral(text) => write!(f, "\"{}\"", escape_c_string(text)),
            CExpr::Ident(name) => write!(f, "{}", name),
            CExpr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            CExpr::Unary { op, operand } => {
                let operand = operand.to_string();
                // `--5` would read as a decrement
                if operand.starts_with(['-', '+']) {
                    write!(f, "({}({}))", op, operand)
                } else {
                    write!(f, "({}{})", op, operand)
                }
            }
            CExpr::Cast { ty, expr } => write!(f, "(({}){})", ty, expr),
            CExpr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            CExpr::Placeholder(what) => write!(f, "/* unsupported: {} */ 0", sanitize_comment(what)),
        }
    }
}

/// See [`CExpr::bare`]
pub struct BareExpr<'a>(&'a CExpr);

impl fmt::Display for BareExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            CExpr::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            other => write!(f, "{}", other),
        }
    }
}

/// C statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum CStmt {
    /// `ty name;` or `ty name = init;`
    Declare {
        ty: CType,
        name: String,
        init: Option<CExpr>,
    },

    Assign {
        name: String,
        value: CExpr,
    },

    Return(Option<CExpr>),

    If {
        condition: CExpr,
        then_body: Vec<CStmt>,
        else_body: Option<Vec<CStmt>>,
    },

    /// Expression evaluated for its side effect
    Expr(CExpr),

    Comment(String),
}

/// A function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct CParam {
    pub ty: CType,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CFunction {
    pub return_type: CType,
    pub name: String,
    pub params: Vec<CParam>,
    pub body: Vec<CStmt>,
}

impl CFunction {
    /// `int add(int a, int b)`; an empty parameter list is spelled `(void)`
    pub fn signature(&self) -> String {
        let params = if self.params.is_empty() {
            "void".to_string()
        } else {
            self.params
                .iter()
                .map(|p| format!("{} {}", p.ty, p.name))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{} {}({})", self.return_type, self.name, params)
    }

    pub fn prototype(&self) -> String {
        format!("{};", self.signature())
    }
}

/// Top-level items, kept in source order
#[derive(Debug, Clone, PartialEq)]
pub enum CItem {
    Function(CFunction),
    /// Marker left where a definition could not be translated
    Comment(String),
}

/// A complete translated program
#[derive(Debug, Clone, PartialEq)]
pub struct CProgram {
    /// Header names, rendered as `#include <name>`
    pub includes: Vec<String>,
    pub items: Vec<CItem>,
    /// The synthesized `int main(void)`
    pub entry: CFunction,
}

impl CProgram {
    pub fn functions(&self) -> impl Iterator<Item = &CFunction> {
        self.items.iter().filter_map(|item| match item {
            CItem::Function(func) => Some(func),
            CItem::Comment(_) => None,
        })
    }

    pub fn function(&self, name: &str) -> Option<&CFunction> {
        self.functions().find(|f| f.name == name)
    }
}

/// Shortest literal that reads back as the same value, with the float suffix
pub fn format_float_literal(value: f64) -> String {
    if value.is_nan() {
        return "(0.0f / 0.0f)".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "(1.0f / 0.0f)".to_string() } else { "(-1.0f / 0.0f)".to_string() };
    }
    // Debug output of a finite f64 always carries a '.' or an exponent
    format!("{:?}f", value)
}

fn escape_c_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Keep arbitrary text from terminating a `/* */` comment early
pub fn sanitize_comment(text: &str) -> String {
    text.replace("*/", "* /")
}

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "printf",
];

/// Source identifiers that collide with C keywords (or `printf`) get a `_` suffix
pub fn sanitize_identifier(name: &str) -> String {
    if C_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}
