//! Error handling for the translator
//!
//! Hard failures at crate boundaries are [`CompilerError`]s. Everything the
//! translator can recover from inside a pass is a [`Diagnostic`] collected by
//! an [`ErrorReporter`] and handed back alongside the generated code.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for failures that stop a whole operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Parse error at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        message: String,
    },

    #[error("Semantic error at {location}: {message}")]
    Semantic {
        location: SourceLocation,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

impl CompilerError {
    /// Create a semantic error
    pub fn semantic_error(message: String, location: SourceLocation) -> Self {
        CompilerError::Semantic { location, message }
    }

    /// Create a configuration error
    pub fn config_error(message: String) -> Self {
        CompilerError::ConfigError { message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Malformed serialized input keeps the position serde_json reports
impl From<serde_json::Error> for CompilerError {
    fn from(err: serde_json::Error) -> Self {
        let location = SourceLocation::new(err.line() as u32, err.column() as u32);
        CompilerError::ParseError {
            location,
            message: err.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A node or operator outside the supported subset; a placeholder was emitted
    UnsupportedNodeKind,
    /// A name read before any assignment in the active scope
    UnknownVariable,
    /// A call whose return type could not be looked up; Integer was assumed
    UnknownCallee,
    /// A variable reassigned with a different type than its declaration
    AmbiguousReassignment,
    /// A type annotation that is neither `int` nor `float`
    UnknownAnnotation,
    /// The result of a function that returns nothing used as a value
    VoidValue,
    /// A function defined again under the same name; the earlier one is dropped
    Redefinition,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::UnsupportedNodeKind => "unsupported-node",
            DiagnosticKind::UnknownVariable => "unknown-variable",
            DiagnosticKind::UnknownCallee => "unknown-callee",
            DiagnosticKind::AmbiguousReassignment => "ambiguous-reassignment",
            DiagnosticKind::UnknownAnnotation => "unknown-annotation",
            DiagnosticKind::VoidValue => "void-value",
            DiagnosticKind::Redefinition => "redefinition",
        };
        write!(f, "{}", name)
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub location: SourceLocation,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: DiagnosticKind, message: String, location: SourceLocation) -> Self {
        Self {
            severity,
            kind,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn error(kind: DiagnosticKind, message: String, location: SourceLocation) -> Self {
        Self::new(Severity::Error, kind, message, location)
    }

    pub fn warning(kind: DiagnosticKind, message: String, location: SourceLocation) -> Self {
        Self::new(Severity::Warning, kind, message, location)
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.kind, self.message)?;
        if self.location.is_known() {
            write!(f, " (at {})", self.location)?;
        }

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

/// Collects diagnostics over one translation pass
#[derive(Debug, Clone, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already-built diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) -> &mut Diagnostic {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        let index = self.diagnostics.len();
        self.diagnostics.push(diagnostic);
        &mut self.diagnostics[index]
    }

    /// Report an error diagnostic
    pub fn error(&mut self, kind: DiagnosticKind, message: String, location: SourceLocation) -> &mut Diagnostic {
        self.report(Diagnostic::error(kind, message, location))
    }

    /// Report a warning diagnostic
    pub fn warning(&mut self, kind: DiagnosticKind, message: String, location: SourceLocation) -> &mut Diagnostic {
        self.report(Diagnostic::warning(kind, message, location))
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Number of diagnostics of one kind, regardless of severity
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Print all diagnostics to stderr, prefixed with the input name
    pub fn print_diagnostics(&self, input_name: &str) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}: {}", input_name, diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (e, 0) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (e, w) => format!(
                "{} error{} and {} warning{}",
                e,
                if e == 1 { "" } else { "s" },
                w,
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}

impl From<Vec<Diagnostic>> for ErrorReporter {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        let mut reporter = ErrorReporter::new();
        for diagnostic in diagnostics {
            reporter.report(diagnostic);
        }
        reporter
    }
}
