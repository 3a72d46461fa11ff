//! Semantic error definitions
//!
//! Only errors that abort a unit of translation live here. Everything the
//! translator recovers from is reported as a diagnostic instead.

use ptc_common::{CompilerError, Diagnostic, DiagnosticKind, SourceLocation};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("Unknown variable '{name}' at {location}")]
    UnknownVariable {
        name: String,
        location: SourceLocation,
    },
}

impl SemanticError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SemanticError::UnknownVariable { location, .. } => *location,
        }
    }

    /// Error diagnostic for the function whose translation this aborted
    pub fn to_diagnostic(&self, function: &str) -> Diagnostic {
        match self {
            SemanticError::UnknownVariable { name, location } => Diagnostic::error(
                DiagnosticKind::UnknownVariable,
                format!("variable '{}' is used before any assignment", name),
                *location,
            )
            .with_note(format!("translation of '{}' was abandoned", function)),
        }
    }
}

impl From<SemanticError> for CompilerError {
    fn from(err: SemanticError) -> Self {
        match err {
            SemanticError::UnknownVariable { name, location } => {
                CompilerError::semantic_error(format!("Unknown variable: {name}"), location)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variable_diagnostic() {
        let err = SemanticError::UnknownVariable { name: "z".to_string(), location: SourceLocation::new(4, 8) };
        assert_eq!(err.to_string(), "Unknown variable 'z' at 4:8");

        let diag = err.to_diagnostic("broken");
        assert_eq!(diag.kind, DiagnosticKind::UnknownVariable);
        assert_eq!(diag.location, SourceLocation::new(4, 8));
        assert_eq!(diag.notes, vec!["translation of 'broken' was abandoned".to_string()]);
    }

    #[test]
    fn test_conversion_to_compiler_error() {
        let err = SemanticError::UnknownVariable { name: "z".to_string(), location: SourceLocation::new(1, 0) };
        match CompilerError::from(err) {
            CompilerError::Semantic { message, .. } => assert_eq!(message, "Unknown variable: z"),
            other => panic!("Expected semantic error, got {:?}", other),
        }
    }
}
