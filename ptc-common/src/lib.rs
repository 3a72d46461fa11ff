//! Typed numeric translator - Common Types and Utilities
//!
//! This crate contains the type lattice, source locations, error definitions
//! and diagnostics shared by the translator crates.

pub mod error;
pub mod types;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, DiagnosticKind, ErrorReporter, Severity};
pub use types::*;
pub use source_loc::SourceLocation;
