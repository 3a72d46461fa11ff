//! Source location tracking for diagnostics
//!
//! The external front-end stamps every node with the line and column it was
//! parsed from. Locations are optional in the serialized tree, so a missing
//! location deserializes to the unknown location `0:0`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the translated source (line is 1-based, column is 0-based
/// as produced by the front-end)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Location used for nodes synthesized by the translator or built in tests
    pub fn dummy() -> Self {
        Self::default()
    }

    /// Whether the front-end actually provided this location
    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new(42, 10);
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert!(loc.is_known());
        assert_eq!(format!("{}", loc), "42:10");
    }

    #[test]
    fn test_dummy_location() {
        let loc = SourceLocation::dummy();
        assert!(!loc.is_known());
        assert_eq!(format!("{}", loc), "<unknown>");
    }

    #[test]
    fn test_missing_fields_deserialize_to_zero() {
        let loc: SourceLocation = serde_json::from_str(r#"{"line": 3}"#).unwrap();
        assert_eq!(loc, SourceLocation::new(3, 0));
    }
}
