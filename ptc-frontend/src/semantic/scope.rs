//! Per-function variable table
//!
//! A variable is declared by its first assignment and keeps that type for
//! the rest of the function. Visibility is function-wide, but the table also
//! remembers which block the declaration happened in: C scopes a declaration
//! to its braces, so any variable touched outside that block must be hoisted
//! to the top of the function by the statement translator.

use crate::semantic::errors::SemanticError;
use log::trace;
use ptc_common::{InferredType, SourceLocation};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Variable {
    ty: InferredType,
    /// Block ids from the function body down to the declaring block
    block_path: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeTable {
    variables: HashMap<String, Variable>,
    declaration_order: Vec<String>,
    current_path: Vec<usize>,
    next_block_id: usize,
    hoisted: Vec<String>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` with `ty` unless it is already known.
    ///
    /// Returns the type the variable actually has and whether this call
    /// declared it.
    pub fn declare_or_get(&mut self, name: &str, ty: InferredType) -> (InferredType, bool) {
        if let Some(existing) = self.variables.get(name) {
            let effective = existing.ty;
            self.note_access(name);
            return (effective, false);
        }

        trace!("declare '{}' as {} in block {:?}", name, ty, self.current_path);
        self.variables.insert(
            name.to_string(),
            Variable { ty, block_path: self.current_path.clone() },
        );
        self.declaration_order.push(name.to_string());
        (ty, true)
    }

    pub fn lookup(&mut self, name: &str, location: SourceLocation) -> Result<InferredType, SemanticError> {
        match self.variables.get(name) {
            Some(var) => {
                let ty = var.ty;
                self.note_access(name);
                Ok(ty)
            }
            None => Err(SemanticError::UnknownVariable { name: name.to_string(), location }),
        }
    }

    /// Type of `name` without recording an access
    pub fn get(&self, name: &str) -> Option<InferredType> {
        self.variables.get(name).map(|v| v.ty)
    }

    pub fn enter_block(&mut self) {
        self.current_path.push(self.next_block_id);
        self.next_block_id += 1;
    }

    pub fn exit_block(&mut self) {
        self.current_path.pop();
    }

    /// Variables that must be declared at function level, in declaration order
    pub fn hoisted(&self) -> Vec<(String, InferredType)> {
        self.declaration_order
            .iter()
            .filter(|name| self.is_hoisted(name))
            .filter_map(|name| self.variables.get(name).map(|v| (name.clone(), v.ty)))
            .collect()
    }

    pub fn is_hoisted(&self, name: &str) -> bool {
        self.hoisted.iter().any(|h| h == name)
    }

    fn note_access(&mut self, name: &str) {
        let Some(var) = self.variables.get(name) else {
            return;
        };
        let visible = self.current_path.starts_with(&var.block_path);
        if !visible && !self.is_hoisted(name) {
            trace!("'{}' escapes its declaring block, hoisting", name);
            self.hoisted.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InferredType::*;

    #[test]
    fn test_first_declaration_wins() {
        let mut scope = ScopeTable::new();
        assert_eq!(scope.declare_or_get("x", Integer), (Integer, true));
        assert_eq!(scope.declare_or_get("x", Float), (Integer, false));
        assert_eq!(scope.lookup("x", SourceLocation::dummy()), Ok(Integer));
    }

    #[test]
    fn test_unknown_variable() {
        let mut scope = ScopeTable::new();
        let loc = SourceLocation::new(3, 4);
        assert_eq!(
            scope.lookup("y", loc),
            Err(SemanticError::UnknownVariable { name: "y".to_string(), location: loc })
        );
    }

    #[test]
    fn test_use_after_block_is_hoisted() {
        let mut scope = ScopeTable::new();
        scope.enter_block();
        scope.declare_or_get("area", Float);
        scope.lookup("area", SourceLocation::dummy()).unwrap();
        scope.exit_block();
        assert!(!scope.is_hoisted("area"));

        scope.lookup("area", SourceLocation::dummy()).unwrap();
        assert_eq!(scope.hoisted(), vec![("area".to_string(), Float)]);
    }

    #[test]
    fn test_sibling_blocks_hoist() {
        let mut scope = ScopeTable::new();
        scope.enter_block();
        scope.declare_or_get("r", Integer);
        scope.exit_block();
        scope.enter_block();
        scope.declare_or_get("r", Float);
        scope.exit_block();
        assert!(scope.is_hoisted("r"));
        assert_eq!(scope.get("r"), Some(Integer));
    }

    #[test]
    fn test_nested_block_sees_outer_declaration() {
        let mut scope = ScopeTable::new();
        scope.declare_or_get("n", Integer);
        scope.enter_block();
        scope.enter_block();
        scope.lookup("n", SourceLocation::dummy()).unwrap();
        scope.exit_block();
        scope.exit_block();
        assert!(scope.hoisted().is_empty());
    }
}
