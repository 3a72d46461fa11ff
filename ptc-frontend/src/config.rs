//! Translation settings
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.

use ptc_codegen::{sanitize_identifier, EmitOptions};
use ptc_common::CompilerError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslateConfig {
    /// Source name of the output primitive, lowered to `printf`
    pub output_function: String,
    /// Source function that is the program's entry routine
    pub entry_function: String,
    /// C name the entry routine is emitted under (C reserves `main`)
    pub entry_symbol: String,
    pub indent_width: usize,
    pub includes: Vec<String>,
    pub emit_prototypes: bool,
    /// Warn when a variable is reassigned with a different type
    pub warn_on_reassignment: bool,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            output_function: "print".to_string(),
            entry_function: "main".to_string(),
            entry_symbol: "py_main".to_string(),
            indent_width: 2,
            includes: vec!["stdio.h".to_string()],
            emit_prototypes: true,
            warn_on_reassignment: true,
        }
    }
}

const MAX_INDENT_WIDTH: usize = 16;

impl TranslateConfig {
    pub fn from_json(text: &str) -> Result<Self, CompilerError> {
        let config: TranslateConfig =
            serde_json::from_str(text).map_err(|e| CompilerError::config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), CompilerError> {
        if self.indent_width > MAX_INDENT_WIDTH {
            return Err(CompilerError::config_error(format!(
                "indent_width {} exceeds the maximum of {}",
                self.indent_width, MAX_INDENT_WIDTH
            )));
        }
        for (field, value) in [
            ("output_function", &self.output_function),
            ("entry_function", &self.entry_function),
            ("entry_symbol", &self.entry_symbol),
        ] {
            if value.is_empty() {
                return Err(CompilerError::config_error(format!("{} must not be empty", field)));
            }
        }
        if self.entry_symbol == "main" || sanitize_identifier(&self.entry_symbol) != self.entry_symbol {
            return Err(CompilerError::config_error(format!(
                "entry_symbol '{}' is reserved in C",
                self.entry_symbol
            )));
        }
        Ok(())
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            indent_width: self.indent_width,
            emit_prototypes: self.emit_prototypes,
        }
    }
}
