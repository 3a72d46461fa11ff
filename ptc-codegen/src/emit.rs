//! C source emission
//!
//! The [`Emitter`] accumulates lines with a single indent level. Translated
//! functions are laid out one after another; [`Emitter::assemble`] wraps them
//! in the `#include` prologue and the synthesized entry point.

use crate::c_ast::{sanitize_comment, CFunction, CItem, CProgram, CStmt};
use log::{trace, warn};

/// Layout options for emitted C
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Spaces per indent level
    pub indent_width: usize,
    /// Emit forward prototypes for every translated function
    pub emit_prototypes: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            emit_prototypes: true,
        }
    }
}

/// Line buffer with an indentation discipline
#[derive(Debug, Clone)]
pub struct Emitter {
    lines: Vec<String>,
    indent_level: usize,
    indent_unit: String,
    includes: Vec<String>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(&EmitOptions::default())
    }
}

impl Emitter {
    pub fn new(options: &EmitOptions) -> Self {
        Self {
            lines: Vec::new(),
            indent_level: 0,
            indent_unit: " ".repeat(options.indent_width),
            includes: Vec::new(),
        }
    }

    /// Headers for the prologue, rendered as `#include <name>`
    pub fn with_includes(mut self, includes: &[String]) -> Self {
        self.includes = includes.to_vec();
        self
    }

    /// Append one line at the current indent level
    pub fn emit(&mut self, line: &str) {
        let indent = self.indent_unit.repeat(self.indent_level);
        self.lines.push(format!("{}{}", indent, line));
    }

    pub fn emit_comment(&mut self, text: &str) {
        self.emit(&format!("/* {} */", sanitize_comment(text)));
    }

    /// Empty separator line, never indented
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn enter_block(&mut self) {
        self.indent_level += 1;
    }

    pub fn exit_block(&mut self) {
        if self.indent_level == 0 {
            warn!("exit_block called at indent level 0");
            return;
        }
        self.indent_level -= 1;
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn emit_statement(&mut self, stmt: &CStmt) {
        match stmt {
            CStmt::Declare { ty, name, init: Some(init) } => {
                self.emit(&format!("{} {} = {};", ty, name, init));
            }
            CStmt::Declare { ty, name, init: None } => {
                self.emit(&format!("{} {};", ty, name));
            }
            CStmt::Assign { name, value } => {
                self.emit(&format!("{} = {};", name, value));
            }
            CStmt::Return(Some(value)) => {
                self.emit(&format!("return {};", value));
            }
            CStmt::Return(None) => self.emit("return;"),
            CStmt::If { condition, then_body, else_body } => {
                self.emit(&format!("if ({}) {{", condition.bare()));
                self.emit_block(then_body);
                self.emit("}");
                if let Some(else_body) = else_body {
                    self.emit("else {");
                    self.emit_block(else_body);
                    self.emit("}");
                }
            }
            CStmt::Expr(expr) => {
                self.emit(&format!("{};", expr));
            }
            CStmt::Comment(text) => self.emit_comment(text),
        }
    }

    fn emit_block(&mut self, body: &[CStmt]) {
        self.enter_block();
        for stmt in body {
            self.emit_statement(stmt);
        }
        self.exit_block();
    }

    pub fn emit_function(&mut self, func: &CFunction) {
        trace!("emitting function '{}'", func.name);
        self.emit(&format!("{} {{", func.signature()));
        self.emit_block(&func.body);
        self.emit("}");
    }

    /// Prologue, everything emitted so far, then the entry point
    pub fn assemble(mut self, entry: &CFunction) -> String {
        if self.indent_level != 0 {
            warn!("assembling with unbalanced blocks (indent level {})", self.indent_level);
            self.indent_level = 0;
        }
        self.emit_function(entry);

        let mut output = String::new();
        for include in &self.includes {
            output.push_str(&format!("#include <{}>\n", include));
        }
        if !self.includes.is_empty() {
            output.push('\n');
        }
        for line in &self.lines {
            output.push_str(line);
            output.push('\n');
        }
        output
    }
}

/// Render a whole program: prologue, prototypes, functions in source order,
/// then the entry point
pub fn emit_program(program: &CProgram, options: &EmitOptions) -> String {
    let mut emitter = Emitter::new(options).with_includes(&program.includes);

    if options.emit_prototypes {
        let mut any = false;
        for func in program.functions() {
            emitter.emit(&func.prototype());
            any = true;
        }
        if any {
            emitter.blank();
        }
    }

    for item in &program.items {
        match item {
            CItem::Function(func) => emitter.emit_function(func),
            CItem::Comment(text) => emitter.emit_comment(text),
        }
        emitter.blank();
    }

    emitter.assemble(&program.entry)
}
