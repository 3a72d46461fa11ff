//! Typed numeric translator - C Code Generation
//!
//! This crate handles the final phase of translation: rendering the C
//! intermediate representation built by the frontend into source text.
//! It includes:
//!
//! - C expression, statement and function nodes
//! - Line emission with block indentation
//! - Program assembly (prologue, prototypes, entry point)

pub mod c_ast;
pub mod emit;

pub use c_ast::{
    sanitize_identifier, CBinaryOp, CExpr, CFunction, CItem, CParam, CProgram, CStmt, CType, CUnaryOp,
};
pub use emit::{emit_program, EmitOptions, Emitter};

/// Main entry point for code generation
pub fn generate_c(program: &CProgram, options: &EmitOptions) -> String {
    emit_program(program, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_code_generation() {
        let program = CProgram {
            includes: vec!["stdio.h".to_string()],
            items: vec![],
            entry: CFunction {
                return_type: CType::Int,
                name: "main".to_string(),
                params: vec![],
                body: vec![
                    CStmt::Expr(CExpr::call(
                        "printf",
                        vec![CExpr::StringLiteral("%f\n".to_string()), CExpr::FloatLiteral(2.5)],
                    )),
                    CStmt::Return(Some(CExpr::IntLiteral(0))),
                ],
            },
        };

        let c = generate_c(&program, &EmitOptions::default());
        assert!(c.starts_with("#include <stdio.h>\n"));
        assert!(c.contains("  printf(\"%f\\n\", 2.5f);"));
        assert!(c.contains("  return 0;"));
    }
}
