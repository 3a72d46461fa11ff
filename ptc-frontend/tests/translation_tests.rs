//! End-to-end translation tests: input tree in, complete C program out

use indoc::indoc;
use pretty_assertions::assert_eq;
use ptc_common::{DiagnosticKind, InferredType, SourceLocation};
use ptc_frontend::ast::build::*;
use ptc_frontend::{BinOperator, CmpOperator, Frontend, Module, ReturnSource, TranslateConfig, Translation};

fn translate(body: Vec<ptc_frontend::Stmt>) -> Translation {
    Frontend::translate(&Module { body }, &TranslateConfig::default())
}

#[test]
fn test_integer_function_and_call() {
    let translation = translate(vec![
        def(
            "add",
            &["a", "b", "v"],
            vec![ret(binop(binop(name("a"), BinOperator::Add, name("b")), BinOperator::Add, name("v")))],
        ),
        expr_stmt(call("print", vec![call("add", vec![int(5), int(5), int(5)])])),
    ]);

    let expected = indoc! {r#"
        #include <stdio.h>

        int add(int a, int b, int v);

        int add(int a, int b, int v) {
          return ((a + b) + v);
        }

        int main(void) {
          printf("%d\n", add(5, 5, 5));
          return 0;
        }
    "#};
    assert_eq!(translation.code, expected);
    assert_eq!(translation.signatures.return_type_of("add"), InferredType::Integer);
    assert!(translation.diagnostics.is_empty());
}

#[test]
fn test_one_function_serves_every_call_site() {
    let translation = translate(vec![
        def(
            "divide",
            &["a", "b"],
            vec![if_else(
                compare(name("b"), CmpOperator::Eq, int(0)),
                vec![ret(int(0))],
                vec![ret(binop(name("a"), BinOperator::Div, name("b")))],
            )],
        ),
        expr_stmt(call("print", vec![call("divide", vec![int(10), int(0)])])),
        expr_stmt(call("print", vec![call("divide", vec![int(10), int(3)])])),
    ]);

    let expected = indoc! {r#"
        #include <stdio.h>

        int divide(int a, int b);

        int divide(int a, int b) {
          if (b == 0) {
            return 0;
          }
          else {
            return (a / b);
          }
        }

        int main(void) {
          printf("%d\n", divide(10, 0));
          printf("%d\n", divide(10, 3));
          return 0;
        }
    "#};
    assert_eq!(translation.code, expected);
    assert_eq!(translation.program.functions().count(), 1);
}

#[test]
fn test_float_returning_call_prints_as_float() {
    let translation = translate(vec![
        typed_def(
            "area",
            &[("r", "float")],
            Some("float"),
            vec![ret(binop(binop(float(3.14159), BinOperator::Mult, name("r")), BinOperator::Mult, name("r")))],
        ),
        def("half", &[], vec![ret(float(0.5))]),
        expr_stmt(call("print", vec![call("area", vec![float(2.0)])])),
        expr_stmt(call("print", vec![call("half", vec![])])),
    ]);

    assert!(translation.code.contains("float area(float r) {\n  return ((3.14159f * r) * r);\n}"));
    assert!(translation.code.contains("  printf(\"%f\\n\", area(2.0f));\n"));
    assert!(translation.code.contains("  printf(\"%f\\n\", half());\n"));

    let half = translation.signatures.resolve("half").unwrap();
    assert_eq!(half.return_type, InferredType::Float);
    assert_eq!(half.source, ReturnSource::Inferred);
}

#[test]
fn test_unknown_variable_aborts_only_its_function() {
    let json = r#"{"body": [
        {"node": "FunctionDef", "name": "good", "params": [{"name": "x"}],
         "body": [{"node": "Return", "value": {"node": "BinOp", "left": {"node": "Name", "id": "x"}, "op": "Add", "right": {"node": "Constant", "value": 1}}}]},
        {"node": "FunctionDef", "name": "broken", "params": [], "loc": {"line": 4, "column": 0},
         "body": [{"node": "Return", "value": {"node": "Name", "id": "z", "loc": {"line": 5, "column": 11}}}]},
        {"node": "FunctionDef", "name": "after", "params": [],
         "body": [{"node": "Return", "value": {"node": "Constant", "value": 2}}]}
    ]}"#;
    let translation = Frontend::translate_json(json, &TranslateConfig::default()).unwrap();

    let expected = indoc! {"
        #include <stdio.h>

        int good(int x);
        int after(void);

        int good(int x) {
          return (x + 1);
        }

        /* broken not translated: Unknown variable 'z' at 5:11 */

        int after(void) {
          return 2;
        }

        int main(void) {
          return 0;
        }
    "};
    assert_eq!(translation.code, expected);

    assert!(translation.has_errors());
    assert_eq!(translation.error_count(), 1);
    let diagnostic = &translation.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnknownVariable);
    assert_eq!(diagnostic.location, SourceLocation::new(5, 11));
}

#[test]
fn test_numeric_program_with_entry_function() {
    let json = include_str!("fixtures/numeric.json");
    let translation = Frontend::translate_json(json, &TranslateConfig::default()).unwrap();

    let expected = indoc! {r#"
        #include <stdio.h>

        int rec_add(int a, int b);
        int add(int a, int b, int v);
        int fibonacci(int n);
        int min(int a, int b);
        int power(int a, int b);
        float calculate_circle_area(float radius);
        float divide(float a, float b);
        void py_main(void);

        int rec_add(int a, int b) {
          if (a == 0) {
            return 0;
          }
          else {
            return (rec_add((a - 1), b) + b);
          }
        }

        int add(int a, int b, int v) {
          return ((a + b) + v);
        }

        int fibonacci(int n) {
          if (n <= 1) {
            return n;
          }
          else {
            return (fibonacci((n - 1)) + fibonacci((n - 2)));
          }
        }

        int min(int a, int b) {
          if (a < b) {
            return a;
          }
          return b;
        }

        int power(int a, int b) {
          if (b == 0) {
            return 1;
          }
          else {
            return (a * power(a, (b - 1)));
          }
        }

        float calculate_circle_area(float radius) {
          float pi = 3.14159f;
          if (radius <= 0) {
            return 0.0f;
          }
          else {
            float area = ((pi * radius) * radius);
            return area;
          }
        }

        float divide(float a, float b) {
          if (b == 0) {
            return 0;
          }
          else {
            return (a / b);
          }
        }

        void py_main(void) {
          printf("%d\n", rec_add(5, 5));
          printf("%d\n", add(5, 5, 5));
          printf("%d\n", fibonacci(10));
          printf("%d\n", min(2, 100000));
          printf("%d\n", power(2, 5));
          printf("%f\n", calculate_circle_area(2.5f));
          printf("%f\n", divide(10, 2));
          printf("%f\n", divide(10, 0));
          printf("%f\n", divide(10, 3));
        }

        int main(void) {
          py_main();
          return 0;
        }
    "#};
    assert_eq!(translation.code, expected);
    assert!(translation.diagnostics.is_empty());
}

#[test]
fn test_module_level_code_with_unsupported_constructs() {
    let json = include_str!("fixtures/mixed.json");
    let translation = Frontend::translate_json(json, &TranslateConfig::default()).unwrap();

    let expected = indoc! {r#"
        #include <stdio.h>

        float scale(float x, int factor);
        int describe(int n);

        float scale(float x, int factor) {
          return ((float)(x * factor));
        }

        int describe(int n) {
          /* unsupported: While */
          return /* unsupported: operator // */ 0;
        }

        int main(void) {
          int label;
          float total = scale(2.5f, 4);
          int count = 3;
          if (count > 2) {
            label = 1;
          }
          else {
            label = 0;
          }
          printf("%s %f %d\n", "total:", total, label);
          return 0;
        }
    "#};
    assert_eq!(translation.code, expected);

    assert!(!translation.has_errors());
    assert_eq!(translation.unsupported_count(), 2);
    let locations: Vec<_> = translation.diagnostics.iter().map(|d| d.location).collect();
    assert_eq!(locations, vec![SourceLocation::new(5, 4), SourceLocation::new(7, 11)]);
}

#[test]
fn test_forward_call_falls_back_to_integer() {
    let translation = translate(vec![
        def("first", &[], vec![ret(call("second", vec![]))]),
        def("second", &[], vec![ret(float(1.5))]),
    ]);

    assert_eq!(translation.signatures.return_type_of("first"), InferredType::Integer);
    assert_eq!(translation.signatures.return_type_of("second"), InferredType::Float);
    assert_eq!(translation.count_of(DiagnosticKind::UnknownCallee), 1);
    assert!(translation.code.contains("float second(void);"));
}

#[test]
fn test_layout_options() {
    let config = TranslateConfig { indent_width: 4, emit_prototypes: false, ..Default::default() };
    let module = Module { body: vec![def("one", &[], vec![ret(int(1))])] };
    let translation = Frontend::translate(&module, &config);

    let expected = indoc! {"
        #include <stdio.h>

        int one(void) {
            return 1;
        }

        int main(void) {
            return 0;
        }
    "};
    assert_eq!(translation.code, expected);
}

#[test]
fn test_void_function_result_is_not_used_as_value() {
    let translation = translate(vec![
        def("show", &["x"], vec![expr_stmt(call("print", vec![name("x")]))]),
        expr_stmt(call("print", vec![call("show", vec![int(1)])])),
        assign("y", call("show", vec![int(2)])),
        expr_stmt(call("show", vec![int(3)])),
    ]);

    let expected = indoc! {r#"
        #include <stdio.h>

        void show(int x);

        void show(int x) {
          printf("%d\n", x);
        }

        int main(void) {
          printf("%d\n", /* unsupported: value of void function 'show' */ 0);
          int y = /* unsupported: value of void function 'show' */ 0;
          show(3);
          return 0;
        }
    "#};
    assert_eq!(translation.code, expected);
    assert_eq!(translation.count_of(DiagnosticKind::VoidValue), 2);
    assert!(!translation.has_errors());
}

#[test]
fn test_redefined_function_emits_only_the_last_definition() {
    let translation = translate(vec![
        def("f", &[], vec![ret(int(1))]),
        def("f", &[], vec![ret(float(2.5))]),
        expr_stmt(call("print", vec![call("f", vec![])])),
    ]);

    let expected = indoc! {r#"
        #include <stdio.h>

        float f(void);

        float f(void) {
          return 2.5f;
        }

        int main(void) {
          printf("%f\n", f());
          return 0;
        }
    "#};
    assert_eq!(translation.code, expected);
    assert_eq!(translation.count_of(DiagnosticKind::Redefinition), 1);
}
