mod common;

use common::{run, run_err};
use okerew::{tokenize, DiagnosticPrinter, ErrorKind, Value};
use pretty_assertions::assert_eq;

#[test]
fn division_by_zero_is_reported_and_execution_continues() {
    let run = run("print 10 / 0\nx = 1\nprint x");

    assert_eq!(
        run.output,
        ["Error evaluating expression: division by zero", "none", "1"]
    );
}

#[test]
fn failed_assignment_binds_nothing() {
    let run = run("y = missing + 1\nprint y");

    assert_eq!(run.var("y"), Some(&Value::Nothing));
    assert_eq!(
        run.output,
        ["Error evaluating expression: name `missing` is not defined", "none"]
    );
}

#[test]
fn failed_condition_is_false() {
    let run = run("if 'a' - 1\n  print 'then'\nelse\n  print 'else'\nend");

    assert_eq!(
        run.output,
        [
            "Error evaluating expression: unsupported operand types for -: string and int",
            "else"
        ]
    );
}

#[test]
fn leftover_tokens_are_an_evaluation_error() {
    let run = run("print 1 2");
    assert_eq!(
        run.output,
        ["Error evaluating expression: unexpected `2` in expression", "none"]
    );
}

#[test]
fn missing_input_name_is_a_syntax_error() {
    let (err, _) = run_err("input 5");

    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.code(), "E_SYNTAX");
}

#[test]
fn unexpected_character_is_a_lex_error() {
    let err = tokenize("x = 1\ny = $").unwrap_err();

    assert_eq!(err.kind, ErrorKind::Lex);
    assert_eq!(err.span.line, 2);
    assert_eq!(err.span.column, 4);
}

#[test]
fn diagnostics_point_at_the_opening_keyword() {
    let source = "x = 1\nwhile x\n  x = 0\n";
    let (err, _) = run_err(source);

    let rendered = DiagnosticPrinter::new("loop.okerew", source).render(&err);

    assert!(rendered.starts_with("error[E_BLOCK]: unterminated `while` block\n"));
    assert!(rendered.contains("--> loop.okerew:2:1"));
    assert!(rendered.contains("  2 | while x"));
    assert!(rendered.contains("help: close the block with `end`"));
}
