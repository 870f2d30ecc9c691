mod common;

use common::{run, run_err};
use okerew::{ErrorKind, Value};
use pretty_assertions::assert_eq;

#[test]
fn if_runs_only_the_first_truthy_clause() {
    let source = "\
x = 5
if x > 10
  print 'big'
elif x > 3
  print 'medium'
elif x > 1
  print 'small'
else
  print 'tiny'
end
print 'done'";

    assert_eq!(run(source).output, ["medium", "done"]);
}

#[test]
fn if_falls_through_to_else() {
    let run = run("if 0\n  print 'no'\nelse\n  print 'yes'\nend");
    assert_eq!(run.output, ["yes"]);
}

#[test]
fn false_if_without_else_skips_body() {
    let run = run("if ''\n  x = 1\nend\nprint 'after'");

    assert_eq!(run.output, ["after"]);
    assert_eq!(run.var("x"), None);
}

#[test]
fn nested_if_elif_pairs_resolve_to_their_own_block() {
    let source = "\
a = 1
b = 0
if a
  if b
    print 'inner if'
  elif a
    print 'inner elif'
  end
elif 1
  print 'outer elif'
end";

    assert_eq!(run(source).output, ["inner elif"]);
}

#[test]
fn later_conditions_are_not_evaluated_once_a_clause_runs() {
    let run = run("if 1\n  print 'first'\nelif missing\n  print 'second'\nend");
    assert_eq!(run.output, ["first"]);
}

#[test]
fn while_runs_three_times_then_else_once() {
    let source = "\
i = 0
while i < 3
  print i
  i = i + 1
else
  print 'finished'
end";

    let run = run(source);
    assert_eq!(run.output, ["0", "1", "2", "finished"]);
    assert_eq!(run.var("i"), Some(&Value::Int(3)));
}

#[test]
fn while_with_false_condition_still_runs_else() {
    let run = run("while 0\n  print 'body'\nelse\n  print 'else'\nend");
    assert_eq!(run.output, ["else"]);
}

#[test]
fn nested_loops_execute_their_bodies() {
    let source = "\
total = 0
i = 0
while i < 3
  j = 0
  while j < 2
    total = total + 1
    j = j + 1
  end
  i = i + 1
end
print total";

    assert_eq!(run(source).output, ["6"]);
}

#[test]
fn for_binds_each_value_inclusively() {
    let run = run("sum = 0\nfor i in 1 to 4\n  sum = sum + i\nend\nprint sum");

    assert_eq!(run.output, ["10"]);
    assert_eq!(run.var("i"), Some(&Value::Int(4)));
}

#[test]
fn for_bounds_are_evaluated_once() {
    let source = "\
n = 3
count = 0
for i in 1 to n
  n = 100
  count = count + 1
end
print count";

    assert_eq!(run(source).output, ["3"]);
}

#[test]
fn empty_for_range_runs_only_else() {
    let run = run("for i in 5 to 1\n  print i\nelse\n  print 'empty'\nend");
    assert_eq!(run.output, ["empty"]);
}

#[test]
fn for_with_non_integer_bound_is_reported_and_skipped() {
    let run = run("for i in 1 to 2.5\n  print i\nend\nprint 'after'");

    assert_eq!(
        run.output,
        ["Error evaluating expression: `for` bounds must be integers, found float", "after"]
    );
}

#[test]
fn exit_inside_a_loop_ends_the_program() {
    let source = "\
i = 0
while 1
  i = i + 1
  if i == 3
    exit
  end
else
  print 'unreachable'
end
print 'unreachable'";

    let run = run(source);
    assert!(run.output.is_empty());
    assert_eq!(run.var("i"), Some(&Value::Int(3)));
}

#[test]
fn missing_end_is_fatal() {
    let (err, output) = run_err("print 'before'\nwhile 1\n  print 'x'\n");

    assert_eq!(err.kind, ErrorKind::UnterminatedBlock);
    assert_eq!(err.span.line, 2);
    assert_eq!(output, ["before"]);
}

#[test]
fn clause_after_else_is_a_syntax_error() {
    let (err, _) = run_err("if 0\n  x = 1\nelse\n  x = 2\nelif 1\n  x = 3\nend");

    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.message, "`elif` cannot follow `else`");
    assert_eq!(err.span.line, 5);
}

#[test]
fn for_without_to_is_a_syntax_error() {
    let (err, _) = run_err("for i in 1\n  print i\nend");

    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.message, "expected `to`, found `newline`");
}

#[test]
fn empty_for_bounds_are_syntax_errors() {
    let (err, output) = run_err("print 'before'\nfor i in to 3\n  print i\nelse\n  print 'else'\nend\nprint 'after'");

    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.message, "expected a bound after `in`, found `to`");
    assert_eq!(err.span.line, 2);
    assert_eq!(output, ["before"]);

    let (err, _) = run_err("for i in 1 to\n  print i\nend");
    assert_eq!(err.message, "expected a bound after `to`, found `newline`");
}

#[test]
fn if_inside_a_loop_picks_the_right_clause_every_iteration() {
    let source = "\
for i in 1 to 4
  if i % 2
    print 'odd'
  elif i == 2
    print 'two'
  else
    print 'even'
  end
end";

    assert_eq!(run(source).output, ["odd", "two", "odd", "even"]);
}
