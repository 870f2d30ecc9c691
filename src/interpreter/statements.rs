/*
 * ============================================================================
 * OKEREW - Token-Stream Scripting
 * ============================================================================
 *
 * License:
 * This file is part of the Okerew scripting language project.
 *
 * Okerew is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ============================================================================
 */

/*!
 * Okerew Statement Executor
 * -------------------------
 *
 * Walks a token slice with a single cursor and executes one statement per
 * step, chosen by the statement's leading token.
 *
 * It does NOT evaluate expressions (handled by `expressions.rs`).
 * It does NOT locate block ends (handled by `blocks.rs`).
 * It does NOT store or call functions (handled by `calls.rs`).
 *
 * Every block body, loop iteration and function call goes through the
 * same primitive, `execute_range`.
 */

use std::collections::HashMap;
use std::ops::Range;

use crate::error::{ErrorKind, OkerewError, Result};
use crate::interpreter::blocks::{find_block_close, BlockPolicy};
use crate::interpreter::console::Console;
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::InterpreterContext;
use crate::interpreter::expressions::{evaluate_at, expression_end};
use crate::interpreter::helpers::is_truthy;
use crate::interpreter::stack::ensure_sufficient_stack;
use crate::lexer::{Keyword, Token, TokenKind};
use crate::value::Value;

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// How a range of statements finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecSignal {
    /// Ran off the end of the range.
    Next,

    /// Hit `exit`; everything up to the top level stops.
    Exit,
}

/// Outcome of a single statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Continue with the statement starting at this index.
    Advance(usize),
    Exit,
}

/// Identifies a block opener: token slice address, slice length and the
/// opener's index.
type BlockKey = (usize, usize, usize);

/// A statement runner bound to one context and one console.
pub struct Executor<'a> {
    pub(crate) ctx: &'a mut InterpreterContext,
    pub(crate) console: &'a mut dyn Console,

    /// Matched block closes, so loops do not rescan their nested blocks on
    /// every iteration. Cleared whenever a function body is stored, the
    /// only point where a new token slice appears during a run.
    pub(crate) block_closes: HashMap<BlockKey, usize>,
}

impl<'a> Executor<'a> {
    pub fn new(ctx: &'a mut InterpreterContext, console: &'a mut dyn Console) -> Self {
        Self {
            ctx,
            console,
            block_closes: HashMap::new(),
        }
    }

    /// Runs a whole token sequence: a program or a function body.
    pub fn execute(&mut self, tokens: &[Token]) -> Result<ExecSignal> {
        self.execute_range(tokens, 0, tokens.len())
    }

    /// Runs the statements in `tokens[start..stop]`.
    ///
    /// Block bounds come from the block matcher, so a well-formed range
    /// never ends in the middle of a statement.
    pub fn execute_range(&mut self, tokens: &[Token], start: usize, stop: usize) -> Result<ExecSignal> {
        let stop = stop.min(tokens.len());
        let mut cursor = start;

        while cursor < stop {
            match self.exec_stmt(tokens, cursor)? {
                Flow::Advance(next) => cursor = next,
                Flow::Exit => return Ok(ExecSignal::Exit),
            }
        }

        Ok(ExecSignal::Next)
    }

    /* ------------------------------------------------------------------------
     * Statement Dispatch
     * ---------------------------------------------------------------------- */

    /// Blocks and calls re-enter `execute_range` from here, so the stack is
    /// grown as needed.
    fn exec_stmt(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        ensure_sufficient_stack(|| self.dispatch(tokens, at))
    }

    fn dispatch(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        let token = &tokens[at];

        match &token.kind {
            TokenKind::Newline => Ok(Flow::Advance(at + 1)),

            TokenKind::Keyword(kw) => match kw {
                Keyword::Input => self.exec_input(tokens, at),
                Keyword::Print => self.exec_print(tokens, at),
                Keyword::If => self.exec_if(tokens, at),
                Keyword::While => self.exec_while(tokens, at),
                Keyword::For => self.exec_for(tokens, at),
                Keyword::Func => self.exec_func(tokens, at),
                Keyword::Exec => self.exec_call(tokens, at),
                Keyword::Exit => {
                    tracing::debug!(line = token.span.line, "exit");
                    Ok(Flow::Exit)
                }
                Keyword::Elif | Keyword::Else | Keyword::End | Keyword::Leave | Keyword::In | Keyword::To => {
                    tracing::warn!(
                        line = token.span.line,
                        column = token.span.column + 1,
                        "ignoring stray `{}`",
                        kw
                    );
                    Ok(Flow::Advance(at + 1))
                }
            },

            TokenKind::Identifier(name) => self.exec_identifier(tokens, at, name),

            _ => {
                tracing::trace!(token = %token, line = token.span.line, "skipping token");
                Ok(Flow::Advance(at + 1))
            }
        }
    }

    /* ------------------------------------------------------------------------
     * input / print
     * ---------------------------------------------------------------------- */

    /// `input <name>`
    fn exec_input(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        let name = self.expect_identifier(tokens, at + 1, Keyword::Input)?;

        let prompt = format!("Enter value for {}: ", name);
        let line = self.console.read_line(&prompt)?.unwrap_or_default();
        let value = Value::from_input(&line);

        tracing::debug!(variable = %name, value = %value, "input");
        self.ctx.variables.assign(name, value);

        Ok(Flow::Advance(at + 2))
    }

    /// `print <expr>`; a bare `print` emits an empty line.
    fn exec_print(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        let start = at + 1;

        if expression_end(tokens, start) == start {
            self.console.write_line("")?;
            return Ok(Flow::Advance(start));
        }

        let (end, value) = self.evaluate(tokens, start)?;
        self.console.write_line(&value_to_string(&value))?;

        Ok(Flow::Advance(end))
    }

    /* ------------------------------------------------------------------------
     * Assignment / Function Call
     * ---------------------------------------------------------------------- */

    fn exec_identifier(&mut self, tokens: &[Token], at: usize, name: &str) -> Result<Flow> {
        let assigns = matches!(tokens.get(at + 1).map(|t| &t.kind), Some(TokenKind::Assignment));

        if assigns {
            let (end, value) = self.evaluate(tokens, at + 2)?;
            tracing::trace!(variable = name, value = %value, "assign");
            self.ctx.variables.assign(name, value);
            return Ok(Flow::Advance(end));
        }

        if self.ctx.functions.contains(name) {
            return match self.invoke(name, tokens[at].span)? {
                ExecSignal::Exit => Ok(Flow::Exit),
                ExecSignal::Next => Ok(Flow::Advance(at + 1)),
            };
        }

        tracing::trace!(name, "bare identifier is not a function; skipping");
        Ok(Flow::Advance(at + 1))
    }

    /* ------------------------------------------------------------------------
     * if / elif / else
     * ---------------------------------------------------------------------- */

    /// `if <expr> ... [elif <expr> ...] [else ...] end`
    ///
    /// Every clause boundary is located first; then conditions are tried
    /// in order and only the first truthy clause (or the `else`) runs.
    fn exec_if(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        let mut clauses: Vec<(Option<usize>, Range<usize>)> = Vec::new();
        let mut pos = at;

        loop {
            match tokens[pos].keyword() {
                Some(Keyword::If) | Some(Keyword::Elif) => {
                    let condition = pos + 1;
                    let body_start = expression_end(tokens, condition);
                    let close = self.block_close(tokens, pos, BlockPolicy::CONDITIONAL)?;
                    clauses.push((Some(condition), body_start..close));
                    pos = close;
                }
                Some(Keyword::Else) => {
                    let close = self.else_clause_end(tokens, pos)?;
                    clauses.push((None, pos + 1..close));
                    pos = close;
                }
                _ => break,
            }
        }

        let end = pos;

        for (condition, body) in clauses {
            let taken = match condition {
                Some(start) => {
                    let (_, value) = self.evaluate(tokens, start)?;
                    is_truthy(&value)
                }
                None => true,
            };

            if taken {
                if self.execute_range(tokens, body.start, body.end)? == ExecSignal::Exit {
                    return Ok(Flow::Exit);
                }
                break;
            }
        }

        Ok(Flow::Advance(end + 1))
    }

    /* ------------------------------------------------------------------------
     * while / for
     * ---------------------------------------------------------------------- */

    /// `while <expr> ... [else ...] end`
    ///
    /// The condition is re-evaluated before every iteration. The `else`
    /// body runs once after the condition turns false; `exit` skips it.
    fn exec_while(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        let condition = at + 1;
        let body_start = expression_end(tokens, condition);
        let close = self.block_close(tokens, at, BlockPolicy::LOOP)?;
        let (else_body, end) = self.loop_else(tokens, close)?;

        let mut iterations = 0u64;
        loop {
            let (_, value) = self.evaluate(tokens, condition)?;
            if !is_truthy(&value) {
                break;
            }

            iterations += 1;
            if self.execute_range(tokens, body_start, close)? == ExecSignal::Exit {
                return Ok(Flow::Exit);
            }
        }

        tracing::debug!(line = tokens[at].span.line, iterations, "while loop finished");
        self.finish_loop(tokens, else_body, end)
    }

    /// `for <name> in <expr> to <expr> ... [else ...] end`
    ///
    /// Both bounds are evaluated once and must be integers; the range is
    /// inclusive. Assigning to the loop variable inside the body does not
    /// change the iteration sequence.
    fn exec_for(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        let variable = self.expect_identifier(tokens, at + 1, Keyword::For)?;
        self.expect_keyword(tokens, at + 2, Keyword::In)?;

        let from = at + 3;
        let to_keyword = expression_end(tokens, from);
        self.expect_keyword(tokens, to_keyword, Keyword::To)?;
        if to_keyword == from {
            return Err(self.missing_bound(tokens, from, Keyword::In));
        }

        let to = to_keyword + 1;
        let body_start = expression_end(tokens, to);
        if body_start == to {
            return Err(self.missing_bound(tokens, to, Keyword::To));
        }

        let close = self.block_close(tokens, at, BlockPolicy::LOOP)?;
        let (else_body, end) = self.loop_else(tokens, close)?;

        let first = self.range_bound(tokens, from, to_keyword)?;
        let last = match first {
            Some(_) => self.range_bound(tokens, to, to)?,
            None => None,
        };

        let (Some(first), Some(last)) = (first, last) else {
            return Ok(Flow::Advance(end + 1));
        };

        for i in first..=last {
            self.ctx.variables.assign(variable.as_str(), Value::Int(i));
            if self.execute_range(tokens, body_start, close)? == ExecSignal::Exit {
                return Ok(Flow::Exit);
            }
        }

        tracing::debug!(
            line = tokens[at].span.line,
            iterations = last.saturating_sub(first).saturating_add(1).max(0),
            "for loop finished"
        );
        self.finish_loop(tokens, else_body, end)
    }

    fn missing_bound(&self, tokens: &[Token], index: usize, after: Keyword) -> OkerewError {
        match tokens.get(index) {
            Some(token) => OkerewError::syntax_error(
                format!("expected a bound after `{}`, found `{}`", after, token),
                token.span,
            ),
            None => self.missing(tokens, format!("expected a bound after `{}`", after)),
        }
    }

    /// Evaluates one `for` bound; anything but an integer is reported and
    /// yields `None`, which skips the loop. `Nothing` means the evaluation
    /// error was already reported.
    fn range_bound(&mut self, tokens: &[Token], start: usize, anchor: usize) -> Result<Option<i64>> {
        match self.evaluate(tokens, start)?.1 {
            Value::Int(n) => Ok(Some(n)),
            Value::Nothing => Ok(None),
            other => {
                self.report(&OkerewError::evaluation_error(
                    format!("`for` bounds must be integers, found {}", other.type_name()),
                    tokens[anchor.min(tokens.len() - 1)].span,
                ))?;
                Ok(None)
            }
        }
    }

    /// Splits off an optional loop-else clause starting at `close`.
    ///
    /// Returns the else body range (if any) and the index of the final
    /// `end`.
    fn loop_else(&mut self, tokens: &[Token], close: usize) -> Result<(Option<Range<usize>>, usize)> {
        if tokens[close].is_keyword(Keyword::Else) {
            let end = self.else_clause_end(tokens, close)?;
            Ok((Some(close + 1..end), end))
        } else {
            Ok((None, close))
        }
    }

    fn finish_loop(&mut self, tokens: &[Token], else_body: Option<Range<usize>>, end: usize) -> Result<Flow> {
        if let Some(body) = else_body {
            if self.execute_range(tokens, body.start, body.end)? == ExecSignal::Exit {
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Advance(end + 1))
    }

    /// An `else` clause runs to `end`; another clause after it is a
    /// syntax error.
    fn else_clause_end(&mut self, tokens: &[Token], else_at: usize) -> Result<usize> {
        let close = self.block_close(tokens, else_at, BlockPolicy::ELSE_CLAUSE)?;

        if tokens[close].is_keyword(Keyword::End) {
            Ok(close)
        } else {
            Err(OkerewError::syntax_error(
                format!("`{}` cannot follow `else`", tokens[close].lexeme),
                tokens[close].span,
            ))
        }
    }

    /* ------------------------------------------------------------------------
     * Shared Helpers
     * ---------------------------------------------------------------------- */

    /// `find_block_close`, memoized per opener. The opener's keyword fixes
    /// the policy, so the key needs no policy component.
    pub(crate) fn block_close(&mut self, tokens: &[Token], start: usize, policy: BlockPolicy) -> Result<usize> {
        let key = (tokens.as_ptr() as usize, tokens.len(), start);

        if let Some(&close) = self.block_closes.get(&key) {
            return Ok(close);
        }

        let close = find_block_close(tokens, start, policy)?;
        self.block_closes.insert(key, close);
        Ok(close)
    }

    /// Evaluates the expression at `start`, turning an evaluation error
    /// into a reported `Nothing`.
    ///
    /// Returns the index just past the expression with the value.
    pub(crate) fn evaluate(&mut self, tokens: &[Token], start: usize) -> Result<(usize, Value)> {
        let (end, result) = evaluate_at(tokens, start, &self.ctx.variables);

        match result {
            Ok(value) => Ok((end, value)),
            Err(err) if err.kind == ErrorKind::Evaluation => {
                self.report(&err)?;
                Ok((end, Value::Nothing))
            }
            Err(err) => Err(err),
        }
    }

    /// Writes a non-fatal error to the program output.
    pub(crate) fn report(&mut self, err: &OkerewError) -> Result<()> {
        tracing::warn!(
            code = err.code(),
            line = err.span.line,
            column = err.span.column + 1,
            "{}",
            err.message
        );
        self.console
            .write_line(&format!("Error evaluating expression: {}", err.message))?;
        Ok(())
    }

    pub(crate) fn expect_identifier(&self, tokens: &[Token], index: usize, after: Keyword) -> Result<String> {
        match tokens.get(index) {
            Some(token) => token.identifier().map(str::to_string).ok_or_else(|| {
                OkerewError::syntax_error(
                    format!("expected a name after `{}`, found `{}`", after, token),
                    token.span,
                )
            }),
            None => Err(self.missing(tokens, format!("expected a name after `{}`", after))),
        }
    }

    fn expect_keyword(&self, tokens: &[Token], index: usize, expected: Keyword) -> Result<()> {
        match tokens.get(index) {
            Some(token) if token.is_keyword(expected) => Ok(()),
            Some(token) => Err(OkerewError::syntax_error(
                format!("expected `{}`, found `{}`", expected, token),
                token.span,
            )),
            None => Err(self.missing(tokens, format!("expected `{}`", expected))),
        }
    }

    /// Syntax error for a token that should exist after the last one.
    fn missing(&self, tokens: &[Token], message: String) -> OkerewError {
        let span = tokens.last().map(|t| t.span).unwrap_or_default();
        OkerewError::syntax_error(format!("{}, found end of input", message), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::console::BufferedConsole;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    #[test]
    fn loop_iterations_reuse_matched_blocks() {
        let tokens = tokenize(
            "i = 0\nwhile i < 10\n  if i % 2\n    odd = i\n  else\n    even = i\n  end\n  i = i + 1\nend",
        )
        .unwrap();

        let mut ctx = InterpreterContext::default();
        let mut console = BufferedConsole::new();
        let mut executor = Executor::new(&mut ctx, &mut console);

        assert_eq!(executor.execute(&tokens).unwrap(), ExecSignal::Next);
        // `while`, `if` and `else`, each matched once.
        assert_eq!(executor.block_closes.len(), 3);

        assert_eq!(ctx.variables.get("odd"), Some(&Value::Int(9)));
        assert_eq!(ctx.variables.get("even"), Some(&Value::Int(8)));
    }

    #[test]
    fn storing_a_function_forgets_matched_blocks() {
        let tokens = tokenize("if 1\n  x = 1\nend\nfunc f\n  x = 2\nleave").unwrap();

        let mut ctx = InterpreterContext::default();
        let mut console = BufferedConsole::new();
        let mut executor = Executor::new(&mut ctx, &mut console);

        executor.execute(&tokens).unwrap();
        assert!(executor.block_closes.is_empty());
    }
}
