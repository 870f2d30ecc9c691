/*
 * ============================================================================
 * OKEREW - Token-Stream Scripting
 * ============================================================================
 *
 * Expression Evaluation Engine
 * -----------------------------
 * Evaluates the run of value-bearing tokens that follows `print`, `if`,
 * `while`, `for` bounds and assignments. The run is parsed and evaluated
 * in one recursive-descent pass over the declared operator set; nothing
 * is compiled and no tree is kept.
 *
 * Precedence, lowest first:
 *   comparison → | → ^ → & → shift → term → factor → unary → power → primary
 *
 * This module only ever reads the variable store.
 *
 * ---------------------------------------------------------------------------
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

use crate::error::{OkerewError, Result};
use crate::interpreter::environment::VariableStore;
use crate::interpreter::operators::{apply_binary, apply_unary};
use crate::interpreter::stack::ensure_sufficient_stack;
use crate::lexer::{Operator, Token, TokenKind};
use crate::span::Span;
use crate::value::Value;

/// Index one past the expression run starting at `start`.
///
/// The run is the maximal stretch of number, identifier, operator and
/// string tokens; it stops at a newline, keyword, `=` or end of stream.
pub fn expression_end(tokens: &[Token], start: usize) -> usize {
    let start = start.min(tokens.len());

    tokens[start..]
        .iter()
        .position(|t| !t.is_value_bearing())
        .map_or(tokens.len(), |offset| start + offset)
}

/// Evaluates the expression run beginning at `start`.
///
/// # Returns
/// The index just past the run, paired with the evaluation result. The
/// index is valid even when evaluation fails, so callers can keep going.
pub fn evaluate_at(tokens: &[Token], start: usize, vars: &VariableStore) -> (usize, Result<Value>) {
    let end = expression_end(tokens, start);
    let start = start.min(end);
    (end, evaluate_run(&tokens[start..end], vars))
}

/// Evaluates a complete run of value-bearing tokens.
///
/// An empty run is the "no value" sentinel, not an error. Tokens left
/// over after a complete expression (`1 2`) are an error.
pub fn evaluate_run(run: &[Token], vars: &VariableStore) -> Result<Value> {
    if run.is_empty() {
        return Ok(Value::Nothing);
    }

    let mut parser = ExprParser {
        tokens: run,
        current: 0,
        vars,
    };

    let value = parser.comparison()?;

    if let Some(extra) = parser.peek() {
        return Err(OkerewError::evaluation_error(
            format!("unexpected `{}` in expression", extra),
            extra.span,
        ));
    }

    Ok(value)
}

/// Cursor over one expression run.
struct ExprParser<'a> {
    tokens: &'a [Token],
    current: usize,
    vars: &'a VariableStore,
}

impl<'a> ExprParser<'a> {
    /// `==  !=  <  <=  >  >=`, left associative.
    fn comparison(&mut self) -> Result<Value> {
        let mut left = self.bit_or()?;

        while let Some((op, span)) = self.match_operator(&[
            Operator::Equal,
            Operator::NotEqual,
            Operator::Less,
            Operator::LessEqual,
            Operator::Greater,
            Operator::GreaterEqual,
        ]) {
            let right = self.bit_or()?;
            left = apply_binary(op, left, right, span)?;
        }

        Ok(left)
    }

    fn bit_or(&mut self) -> Result<Value> {
        let mut left = self.bit_xor()?;
        while let Some((op, span)) = self.match_operator(&[Operator::Pipe]) {
            let right = self.bit_xor()?;
            left = apply_binary(op, left, right, span)?;
        }
        Ok(left)
    }

    fn bit_xor(&mut self) -> Result<Value> {
        let mut left = self.bit_and()?;
        while let Some((op, span)) = self.match_operator(&[Operator::Caret]) {
            let right = self.bit_and()?;
            left = apply_binary(op, left, right, span)?;
        }
        Ok(left)
    }

    fn bit_and(&mut self) -> Result<Value> {
        let mut left = self.shift()?;
        while let Some((op, span)) = self.match_operator(&[Operator::Ampersand]) {
            let right = self.shift()?;
            left = apply_binary(op, left, right, span)?;
        }
        Ok(left)
    }

    fn shift(&mut self) -> Result<Value> {
        let mut left = self.term()?;
        while let Some((op, span)) =
            self.match_operator(&[Operator::ShiftLeft, Operator::ShiftRight])
        {
            let right = self.term()?;
            left = apply_binary(op, left, right, span)?;
        }
        Ok(left)
    }

    /// `+  -`
    fn term(&mut self) -> Result<Value> {
        let mut left = self.factor()?;
        while let Some((op, span)) = self.match_operator(&[Operator::Plus, Operator::Minus]) {
            let right = self.factor()?;
            left = apply_binary(op, left, right, span)?;
        }
        Ok(left)
    }

    /// `*  /  //  %`
    fn factor(&mut self) -> Result<Value> {
        let mut left = self.unary()?;
        while let Some((op, span)) = self.match_operator(&[
            Operator::Star,
            Operator::Slash,
            Operator::FloorDiv,
            Operator::Percent,
        ]) {
            let right = self.unary()?;
            left = apply_binary(op, left, right, span)?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Value> {
        ensure_sufficient_stack(|| self.unary_inner())
    }

    fn unary_inner(&mut self) -> Result<Value> {
        if let Some((op, span)) = self.match_operator(&[Operator::Minus, Operator::Plus]) {
            let operand = self.unary()?;
            return apply_unary(op, operand, span);
        }

        self.power()
    }

    /// `**` is right associative and binds tighter than a unary minus on
    /// its left: `-2 ** 2` is `-4`, `2 ** -1` is `0.5`.
    fn power(&mut self) -> Result<Value> {
        let base = self.primary()?;

        if let Some((op, span)) = self.match_operator(&[Operator::Power]) {
            let exponent = self.unary()?;
            return apply_binary(op, base, exponent, span);
        }

        Ok(base)
    }

    /// Parenthesized runs recurse back to `comparison`, so nesting depth
    /// is bounded only by the input.
    fn primary(&mut self) -> Result<Value> {
        ensure_sufficient_stack(|| self.primary_inner())
    }

    fn primary_inner(&mut self) -> Result<Value> {
        let Some(token) = self.advance() else {
            let span = self.tokens.last().map(|t| t.span).unwrap_or_default();
            return Err(OkerewError::evaluation_error(
                "expression ended unexpectedly",
                span,
            ));
        };

        match &token.kind {
            TokenKind::Number(n) => Ok(Value::from(*n)),
            TokenKind::Str(s) => Ok(Value::Str(s.clone())),

            TokenKind::Identifier(name) => self.vars.get(name).cloned().ok_or_else(|| {
                OkerewError::evaluation_error(format!("name `{}` is not defined", name), token.span)
            }),

            TokenKind::Operator(Operator::LeftParen) => {
                let value = self.comparison()?;
                if self.match_operator(&[Operator::RightParen]).is_none() {
                    return Err(OkerewError::evaluation_error(
                        "expected `)` to close `(`",
                        token.span,
                    ));
                }
                Ok(value)
            }

            _ => Err(OkerewError::evaluation_error(
                format!("unexpected `{}` in expression", token),
                token.span,
            )),
        }
    }

    /// Consumes the current token if it is one of `ops`.
    fn match_operator(&mut self, ops: &[Operator]) -> Option<(Operator, Span)> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Operator(op) if ops.contains(&op) => {
                let span = token.span;
                self.current += 1;
                Some((op, span))
            }
            _ => None,
        }
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn eval_with(source: &str, vars: &VariableStore) -> Result<Value> {
        let tokens = tokenize(source).unwrap();
        evaluate_at(&tokens, 0, vars).1
    }

    fn eval(source: &str) -> Result<Value> {
        eval_with(source, &VariableStore::new())
    }

    #[test]
    fn standard_precedence() {
        assert_eq!(eval("2 + 3 * 4"), Ok(Value::Int(14)));
        assert_eq!(eval("(2 + 3) * 4"), Ok(Value::Int(20)));
        assert_eq!(eval("10 - 4 - 3"), Ok(Value::Int(3)));
        assert_eq!(eval("2 ** 3 ** 2"), Ok(Value::Int(512)));
        assert_eq!(eval("-2 ** 2"), Ok(Value::Int(-4)));
        assert_eq!(eval("2 ** -1"), Ok(Value::Float(0.5)));
        assert_eq!(eval("1 + 2 << 1"), Ok(Value::Int(6)));
        assert_eq!(eval("6 & 3 | 8"), Ok(Value::Int(10)));
    }

    #[test]
    fn comparisons_bind_loosest() {
        assert_eq!(eval("1 + 1 == 2"), Ok(Value::Bool(true)));
        assert_eq!(eval("3 * 2 < 5"), Ok(Value::Bool(false)));
        assert_eq!(eval("'a' + 'b' == 'ab'"), Ok(Value::Bool(true)));
    }

    #[test]
    fn identifiers_read_the_store() {
        let mut vars = VariableStore::new();
        vars.assign("x", Value::Int(4));
        vars.assign("name", Value::Str("cat".into()));

        assert_eq!(eval_with("x * x + 1", &vars), Ok(Value::Int(17)));
        assert_eq!(eval_with("name + 's'", &vars), Ok(Value::Str("cats".into())));
    }

    #[test]
    fn unbound_identifier_fails() {
        let err = eval("y + 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Evaluation);
        assert_eq!(err.message, "name `y` is not defined");
    }

    #[test]
    fn empty_run_is_nothing() {
        let tokens = tokenize("print\nx = 1").unwrap();
        let (end, value) = evaluate_at(&tokens, 1, &VariableStore::new());
        assert_eq!(end, 1);
        assert_eq!(value, Ok(Value::Nothing));
    }

    #[test]
    fn run_stops_at_keywords_and_newlines() {
        let tokens = tokenize("x < 3 print x\ny").unwrap();
        assert_eq!(expression_end(&tokens, 0), 3);
        assert_eq!(expression_end(&tokens, 4), 5);
        assert_eq!(expression_end(&tokens, 6), 7);
        assert_eq!(expression_end(&tokens, 99), tokens.len());
    }

    #[test]
    fn malformed_runs_fail() {
        assert_eq!(eval("1 2").unwrap_err().message, "unexpected `2` in expression");
        assert_eq!(eval("(1 + 2").unwrap_err().message, "expected `)` to close `(`");
        assert_eq!(eval("1 +").unwrap_err().message, "expression ended unexpectedly");
        assert_eq!(eval(") 1").unwrap_err().message, "unexpected `)` in expression");
    }

    #[test]
    fn division_by_zero_fails() {
        let err = eval("10 / (5 - 5)").unwrap_err();
        assert_eq!(err.message, "division by zero");
        assert_eq!(err.span.column, 3);
    }
}
