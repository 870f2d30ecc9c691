/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * License:
 * This file is part of the Okerew scripting language project.
 *
 * Okerew is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::MAX_CALL_DEPTH_VAR;
use crate::error::{OkerewError, Result};
use crate::interpreter::blocks::BlockPolicy;
use crate::interpreter::stack::ensure_sufficient_stack;
use crate::interpreter::statements::{ExecSignal, Executor, Flow};
use crate::lexer::{render_tokens, Keyword, Token};
use crate::span::Span;

/// Named function bodies, stored as the raw tokens between
/// `func <name>` and the balancing `leave`.
///
/// Bodies are reference counted so an invocation can hold its tokens
/// while the body itself redefines functions.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Rc<[Token]>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, replacing any earlier definition.
    pub fn define(&mut self, name: impl Into<String>, body: Vec<Token>) {
        self.functions.insert(name.into(), Rc::from(body));
    }

    pub fn get(&self, name: &str) -> Option<Rc<[Token]>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<'a> Executor<'a> {
    /// `func <name> ... leave`
    ///
    /// Stores the body and moves the cursor past `leave`. Nothing in the
    /// body runs until the function is called.
    pub(crate) fn exec_func(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        let name = match tokens.get(at + 1).and_then(Token::identifier) {
            Some(name) => name.to_string(),
            None => {
                let span = tokens.get(at + 1).unwrap_or(&tokens[at]).span;
                return Err(OkerewError::syntax_error(
                    "function name must be an identifier",
                    span,
                )
                .with_help("write `func <name>` followed by the body and `leave`"));
            }
        };

        let close = self.block_close(tokens, at, BlockPolicy::FUNCTION)?;
        let body = tokens[at + 2..close].to_vec();

        tracing::debug!(
            function = %name,
            tokens = body.len(),
            body = %render_tokens(&body),
            "defined function"
        );

        self.ctx.functions.define(name, body);
        self.block_closes.clear();
        Ok(Flow::Advance(close + 1))
    }

    /// `exec <name>`: an explicit call. An unknown name is reported and
    /// skipped like any other evaluation error.
    pub(crate) fn exec_call(&mut self, tokens: &[Token], at: usize) -> Result<Flow> {
        let name = self.expect_identifier(tokens, at + 1, Keyword::Exec)?;
        let span = tokens[at + 1].span;

        if !self.ctx.functions.contains(&name) {
            self.report(&OkerewError::evaluation_error(
                format!("function `{}` is not defined", name),
                span,
            ))?;
            return Ok(Flow::Advance(at + 2));
        }

        match self.invoke(&name, span)? {
            ExecSignal::Exit => Ok(Flow::Exit),
            ExecSignal::Next => Ok(Flow::Advance(at + 2)),
        }
    }

    /// Runs the body of `name` against the shared variable store.
    ///
    /// The caller's cursor is untouched; `ExecSignal::Exit` bubbles up so
    /// `exit` inside a function stops the whole program.
    ///
    /// # Errors
    /// - `name` is not defined
    /// - the call would exceed `max_call_depth`
    pub fn invoke(&mut self, name: &str, span: Span) -> Result<ExecSignal> {
        let body = self.ctx.functions.get(name).ok_or_else(|| {
            OkerewError::evaluation_error(format!("function `{}` is not defined", name), span)
        })?;

        let limit = self.ctx.config.max_call_depth;
        if self.ctx.call_depth >= limit {
            return Err(OkerewError::evaluation_error(
                format!("maximum call depth of {} exceeded in `{}`", limit, name),
                span,
            )
            .with_help(format!(
                "check for runaway recursion or raise {}",
                MAX_CALL_DEPTH_VAR
            )));
        }

        self.ctx.call_depth += 1;
        let _call = tracing::debug_span!("call", function = name, depth = self.ctx.call_depth).entered();

        let result = ensure_sufficient_stack(|| self.execute(&body));

        self.ctx.call_depth -= 1;
        result
    }
}
