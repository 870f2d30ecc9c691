/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * Interpreter Entry
 * -----------------
 * Owns the interpreter context and drives a token stream through the
 * statement executor.
 *
 * Evaluation logic lives in the submodules:
 *
 *  - statements.rs  → statement dispatch and control flow
 *  - expressions.rs → expression runs
 *  - operators.rs   → binary and unary operator semantics
 *  - blocks.rs      → block and clause boundaries
 *  - calls.rs       → function definition and invocation
 *  - display.rs     → value formatting
 *  - stack.rs       → stack growth for deep recursion
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
 * ==========================================================================
 */

pub mod blocks;
pub mod calls;
pub mod console;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod helpers;
pub mod operators;
pub mod stack;
pub mod statements;

use crate::config::InterpreterConfig;
use crate::error::Result;
use crate::lexer::{tokenize, Token};
use crate::value::Value;

pub use blocks::{find_block_close, BlockPolicy};
pub use calls::FunctionTable;
pub use console::{BufferedConsole, Console, StdConsole};
pub use display::value_to_string;
pub use environment::{InterpreterContext, VariableStore};
pub use expressions::{evaluate_at, evaluate_run, expression_end};
pub use helpers::is_truthy;
pub use statements::{ExecSignal, Executor};

/// A reusable interpreter. Variables and functions persist across runs.
#[derive(Debug, Default)]
pub struct Interpreter {
    context: InterpreterContext,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            context: InterpreterContext::new(config),
        }
    }

    pub fn context(&self) -> &InterpreterContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut InterpreterContext {
        &mut self.context
    }

    pub fn into_context(self) -> InterpreterContext {
        self.context
    }

    /// Current value of a global variable.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.context.variables.get(name)
    }

    /// Executes a token stream from the first token to the last.
    ///
    /// Evaluation errors are written to `console` and execution goes on;
    /// the returned error is always fatal (syntax, unterminated block,
    /// call depth, or console I/O).
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
    pub fn run(&mut self, tokens: &[Token], console: &mut dyn Console) -> Result<ExecSignal> {
        let signal = Executor::new(&mut self.context, console).execute(tokens)?;

        tracing::debug!(
            ?signal,
            variables = self.context.variables.len(),
            functions = self.context.functions.len(),
            "program finished"
        );

        Ok(signal)
    }

    /// Tokenizes and runs `source`.
    pub fn run_source(&mut self, source: &str, console: &mut dyn Console) -> Result<ExecSignal> {
        let tokens = tokenize(source)?;
        self.run(&tokens, console)
    }
}
