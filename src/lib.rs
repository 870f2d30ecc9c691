/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * Library root. The binary in `main.rs` is a thin shell over these
 * modules; embedders drive `Interpreter` directly with their own
 * `Console`.
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

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod loader;
pub mod span;
pub mod value;

pub use config::InterpreterConfig;
pub use diagnostics::DiagnosticPrinter;
pub use error::{ErrorKind, OkerewError, Result};
pub use interpreter::{BufferedConsole, Console, ExecSignal, Interpreter, StdConsole};
pub use lexer::{tokenize, Token, TokenKind};
pub use loader::{load_source, LoadError, SOURCE_EXTENSION};
pub use span::Span;
pub use value::Value;
