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
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use serde::Serialize;
use thiserror::Error;

use crate::span::Span;

/// The broad category of an [`OkerewError`].
///
/// Lexical, syntax, block and I/O errors always abort a run. Evaluation
/// errors raised while computing an expression are reported and the
/// statement carries on with the "no value" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Lex,
    Syntax,
    Evaluation,
    UnterminatedBlock,
    Io,
}

impl ErrorKind {
    /// Stable error code shown in diagnostics.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Lex => "E_LEX",
            ErrorKind::Syntax => "E_SYNTAX",
            ErrorKind::Evaluation => "E_EVAL",
            ErrorKind::UnterminatedBlock => "E_BLOCK",
            ErrorKind::Io => "E_IO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct OkerewError {
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Primary source location
    pub span: Span,

    /// Optional note / help text
    pub help: Option<String>,
}

impl OkerewError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            help: None,
        }
    }

    /// Unrecognized input while tokenizing.
    pub fn lex_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lex, message, span)
    }

    /// A specific token was required and something else was found.
    pub fn syntax_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    /// Unbound identifier, type mismatch, division by zero, ...
    pub fn evaluation_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Evaluation, message, span)
    }

    /// A block opener whose terminator never shows up.
    pub fn unterminated_block(opener: &str, terminator: &str, span: Span) -> Self {
        Self::new(
            ErrorKind::UnterminatedBlock,
            format!("unterminated `{}` block", opener),
            span,
        )
        .with_help(format!("close the block with `{}`", terminator))
    }

    /// Console failure while reading input or writing output.
    pub fn io_error(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, format!("console I/O failed: {}", err), Span::default())
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl From<std::io::Error> for OkerewError {
    fn from(err: std::io::Error) -> Self {
        OkerewError::io_error(err)
    }
}

pub type Result<T> = std::result::Result<T, OkerewError>;
