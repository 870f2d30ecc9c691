/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * File:      token.rs
 * Purpose:   Lexical token types consumed directly by the interpreter.
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
use std::fmt;

use crate::lexer::keywords::Keyword;
use crate::span::Span;

/// A symbolic operator.
///
/// Covers arithmetic, bitwise and comparison operators plus the two
/// grouping parentheses used inside expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    Power,
    FloorDiv,
    ShiftLeft,
    ShiftRight,
    Equal,
    NotEqual,
    GreaterEqual,
    LessEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Ampersand,
    Pipe,
    Caret,
    Greater,
    Less,
    LeftParen,
    RightParen,
}

/// Every operator, longest spelling first.
///
/// The lexer builds its operator alternation from this order so `<=`
/// wins over `<` and `**` over `*`.
pub const OPERATORS: [Operator; 20] = [
    Operator::Power,
    Operator::FloorDiv,
    Operator::ShiftLeft,
    Operator::ShiftRight,
    Operator::Equal,
    Operator::NotEqual,
    Operator::GreaterEqual,
    Operator::LessEqual,
    Operator::Plus,
    Operator::Minus,
    Operator::Star,
    Operator::Slash,
    Operator::Percent,
    Operator::Ampersand,
    Operator::Pipe,
    Operator::Caret,
    Operator::Greater,
    Operator::Less,
    Operator::LeftParen,
    Operator::RightParen,
];

impl Operator {
    pub fn from_lexeme(text: &str) -> Option<Operator> {
        OPERATORS.iter().copied().find(|op| op.as_str() == text)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Power => "**",
            Operator::FloorDiv => "//",
            Operator::ShiftLeft => "<<",
            Operator::ShiftRight => ">>",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Ampersand => "&",
            Operator::Pipe => "|",
            Operator::Caret => "^",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::LeftParen => "(",
            Operator::RightParen => ")",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric literal, parsed once by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// The category of a token together with its parsed payload.
///
/// # Pipeline Role
/// ```text
/// Source Code → Lexer → Vec<Token> → Statement Interpreter
/// ```
///
/// There is no parser stage: the interpreter reads these kinds directly,
/// so each variant carries exactly the data a statement handler needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    /// A reserved word such as `print` or `while`.
    Keyword(Keyword),

    /// An arithmetic, bitwise, comparison or grouping symbol.
    Operator(Operator),

    /// The single `=` used by assignment statements.
    Assignment,

    /// A variable or function name.
    Identifier(String),

    /// `42` or `3.14`
    Number(Number),

    /// Contents of a single-quoted string literal, quotes removed.
    Str(String),

    /// Statement separator.
    Newline,
}

/// A single lexical token.
///
/// # Example Tokens
/// ```text
/// print  →  { kind: Keyword(Print),      lexeme: "print",  line: 1 }
/// total  →  { kind: Identifier("total"), lexeme: "total",  line: 1 }
/// 'hi'   →  { kind: Str("hi"),           lexeme: "'hi'",   line: 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,

    /// The exact source text that produced this token, quotes included.
    pub lexeme: String,

    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.keyword() == Some(kw)
    }

    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// `true` for the kinds an expression run is built from:
    /// numbers, identifiers, operators and strings.
    pub fn is_value_bearing(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number(_)
                | TokenKind::Identifier(_)
                | TokenKind::Operator(_)
                | TokenKind::Str(_)
        )
    }
}

impl fmt::Display for Token {
    /// Prints only the token's lexeme, the text the user wrote.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline => f.write_str("newline"),
            _ => f.write_str(&self.lexeme),
        }
    }
}
