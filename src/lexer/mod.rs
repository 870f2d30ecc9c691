/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * File:     lexer/mod.rs
 * Purpose:  Root module for tokenization.
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

/// Reserved words.
pub mod keywords;

/// Regex-driven scanner.
#[allow(clippy::module_inception)]
pub mod lexer;

/// Canonical token-to-source rendering.
pub mod printer;

/// Token kinds and payloads.
pub mod token;

use crate::error::Result;

pub use keywords::Keyword;
pub use lexer::Lexer;
pub use printer::render_tokens;
pub use token::{Number, Operator, Token, TokenKind};

/// Tokenizes a complete Okerew source string.
///
/// # Example
/// ```
/// let tokens = okerew::lexer::tokenize("print 'hi'").unwrap();
/// assert_eq!(tokens.len(), 2);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    lexer.scan_tokens()?;
    Ok(lexer.tokens)
}
