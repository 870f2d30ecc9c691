/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * File:      keywords.rs
 * Purpose:   Reserved words of the Okerew language.
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

/// A reserved Okerew keyword.
///
/// Keyword detection happens in the lexer before identifiers are tried,
/// so none of these words can be used as a variable or function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    Input,
    Print,
    Exec,
    Func,
    For,
    While,
    If,
    Else,
    Exit,
    Elif,
    Leave,

    /// Closes `if`, `while` and `for` blocks.
    End,

    /// `for i in 1 to 5`
    In,
    To,
}

/// Every keyword, in the order the lexer tries them.
pub const KEYWORDS: [Keyword; 14] = [
    Keyword::Input,
    Keyword::Print,
    Keyword::Exec,
    Keyword::Func,
    Keyword::For,
    Keyword::While,
    Keyword::If,
    Keyword::Else,
    Keyword::Exit,
    Keyword::Elif,
    Keyword::Leave,
    Keyword::End,
    Keyword::In,
    Keyword::To,
];

impl Keyword {
    /// Looks up the keyword spelled `word`.
    ///
    /// # Returns
    /// - `Some(keyword)` if the word is reserved
    /// - `None` if it should be treated as a normal identifier
    pub fn from_word(word: &str) -> Option<Keyword> {
        KEYWORDS.iter().copied().find(|kw| kw.as_str() == word)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Input => "input",
            Keyword::Print => "print",
            Keyword::Exec => "exec",
            Keyword::Func => "func",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Exit => "exit",
            Keyword::Elif => "elif",
            Keyword::Leave => "leave",
            Keyword::End => "end",
            Keyword::In => "in",
            Keyword::To => "to",
        }
    }

    /// `true` for the keywords that open an `end`-terminated block.
    pub fn opens_block(self) -> bool {
        matches!(self, Keyword::If | Keyword::While | Keyword::For)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
