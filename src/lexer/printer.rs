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

use crate::lexer::token::{Token, TokenKind};

/// Renders a token sequence back into canonical Okerew source.
///
/// Tokens on a line are separated by one space and each `Newline` token
/// becomes a line break. Lexing the result yields the same kinds and
/// lexemes; whitespace and comments from the input are gone.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut at_line_start = true;

    for token in tokens {
        if let TokenKind::Newline = token.kind {
            out.push('\n');
            at_line_start = true;
            continue;
        }

        if !at_line_start {
            out.push(' ');
        }
        out.push_str(&token.lexeme);
        at_line_start = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_spacing_and_drops_comments() {
        let tokens = tokenize("x=1+2   ? sum\n\n  print  'a  b'").unwrap();
        assert_eq!(render_tokens(&tokens), "x = 1 + 2\n\nprint 'a  b'");
    }
}
