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

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{OkerewError, Result};
use crate::lexer::keywords::{Keyword, KEYWORDS};
use crate::lexer::token::{Number, Operator, Token, TokenKind, OPERATORS};
use crate::span::Span;

/// Lexical classes, in the priority order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Keyword,
    Operator,
    Assignment,
    Identifier,
    Number,
    Str,
    Newline,
    Whitespace,
    Comment,
}

const CLASS_GROUPS: [(&str, Class); 9] = [
    ("keyword", Class::Keyword),
    ("operator", Class::Operator),
    ("assignment", Class::Assignment),
    ("identifier", Class::Identifier),
    ("number", Class::Number),
    ("string", Class::Str),
    ("newline", Class::Newline),
    ("whitespace", Class::Whitespace),
    ("comment", Class::Comment),
];

/// One anchored alternation over every lexical class.
///
/// Alternation is leftmost-first, so the group order here is the class
/// priority: keywords beat identifiers and `==` beats `=`.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let keywords = KEYWORDS
        .iter()
        .map(|kw| kw.as_str())
        .collect::<Vec<_>>()
        .join("|");

    let operators = OPERATORS
        .iter()
        .map(|op| regex::escape(op.as_str()))
        .collect::<Vec<_>>()
        .join("|");

    let pattern = format!(
        concat!(
            r"\A(?:",
            r"(?P<keyword>(?:{keywords})\b)",
            r"|(?P<operator>{operators})",
            r"|(?P<assignment>=)",
            r"|(?P<identifier>[A-Za-z_][A-Za-z0-9_]*)",
            r"|(?P<number>[0-9]+(?:\.[0-9]*)?)",
            r"|(?P<string>'[^']*')",
            r"|(?P<newline>\n)",
            r"|(?P<whitespace>[ \t\r\x0B\x0C]+)",
            r"|(?P<comment>\?[^\n]*)",
            r")"
        ),
        keywords = keywords,
        operators = operators,
    );

    Regex::new(&pattern).expect("token pattern must compile")
});

/// Converts Okerew source text into a token stream.
///
/// Whitespace and `?` comments are matched and dropped. Every other byte
/// must belong to a lexical class; the first one that does not aborts
/// lexing with a positioned `LexError`.
pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    line: usize,
    column: usize,
    pub tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 0,
            tokens: Vec::new(),
        }
    }

    /// Scans the whole input into `self.tokens`.
    ///
    /// Unlike a parser-facing lexer there is no end-of-file token; the
    /// interpreter stops when its cursor runs off the end of the vector.
    pub fn scan_tokens(&mut self) -> Result<()> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        tracing::debug!(tokens = self.tokens.len(), lines = self.line, "tokenized source");
        Ok(())
    }

    fn scan_token(&mut self) -> Result<()> {
        let source = self.source;
        let rest = &source[self.offset..];
        let span = Span::new(self.line, self.column);

        let caps = match TOKEN_PATTERN.captures(rest) {
            Some(caps) => caps,
            None => return Err(self.unrecognized(rest, span)),
        };

        let (class, text) = classify(&caps).ok_or_else(|| self.unrecognized(rest, span))?;

        let kind = match class {
            Class::Whitespace | Class::Comment => None,
            Class::Keyword => Some(TokenKind::Keyword(
                Keyword::from_word(text).ok_or_else(|| self.unrecognized(rest, span))?,
            )),
            Class::Operator => Some(TokenKind::Operator(
                Operator::from_lexeme(text).ok_or_else(|| self.unrecognized(rest, span))?,
            )),
            Class::Assignment => Some(TokenKind::Assignment),
            Class::Identifier => Some(TokenKind::Identifier(text.to_string())),
            Class::Number => Some(TokenKind::Number(parse_number(text, span)?)),
            Class::Str => Some(TokenKind::Str(text[1..text.len() - 1].to_string())),
            Class::Newline => Some(TokenKind::Newline),
        };

        if let Some(kind) = kind {
            self.tokens.push(Token::new(kind, text, span));
        }

        self.advance(text);
        Ok(())
    }

    /// Moves past `text`, keeping line and column in step.
    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.offset += text.len();
    }

    fn unrecognized(&self, rest: &str, span: Span) -> OkerewError {
        match rest.chars().next() {
            Some('\'') => OkerewError::lex_error("unterminated string literal", span)
                .with_help("close the string with a matching `'`"),
            Some(ch) => OkerewError::lex_error(
                format!("unexpected character `{}`", ch.escape_debug()),
                span,
            ),
            None => OkerewError::lex_error("unexpected end of input", span),
        }
    }

    fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }
}

/// Finds which named group matched.
fn classify<'t>(caps: &Captures<'t>) -> Option<(Class, &'t str)> {
    CLASS_GROUPS
        .iter()
        .find_map(|(group, class)| caps.name(group).map(|m| (*class, m.as_str())))
}

fn parse_number(text: &str, span: Span) -> Result<Number> {
    if text.contains('.') {
        text.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| OkerewError::lex_error(format!("invalid number literal `{}`", text), span))
    } else {
        text.parse::<i64>().map(Number::Int).map_err(|_| {
            OkerewError::lex_error(format!("integer literal `{}` is out of range", text), span)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("source should lex")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn assignment_with_arithmetic() {
        assert_eq!(
            kinds("x = 2 + 3 * 4"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Assignment,
                TokenKind::Number(Number::Int(2)),
                TokenKind::Operator(Operator::Plus),
                TokenKind::Number(Number::Int(3)),
                TokenKind::Operator(Operator::Star),
                TokenKind::Number(Number::Int(4)),
            ]
        );
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(
            kinds("a<=b**2//c==d"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Operator(Operator::LessEqual),
                TokenKind::Identifier("b".into()),
                TokenKind::Operator(Operator::Power),
                TokenKind::Number(Number::Int(2)),
                TokenKind::Operator(Operator::FloorDiv),
                TokenKind::Identifier("c".into()),
                TokenKind::Operator(Operator::Equal),
                TokenKind::Identifier("d".into()),
            ]
        );
    }

    #[test]
    fn keywords_need_a_word_boundary() {
        assert_eq!(
            kinds("print printer inputs in"),
            vec![
                TokenKind::Keyword(Keyword::Print),
                TokenKind::Identifier("printer".into()),
                TokenKind::Identifier("inputs".into()),
                TokenKind::Keyword(Keyword::In),
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_dropped() {
        assert_eq!(
            kinds("x = 1 ? set x\n\tprint x"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Assignment,
                TokenKind::Number(Number::Int(1)),
                TokenKind::Newline,
                TokenKind::Keyword(Keyword::Print),
                TokenKind::Identifier("x".into()),
            ]
        );
    }

    #[test]
    fn strings_keep_contents_literally() {
        let tokens = tokenize("print 'a \\n b'").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Str("a \\n b".into()));
        assert_eq!(tokens[1].lexeme, "'a \\n b'");
    }

    #[test]
    fn decimals_and_trailing_dot() {
        assert_eq!(
            kinds("3.25 7."),
            vec![
                TokenKind::Number(Number::Float(3.25)),
                TokenKind::Number(Number::Float(7.0)),
            ]
        );
    }

    #[test]
    fn spans_track_lines_and_columns() {
        let tokens = tokenize("x = 1\n  print x").unwrap();
        assert_eq!(tokens[4].span, Span::new(2, 2));
        assert_eq!(tokens[5].span, Span::new(2, 8));
    }

    #[test]
    fn unknown_character_is_a_lex_error() {
        let err = tokenize("x = 1\ny = $").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.span, Span::new(2, 4));
        assert_eq!(err.message, "unexpected character `$`");
    }

    #[test]
    fn unterminated_string_is_reported() {
        let err = tokenize("print 'oops").unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.span, Span::new(1, 6));
    }

    #[test]
    fn oversized_integer_is_rejected() {
        let err = tokenize("x = 99999999999999999999").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
    }
}
