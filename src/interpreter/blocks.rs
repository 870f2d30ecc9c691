/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * Block Matcher
 * -------------
 * Finds where a block or clause ends by scanning forward over the flat
 * token stream and counting nested openers. Nothing here executes code;
 * the statement interpreter uses the returned indices as range bounds.
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

use crate::error::{OkerewError, Result};
use crate::lexer::{Keyword, Token};

/// How a particular kind of block is delimited.
#[derive(Debug, Clone, Copy)]
pub struct BlockPolicy {
    /// Keywords that open a nested block of the same family.
    pub openers: &'static [Keyword],

    /// Keyword that closes a nested block.
    pub nested_close: Keyword,

    /// Keywords that end the current clause when seen at depth zero.
    pub stops: &'static [Keyword],

    /// Terminator named in the error when the stream runs out.
    pub terminator: Keyword,
}

const END_BLOCK_OPENERS: &[Keyword] = &[Keyword::If, Keyword::While, Keyword::For];

impl BlockPolicy {
    /// `if` and `elif` clauses: end at `elif`, `else` or `end`.
    pub const CONDITIONAL: BlockPolicy = BlockPolicy {
        openers: END_BLOCK_OPENERS,
        nested_close: Keyword::End,
        stops: &[Keyword::Elif, Keyword::Else, Keyword::End],
        terminator: Keyword::End,
    };

    /// `while` and `for` bodies: end at the loop-else or at `end`.
    pub const LOOP: BlockPolicy = BlockPolicy {
        openers: END_BLOCK_OPENERS,
        nested_close: Keyword::End,
        stops: &[Keyword::Else, Keyword::End],
        terminator: Keyword::End,
    };

    /// An `else` clause must run to `end`; the extra stops let the caller
    /// reject a second `else` or a trailing `elif`.
    pub const ELSE_CLAUSE: BlockPolicy = BlockPolicy {
        openers: END_BLOCK_OPENERS,
        nested_close: Keyword::End,
        stops: &[Keyword::Elif, Keyword::Else, Keyword::End],
        terminator: Keyword::End,
    };

    /// `func name ... leave`, with nested definitions balanced.
    pub const FUNCTION: BlockPolicy = BlockPolicy {
        openers: &[Keyword::Func],
        nested_close: Keyword::Leave,
        stops: &[Keyword::Leave],
        terminator: Keyword::Leave,
    };
}

/// Returns the index of the keyword that ends the block opened at `start`.
///
/// Scanning begins at `start + 1` with depth zero. Nested openers raise
/// the depth and `policy.nested_close` lowers it; the first stop keyword
/// met at depth zero is the answer. Inner blocks therefore never leak
/// their own `elif`/`else`/`end` to the outer block.
///
/// # Errors
/// `UnterminatedBlock` pointing at the opener when no stop keyword exists
/// before the end of the stream.
pub fn find_block_close(tokens: &[Token], start: usize, policy: BlockPolicy) -> Result<usize> {
    let mut depth = 0usize;

    for (index, token) in tokens.iter().enumerate().skip(start + 1) {
        let Some(kw) = token.keyword() else {
            continue;
        };

        if policy.openers.contains(&kw) {
            depth += 1;
        } else if depth == 0 && policy.stops.contains(&kw) {
            tracing::trace!(start, close = index, keyword = %kw, "matched block");
            return Ok(index);
        } else if kw == policy.nested_close && depth > 0 {
            depth -= 1;
        }
    }

    let opener = tokens
        .get(start)
        .map(|t| t.lexeme.clone())
        .unwrap_or_default();
    let span = tokens.get(start).map(|t| t.span).unwrap_or_default();

    Err(OkerewError::unterminated_block(
        &opener,
        policy.terminator.as_str(),
        span,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;

    fn keyword_positions(tokens: &[Token], kw: Keyword) -> Vec<usize> {
        tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_keyword(kw))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn nested_if_elif_pairs_match_their_own_closers() {
        let tokens = tokenize(
            "if a\n  if b\n    x = 1\n  elif c\n    x = 2\n  end\nelif d\n  x = 3\nend",
        )
        .unwrap();

        let ifs = keyword_positions(&tokens, Keyword::If);
        let elifs = keyword_positions(&tokens, Keyword::Elif);

        // Inner `if` closes at the inner `elif`, outer at the outer one.
        assert_eq!(find_block_close(&tokens, ifs[1], BlockPolicy::CONDITIONAL).unwrap(), elifs[0]);
        assert_eq!(find_block_close(&tokens, ifs[0], BlockPolicy::CONDITIONAL).unwrap(), elifs[1]);
    }

    #[test]
    fn loop_skips_nested_if_else() {
        let tokens = tokenize("while x\n  if y\n    a = 1\n  else\n    a = 2\n  end\nelse\n  b = 1\nend").unwrap();

        let elses = keyword_positions(&tokens, Keyword::Else);
        assert_eq!(find_block_close(&tokens, 0, BlockPolicy::LOOP).unwrap(), elses[1]);
    }

    #[test]
    fn loop_body_ends_at_end_without_else() {
        let tokens = tokenize("for i in 1 to 3\n  while j\n    j = 0\n  end\nend\nprint i").unwrap();

        let ends = keyword_positions(&tokens, Keyword::End);
        assert_eq!(find_block_close(&tokens, 0, BlockPolicy::LOOP).unwrap(), ends[1]);
    }

    #[test]
    fn function_bodies_balance_nested_definitions() {
        let tokens = tokenize("func outer\n  func inner\n    x = 1\n  leave\n  inner\nleave").unwrap();

        let leaves = keyword_positions(&tokens, Keyword::Leave);
        assert_eq!(find_block_close(&tokens, 0, BlockPolicy::FUNCTION).unwrap(), leaves[1]);
    }

    #[test]
    fn missing_terminator_is_an_error() {
        let tokens = tokenize("x = 1\nwhile x < 3\n  x = x + 1\n").unwrap();

        let err = find_block_close(&tokens, 4, BlockPolicy::LOOP).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedBlock);
        assert_eq!(err.message, "unterminated `while` block");
        assert_eq!(err.span.line, 2);
    }
}
