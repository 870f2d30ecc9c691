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

use std::fmt::Write;

use crate::error::OkerewError;
use crate::span::Span;

/// Renders fatal Okerew errors as compiler-style diagnostics.
///
/// The printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Points at the error column with a caret (`^`)
/// - Optionally shows a follow-up hint
///
/// Output stays readable without color.
pub struct DiagnosticPrinter {
    /// Full source code of the script being interpreted.
    source: String,

    /// Name of the script (e.g. `hello.okerew`), display only.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Builds the diagnostic text for `error`.
    ///
    /// # Output Example
    /// ```text
    /// error[E_LEX]: unexpected character `$`
    ///   --> demo.okerew:2:5
    ///    |
    ///   2 | x = $3
    ///    |     ^
    /// ```
    pub fn render(&self, error: &OkerewError) -> String {
        let Span { line, column } = error.span;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "error[{}]: {}\n  --> {}:{}:{}",
            error.code(),
            error.message,
            self.file_name,
            line,
            column + 1
        );

        // Errors without a source position (console failures) stop here.
        if line > 0 {
            // Lines are 1-indexed in diagnostics, vectors are 0-indexed.
            let src_line = self.source.lines().nth(line - 1).unwrap_or("");

            let _ = writeln!(out, "   |");
            let _ = writeln!(out, "{:>3} | {}", line, src_line);
            let _ = writeln!(out, "   | {}^", " ".repeat(column));
        }

        if let Some(help) = &error.help {
            let _ = writeln!(out, "\nhelp: {}", help);
        }

        out
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &OkerewError) {
        eprint!("{}", self.render(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_caret_under_column() {
        let printer = DiagnosticPrinter::new("demo.okerew", "print 1\nx = $3\n");
        let err = OkerewError::lex_error("unexpected character `$`", Span::new(2, 4));

        assert_eq!(
            printer.render(&err),
            "error[E_LEX]: unexpected character `$`\n  --> demo.okerew:2:5\n   |\n  2 | x = $3\n   |     ^\n"
        );
    }

    #[test]
    fn appends_help_note() {
        let printer = DiagnosticPrinter::new("loop.okerew", "while x < 3\n");
        let err = OkerewError::unterminated_block("while", "end", Span::new(1, 0));
        let text = printer.render(&err);

        assert!(text.starts_with("error[E_BLOCK]: unterminated `while` block"));
        assert!(text.ends_with("help: close the block with `end`\n"));
    }
}
