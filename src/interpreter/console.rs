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

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Where `input` reads from and where `print` writes to.
pub trait Console {
    /// Shows `prompt` and reads one line, without its line terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Writes one line of program output.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Console backed by the process stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
    }
}

/// In-memory console: serves queued input lines and records output.
///
/// Used to embed the interpreter and by the test suite.
#[derive(Debug, Default)]
pub struct BufferedConsole {
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl Console for BufferedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_console_serves_inputs_in_order() {
        let mut console = BufferedConsole::with_inputs(["1", "two"]);

        assert_eq!(console.read_line("a: ").unwrap().as_deref(), Some("1"));
        assert_eq!(console.read_line("b: ").unwrap().as_deref(), Some("two"));
        assert_eq!(console.read_line("c: ").unwrap(), None);
        assert_eq!(console.prompts, ["a: ", "b: ", "c: "]);
    }
}
