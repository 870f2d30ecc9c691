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
use std::fmt;

use crate::interpreter::display::value_to_string;
use crate::lexer::Number;

/// Okerew runtime value representation.
///
/// Every expression ultimately evaluates to one of these, and the
/// variable store holds nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),

    /// Result of a comparison.
    Bool(bool),

    /// The "no value" sentinel: an empty expression, or the stand-in for
    /// a failed evaluation.
    Nothing,
}

impl Value {
    /// Name used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Nothing => "none",
        }
    }

    /// Parses a line of user input: integer first, then float, then the
    /// raw text. Surrounding whitespace is ignored by the numeric parses
    /// and kept in the text fallback.
    pub fn from_input(line: &str) -> Value {
        let trimmed = line.trim();

        if let Ok(n) = trimmed.parse::<i64>() {
            return Value::Int(n);
        }

        // Rust also accepts "inf" and "NaN" here; those stay text.
        if trimmed.chars().any(|c| c.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<f64>() {
                return Value::Float(n);
            }
        }

        Value::Str(line.to_string())
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(n) => Value::Int(n),
            Number::Float(n) => Value::Float(n),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_prefers_integers_then_floats() {
        assert_eq!(Value::from_input("42\n"), Value::Int(42));
        assert_eq!(Value::from_input(" -7 "), Value::Int(-7));
        assert_eq!(Value::from_input("2.5"), Value::Float(2.5));
        assert_eq!(Value::from_input("hello world"), Value::Str("hello world".into()));
        assert_eq!(Value::from_input("inf"), Value::Str("inf".into()));
        assert_eq!(Value::from_input(""), Value::Str(String::new()));
    }

    #[test]
    fn text_input_keeps_surrounding_whitespace() {
        assert_eq!(Value::from_input("  padded text  "), Value::Str("  padded text  ".into()));
        assert_eq!(Value::from_input("  12  "), Value::Int(12));
    }
}
