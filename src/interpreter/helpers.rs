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

use crate::value::Value;

/// Determines whether a runtime `Value` is considered **truthy**.
///
/// Used by the `if`/`elif` and `while` conditions.
///
/// # Truthiness Rules
/// The following values are considered **false**:
/// - `Value::Bool(false)`
/// - `Value::Nothing`
/// - `Value::Int(0)` and `Value::Float(0.0)`
/// - `Value::Str("")` (empty string)
///
/// Everything else is **true**. A condition whose evaluation failed is
/// handed in as `Nothing`, so a broken condition never runs its block.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Nothing => false,
        Value::Int(n) => *n != 0,
        Value::Float(n) => *n != 0.0,
        Value::Str(s) => !s.is_empty(),
    }
}
