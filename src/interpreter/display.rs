/*
 * =============================================================================
 *  OKEREW - Token-Stream Scripting
 * =============================================================================
 *
 *  License:
 *  This file is part of the Okerew scripting language project.
 *
 *  Okerew is dual-licensed under the terms of:
 *    - The MIT License
 *    - The Apache License, Version 2.0
 *
 *  You may choose either license to govern your use of this software.
 *
 *  Unless required by applicable law or agreed to in writing, this software is
 *  distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 *  either express or implied.
 *
 * =============================================================================
 */

use crate::value::Value;

/// ============================================================================
/// value_to_string
/// ============================================================================
/// Converts an Okerew runtime `Value` into the text `print` emits.
///
/// Examples:
///   - Int(14)          → "14"
///   - Float(3.0)       → "3.0"
///   - Float(0.5)       → "0.5"
///   - Str("cat")       → "cat"
///   - Bool(true)       → "true"
///   - Nothing          → "none"
/// ============================================================================
pub fn value_to_string(val: &Value) -> String {
    match val {
        Value::Int(n) => n.to_string(),
        Value::Float(n) => float_to_string(*n),
        Value::Str(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Nothing => "none".to_string(),
    }
}

/// Integral floats keep one fractional digit so `6 / 2` reads `3.0`
/// and stays distinguishable from the integer `3`.
fn float_to_string(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}
