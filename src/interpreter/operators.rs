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

use std::cmp::Ordering;

use crate::error::{OkerewError, Result};
use crate::lexer::Operator;
use crate::span::Span;
use crate::value::Value;

/// Applies a binary operator to two evaluated operands.
///
/// `span` is the operator token, used for every error raised here.
pub fn apply_binary(op: Operator, left: Value, right: Value, span: Span) -> Result<Value> {
    match op {
        Operator::Equal => Ok(Value::Bool(values_equal(&left, &right))),
        Operator::NotEqual => Ok(Value::Bool(!values_equal(&left, &right))),

        Operator::Less | Operator::LessEqual | Operator::Greater | Operator::GreaterEqual => {
            let ordering = compare(&left, &right, op, span)?;
            Ok(Value::Bool(match op {
                Operator::Less => ordering == Ordering::Less,
                Operator::LessEqual => ordering != Ordering::Greater,
                Operator::Greater => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }

        Operator::Plus => match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (left, right) => arithmetic(op, left, right, span),
        },

        Operator::Minus
        | Operator::Star
        | Operator::Slash
        | Operator::FloorDiv
        | Operator::Percent
        | Operator::Power => arithmetic(op, left, right, span),

        Operator::Ampersand | Operator::Pipe | Operator::Caret => bitwise(op, left, right, span),

        Operator::ShiftLeft | Operator::ShiftRight => shift(op, left, right, span),

        Operator::LeftParen | Operator::RightParen => Err(OkerewError::evaluation_error(
            format!("`{}` is not a binary operator", op),
            span,
        )),
    }
}

/// Applies prefix `-` or `+`.
pub fn apply_unary(op: Operator, operand: Value, span: Span) -> Result<Value> {
    match (op, operand) {
        (Operator::Minus, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| overflow(op, span)),
        (Operator::Minus, Value::Float(n)) => Ok(Value::Float(-n)),
        (Operator::Plus, value @ (Value::Int(_) | Value::Float(_))) => Ok(value),
        (op, operand) => Err(OkerewError::evaluation_error(
            format!("unsupported operand type for unary {}: {}", op, operand.type_name()),
            span,
        )),
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
        _ => left == right,
    }
}

fn compare(left: &Value, right: &Value, op: Operator, span: Span) -> Result<Ordering> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => match (as_float(left), as_float(right)) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(mismatch(op, left, right, span)),
        },
    };

    // Only NaN gets here without an ordering; it compares as neither.
    ordering.ok_or_else(|| {
        OkerewError::evaluation_error(format!("cannot order NaN with `{}`", op), span)
    })
}

fn arithmetic(op: Operator, left: Value, right: Value, span: Span) -> Result<Value> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => int_arithmetic(op, *a, *b, span),
        _ => match (as_float(&left), as_float(&right)) {
            (Some(a), Some(b)) => float_arithmetic(op, a, b, span),
            _ => Err(mismatch(op, &left, &right, span)),
        },
    }
}

fn int_arithmetic(op: Operator, a: i64, b: i64, span: Span) -> Result<Value> {
    let result = match op {
        Operator::Plus => a.checked_add(b),
        Operator::Minus => a.checked_sub(b),
        Operator::Star => a.checked_mul(b),
        Operator::Slash => {
            check_divisor(b == 0, span)?;
            return Ok(Value::Float(a as f64 / b as f64));
        }
        Operator::FloorDiv => {
            check_divisor(b == 0, span)?;
            // Truncating quotient, stepped down when the signs differ.
            a.checked_div(b).map(|q| if a % b != 0 && (a < 0) != (b < 0) { q - 1 } else { q })
        }
        Operator::Percent => {
            check_divisor(b == 0, span)?;
            a.checked_rem(b).map(|r| if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
        }
        Operator::Power => {
            if b < 0 {
                return Ok(Value::Float((a as f64).powf(b as f64)));
            }
            u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp))
        }
        _ => None,
    };

    result.map(Value::Int).ok_or_else(|| overflow(op, span))
}

fn float_arithmetic(op: Operator, a: f64, b: f64, span: Span) -> Result<Value> {
    let result = match op {
        Operator::Plus => a + b,
        Operator::Minus => a - b,
        Operator::Star => a * b,
        Operator::Slash => {
            check_divisor(b == 0.0, span)?;
            a / b
        }
        Operator::FloorDiv => {
            check_divisor(b == 0.0, span)?;
            (a / b).floor()
        }
        Operator::Percent => {
            check_divisor(b == 0.0, span)?;
            let r = a % b;
            if r != 0.0 && (r < 0.0) != (b < 0.0) {
                r + b
            } else {
                r
            }
        }
        Operator::Power => a.powf(b),
        _ => {
            return Err(OkerewError::evaluation_error(
                format!("`{}` is not an arithmetic operator", op),
                span,
            ))
        }
    };

    Ok(Value::Float(result))
}

fn bitwise(op: Operator, left: Value, right: Value, span: Span) -> Result<Value> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(match op {
            Operator::Ampersand => a & b,
            Operator::Pipe => a | b,
            _ => a ^ b,
        })),
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
            Operator::Ampersand => a & b,
            Operator::Pipe => a | b,
            _ => a ^ b,
        })),
        _ => Err(mismatch(op, &left, &right, span)),
    }
}

fn shift(op: Operator, left: Value, right: Value, span: Span) -> Result<Value> {
    let (Value::Int(a), Value::Int(b)) = (&left, &right) else {
        return Err(mismatch(op, &left, &right, span));
    };

    if *b < 0 {
        return Err(OkerewError::evaluation_error("negative shift count", span));
    }

    let count = u32::try_from(*b).unwrap_or(u32::MAX);
    let result = match op {
        Operator::ShiftLeft => a
            .checked_shl(count)
            .filter(|shifted| shifted >> count == *a),
        // Right shifts past the width saturate to the sign.
        _ => Some(a.checked_shr(count).unwrap_or(if *a < 0 { -1 } else { 0 })),
    };

    result.map(Value::Int).ok_or_else(|| overflow(op, span))
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}

fn check_divisor(is_zero: bool, span: Span) -> Result<()> {
    if is_zero {
        Err(OkerewError::evaluation_error("division by zero", span))
    } else {
        Ok(())
    }
}

fn mismatch(op: Operator, left: &Value, right: &Value, span: Span) -> OkerewError {
    OkerewError::evaluation_error(
        format!(
            "unsupported operand types for {}: {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ),
        span,
    )
}

fn overflow(op: Operator, span: Span) -> OkerewError {
    OkerewError::evaluation_error(format!("integer overflow in `{}`", op), span)
}
