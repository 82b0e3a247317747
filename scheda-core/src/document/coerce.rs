//! Tolerant coercion of loosely-typed document fields.
//!
//! Backend documents are written by several clients and may hold the same
//! field as a number, an integer or a numeric string. Each helper accepts
//! every representation seen in practice and returns `None` otherwise.

use serde_json::Value;

/// Coerces a number or numeric string. A `,` is accepted as decimal separator.
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerces to a non-negative whole number, truncating any fraction.
pub fn count(value: &Value) -> Option<u32> {
    let n = number(value)?.trunc();
    if n < 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n as u32)
}

/// Coerces text fields. Numbers are rendered as text.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerces booleans, including `"true"`/`"false"` strings and `0`/`1`.
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}
