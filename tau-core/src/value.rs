//! Argument values and structural equality
//!
//! Tool-call arguments are JSON values. Comparison is deep and strict about
//! types: a string never equals a number, a bool never equals a number, and
//! `null` only equals `null`. Numbers compare by numeric value so that `1`
//! and `1.0` are the same argument.

use serde_json::{Map, Number, Value};

/// Mapping from argument name to value
pub type Arguments = Map<String, Value>;

/// Deep structural equality between two argument values.
pub fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            exp.len() == act.len()
                && exp
                    .iter()
                    .all(|(k, v)| act.get(k).is_some_and(|av| values_equal(v, av)))
        }
        (Value::Array(exp), Value::Array(act)) => {
            exp.len() == act.len() && exp.iter().zip(act).all(|(e, a)| values_equal(e, a))
        }
        (Value::Number(exp), Value::Number(act)) => numbers_equal(exp, act),
        (Value::String(exp), Value::String(act)) => exp == act,
        (Value::Bool(exp), Value::Bool(act)) => exp == act,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

/// Every key of `expected` is present in `actual` with an equal value.
///
/// Keys only present in `actual` are ignored.
pub fn arguments_subset(expected: &Arguments, actual: &Arguments) -> bool {
    expected
        .iter()
        .all(|(k, v)| actual.get(k).is_some_and(|av| values_equal(v, av)))
}

/// Build an argument map from a JSON object.
///
/// Returns `None` when `value` is not an object.
pub fn arguments_from(value: Value) -> Option<Arguments> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integer_value(a), integer_value(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(i), None) => float_equals_integer(b, i),
        (None, Some(i)) => float_equals_integer(a, i),
        (None, None) => a.as_f64() == b.as_f64(),
    }
}

fn integer_value(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

// Never widen the integer to f64: above 2^53 distinct values would collapse.
fn float_equals_integer(float: &Number, int: i128) -> bool {
    float
        .as_f64()
        .is_some_and(|f| f.is_finite() && f.fract() == 0.0 && f as i128 == int)
}
