//! Number predicates
//!
//! Only finite numbers are numbers here: NaN and both infinities fail every
//! magnitude test, and [`infinity`] is the one predicate they pass.

use crate::value::Value;

fn finite(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if n.is_finite() => Some(*n),
        _ => None,
    }
}

fn compare(value: &Value, other: &Value, holds: impl Fn(f64, f64) -> bool) -> bool {
    match (finite(value), other.as_number()) {
        (Some(x), Some(y)) => holds(x, y),
        _ => false,
    }
}

/// A finite number.
///
/// # Example
///
/// ```rust
/// use stillwater_check::predicate::number::number;
/// use stillwater_check::Value;
///
/// assert!(number(&1.5.into()));
/// assert!(!number(&f64::INFINITY.into()));
/// assert!(!number(&f64::NAN.into()));
/// ```
pub fn number(value: &Value) -> bool {
    finite(value).is_some()
}

/// A finite number with no fractional part.
pub fn integer(value: &Value) -> bool {
    finite(value).is_some_and(|n| n.fract() == 0.0)
}

/// A finite number with a fractional part.
pub fn float(value: &Value) -> bool {
    finite(value).is_some_and(|n| n.fract() != 0.0)
}

/// An even integer.
pub fn even(value: &Value) -> bool {
    integer(value) && finite(value).is_some_and(|n| n % 2.0 == 0.0)
}

/// An odd integer.
pub fn odd(value: &Value) -> bool {
    integer(value) && finite(value).is_some_and(|n| n % 2.0 != 0.0)
}

/// Exactly `0`.
pub fn zero(value: &Value) -> bool {
    matches!(value, Value::Number(n) if *n == 0.0)
}

/// Exactly `1`.
pub fn one(value: &Value) -> bool {
    matches!(value, Value::Number(n) if *n == 1.0)
}

/// Either infinity.
pub fn infinity(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_infinite())
}

/// A finite number strictly greater than `other`.
pub fn greater(value: &Value, other: &Value) -> bool {
    compare(value, other, |x, y| x > y)
}

/// A finite number strictly less than `other`.
pub fn less(value: &Value, other: &Value) -> bool {
    compare(value, other, |x, y| x < y)
}

/// A finite number greater than or equal to `other`.
pub fn greater_or_equal(value: &Value, other: &Value) -> bool {
    compare(value, other, |x, y| x >= y)
}

/// A finite number less than or equal to `other`.
pub fn less_or_equal(value: &Value, other: &Value) -> bool {
    compare(value, other, |x, y| x <= y)
}

/// Strictly between two bounds given in either order.
///
/// # Example
///
/// ```rust
/// use stillwater_check::predicate::number::between;
/// use stillwater_check::Value;
///
/// assert!(between(&1.into(), &0.into(), &2.into()));
/// assert!(between(&1.into(), &2.into(), &0.into()));
/// assert!(!between(&1.into(), &0.into(), &1.into()));
/// ```
pub fn between(value: &Value, a: &Value, b: &Value) -> bool {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) if x < y => greater(value, a) && less(value, b),
        (Some(_), Some(_)) => less(value, a) && greater(value, b),
        _ => false,
    }
}

/// Between two bounds given in either order, bounds included.
pub fn in_range(value: &Value, a: &Value, b: &Value) -> bool {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) if x < y => greater_or_equal(value, a) && less_or_equal(value, b),
        (Some(_), Some(_)) => less_or_equal(value, a) && greater_or_equal(value, b),
        _ => false,
    }
}

/// A finite number above zero.
pub fn positive(value: &Value) -> bool {
    greater(value, &Value::Number(0.0))
}

/// A finite number below zero.
pub fn negative(value: &Value) -> bool {
    less(value, &Value::Number(0.0))
}
