//! Identity and primitive predicates

use crate::value::Value;

/// Strict equality: primitives by value, compounds by identity.
///
/// # Example
///
/// ```rust
/// use stillwater_check::predicate::scalar::equal;
/// use stillwater_check::Value;
///
/// assert!(equal(&"foo".into(), &"foo".into()));
/// assert!(!equal(&"1".into(), &1.into()));
/// ```
pub fn equal(value: &Value, other: &Value) -> bool {
    value.strict_equals(other)
}

/// `Undefined` only.
pub fn undefined(value: &Value) -> bool {
    matches!(value, Value::Undefined)
}

/// `Null` only.
pub fn null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

/// Neither `Undefined` nor `Null`.
pub fn assigned(value: &Value) -> bool {
    value.is_assigned()
}

/// Undefined, null, booleans, numbers, strings and symbols.
pub fn primitive(value: &Value) -> bool {
    value.is_primitive()
}

/// Either boolean.
pub fn boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

/// Exactly `true`.
pub fn is_true(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

/// Exactly `false`.
pub fn is_false(value: &Value) -> bool {
    matches!(value, Value::Bool(false))
}
