//! Collection predicates
//!
//! Arrays, array-likes, iterables and the keyed collections. Sets and maps
//! are only recognised when the [`Environment`] offers them.

use crate::environment::{is_length, Environment};
use crate::value::{format_number, parse_index, Value};

/// A genuine array.
pub fn array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

/// An array with no elements.
pub fn empty_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if items.is_empty())
}

/// An array with at least one element.
pub fn non_empty_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty())
}

/// Anything assigned exposing a non-negative integer `length`: arrays,
/// strings and records with a `length` property.
pub fn array_like(value: &Value) -> bool {
    value.is_assigned() && is_length(value.own_property("length").as_deref())
}

/// Anything the iteration protocol can traverse: arrays, strings, sets and
/// maps. Without the iteration capability this is [`array_like`].
pub fn iterable(value: &Value, env: &Environment) -> bool {
    if !env.iteration() {
        return array_like(value);
    }
    match value {
        Value::Array(_) | Value::String(_) => true,
        Value::Set(_) | Value::Map(_) => env.is_collection(value),
        _ => false,
    }
}

/// Whether `data` holds `needle`.
///
/// Strings search for a substring, sets and arrays for an element, maps and
/// records for a value. Comparison is strict equality.
///
/// # Example
///
/// ```rust
/// use stillwater_check::predicate::collection::contains;
/// use stillwater_check::{Environment, Value};
///
/// let env = Environment::full();
/// assert!(contains(&"foo".into(), &"oo".into(), &env));
/// assert!(contains(&Value::array(vec!["foo".into(), "bar".into()]), &"bar".into(), &env));
/// assert!(!contains(&Value::Null, &"foo".into(), &env));
/// ```
pub fn contains(data: &Value, needle: &Value, env: &Environment) -> bool {
    match data {
        Value::String(s) => needle.as_str().is_some_and(|n| s.contains(n)),
        Value::Array(items) => items.iter().any(|item| item.strict_equals(needle)),
        Value::Set(items) if env.is_collection(data) => {
            items.iter().any(|item| item.strict_equals(needle))
        }
        Value::Map(entries) if env.is_collection(data) => {
            entries.iter().any(|(_, v)| v.strict_equals(needle))
        }
        Value::Object(object) => object.values().any(|v| v.strict_equals(needle)),
        _ => false,
    }
}

/// [`contains`] with the arguments flipped.
pub fn is_in(needle: &Value, data: &Value, env: &Environment) -> bool {
    contains(data, needle, env)
}

/// Whether `data` has `key`.
///
/// Maps look the key up strictly, arrays and strings accept in-range
/// indices, records accept own keys (numbers are stringified). Sets have no
/// keys.
pub fn contains_key(data: &Value, key: &Value, env: &Environment) -> bool {
    match data {
        Value::Map(entries) if env.is_collection(data) => {
            entries.iter().any(|(k, _)| k.strict_equals(key))
        }
        Value::Array(_) | Value::String(_) => match (index(key), data.length()) {
            (Some(i), Some(len)) => i < len,
            _ => false,
        },
        Value::Object(object) => property_key(key).is_some_and(|k| object.contains_key(&k)),
        _ => false,
    }
}

/// [`contains_key`] with the arguments flipped.
pub fn key_in(key: &Value, data: &Value, env: &Environment) -> bool {
    contains_key(data, key, env)
}

/// Whether `data` has a `length` equal to `expected`.
pub fn has_length(data: &Value, expected: &Value) -> bool {
    match (data.length(), expected.as_number()) {
        (Some(len), Some(n)) => data.is_assigned() && len == n,
        _ => false,
    }
}

fn index(key: &Value) -> Option<f64> {
    match key {
        Value::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => Some(*n),
        Value::String(s) => parse_index(s).map(|i| i as f64),
        _ => None,
    }
}

fn property_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(*n)),
        _ => None,
    }
}
