//! String predicates
//!
//! No coercion happens: a record whose string conversion would equal the
//! expected text is still not a string.

use crate::value::Value;

/// Any string, including the empty one.
pub fn string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// The empty string.
pub fn empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}

/// A string with at least one character.
pub fn non_empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if !s.is_empty())
}

/// A string matched by the regular expression `pattern`.
///
/// # Example
///
/// ```rust
/// use stillwater_check::predicate::string::matches;
/// use stillwater_check::Value;
///
/// let word = Value::regexp(r"^\w+$").unwrap();
/// assert!(matches(&"foo".into(), &word));
/// assert!(!matches(&" ".into(), &word));
/// ```
pub fn matches(value: &Value, pattern: &Value) -> bool {
    match (value, pattern) {
        (Value::String(s), Value::RegExp(re)) => re.is_match(s),
        _ => false,
    }
}
