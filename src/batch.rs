//! Batch helpers: `map`, `all` and `any`
//!
//! [`map`] applies a tree of surface entries to matching positions of a
//! value and returns booleans in the same shape. [`all`] and [`any`] fold
//! such a result back to one answer.
//!
//! # Example
//!
//! ```rust
//! use stillwater_check::batch::{all, map, Rules};
//! use stillwater_check::{check, Name, Value};
//!
//! let c = check();
//! let rules = Rules::list([
//!     Rules::leaf(&c.is()[Name::String]),
//!     Rules::leaf(&c.is()[Name::String]),
//!     Rules::leaf(&c.is()[Name::Number]),
//!     Rules::leaf(&c.is()[Name::Number]),
//! ]);
//! let data = Value::array(vec!["".into(), 0.into(), "".into(), 0.into(), 0.into()]);
//!
//! let result = map(&data, &rules).unwrap();
//! assert_eq!(
//!     result,
//!     Value::array(vec![true.into(), false.into(), false.into(), true.into()])
//! );
//! assert!(!all(&result).unwrap());
//! ```

use crate::error::{AssertionError, CheckError};
use crate::predicate::object::object;
use crate::surface::Entry;
use crate::value::{Object, Value};
use std::borrow::Cow;

/// A tree of entries mirroring the shape of the data it is mapped over.
#[derive(Clone, Debug)]
pub enum Rules {
    /// Test the value at this position.
    Leaf(Entry),
    /// Test every element of the array or record at this position.
    Each(Entry),
    /// Positional rules, matched by index.
    List(Vec<Rules>),
    /// Keyed rules, matched by own key.
    Record(Vec<(String, Rules)>),
}

impl Rules {
    /// A [`Rules::Leaf`].
    pub fn leaf(entry: impl Into<Entry>) -> Self {
        Rules::Leaf(entry.into())
    }

    /// A [`Rules::Each`].
    pub fn each(entry: impl Into<Entry>) -> Self {
        Rules::Each(entry.into())
    }

    /// A [`Rules::List`].
    pub fn list(items: impl IntoIterator<Item = Rules>) -> Self {
        Rules::List(items.into_iter().collect())
    }

    /// A [`Rules::Record`].
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Rules)>) -> Self {
        Rules::Record(fields.into_iter().map(|(k, r)| (k.into(), r)).collect())
    }
}

/// Apply `rules` to `data`.
///
/// Lists and records produce arrays and records of results, matched by
/// index or key; missing data is tested as `Undefined`. When the data
/// holding a leaf is itself absent, boolean entries answer whether they
/// tolerate absence and assertion entries are called with `Undefined`.
/// The first failing assertion entry aborts the walk.
pub fn map(data: &Value, rules: &Rules) -> Result<Value, AssertionError> {
    match rules {
        Rules::Leaf(entry) => entry.evaluate(data, &[]).map(Value::Bool),
        Rules::Each(entry) => each(data, entry),
        Rules::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, rules)| child(data, &i.to_string(), rules))
            .collect::<Result<Vec<_>, AssertionError>>()
            .map(Value::array),
        Rules::Record(fields) => fields
            .iter()
            .map(|(key, rules)| Ok((key.clone(), child(data, key, rules)?)))
            .collect::<Result<Object, AssertionError>>()
            .map(Value::object),
    }
}

fn child(data: &Value, key: &str, rules: &Rules) -> Result<Value, AssertionError> {
    match rules {
        Rules::Leaf(Entry::Test(derived)) if !data.is_assigned() => {
            Ok(Value::Bool(derived.is_tolerant()))
        }
        _ => {
            let value = data
                .own_property(key)
                .map_or(Value::Undefined, Cow::into_owned);
            map(&value, rules)
        }
    }
}

fn each(data: &Value, entry: &Entry) -> Result<Value, AssertionError> {
    match data {
        Value::Array(items) => items
            .iter()
            .map(|item| entry.evaluate(item, &[]).map(Value::Bool))
            .collect::<Result<Vec<_>, AssertionError>>()
            .map(Value::array),
        Value::Object(record) => record
            .iter()
            .map(|(key, item)| Ok((key, Value::Bool(entry.evaluate(item, &[])?))))
            .collect::<Result<Object, AssertionError>>()
            .map(Value::object),
        _ => Ok(Value::object(Object::new())),
    }
}

/// Whether no leaf anywhere in `result` is `false`.
///
/// `result` must be an array or a plain record; nested arrays and records
/// are walked depth-first. Only booleans count as leaves.
///
/// ```rust
/// use stillwater_check::batch::all;
/// use stillwater_check::Value;
/// use serde_json::json;
///
/// assert!(all(&json!({ "foo": { "bar": { "baz": { "qux": true } } } }).into()).unwrap());
/// assert!(!all(&json!({ "foo": { "bar": { "baz": false }, "qux": true } }).into()).unwrap());
/// assert!(all(&Value::from(true)).is_err());
/// ```
pub fn all(result: &Value) -> Result<bool, CheckError> {
    ensure_container(result, "all")?;
    Ok(!holds_anywhere(result, false))
}

/// Whether some leaf anywhere in `result` is `true`.
///
/// Accepts the same shapes as [`all`].
pub fn any(result: &Value) -> Result<bool, CheckError> {
    ensure_container(result, "any")?;
    Ok(holds_anywhere(result, true))
}

fn ensure_container(result: &Value, helper: &str) -> Result<(), CheckError> {
    if matches!(result, Value::Array(_)) || object(result) {
        Ok(())
    } else {
        Err(CheckError::InvalidArgument(format!(
            "`{}` expects an array or object, got {}",
            helper, result
        )))
    }
}

fn holds_anywhere(result: &Value, target: bool) -> bool {
    let hit = |item: &Value| match item {
        Value::Bool(b) => *b == target,
        Value::Array(_) => holds_anywhere(item, target),
        Value::Object(_) if object(item) => holds_anywhere(item, target),
        _ => false,
    };
    match result {
        Value::Array(items) => items.iter().any(hit),
        Value::Object(record) => record.values().any(hit),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Name;
    use crate::surface::check;
    use serde_json::json;

    fn bools(items: &[bool]) -> Value {
        Value::array(items.iter().map(|b| Value::Bool(*b)))
    }

    #[test]
    fn map_lists_stop_at_the_rules() {
        let c = check();
        let rules = Rules::list([
            Rules::leaf(&c.is()[Name::String]),
            Rules::leaf(&c.is()[Name::String]),
            Rules::leaf(&c.is()[Name::Number]),
            Rules::leaf(&c.is()[Name::Number]),
        ]);
        let data = Value::from(json!(["", 0, "", 0, 0]));
        assert_eq!(map(&data, &rules).unwrap(), bools(&[true, false, false, true]));
    }

    #[test]
    fn map_tests_missing_data_as_undefined() {
        let c = check();
        let rules = Rules::record([
            ("foo", Rules::leaf(&c.is()[Name::Undefined])),
            ("bar", Rules::leaf(&c.maybe()[Name::String])),
        ]);
        let result = map(&Value::object(Object::new()), &rules).unwrap();
        assert_eq!(result, Value::from(json!({ "foo": true, "bar": true })));
    }

    #[test]
    fn map_recurses_into_nested_rules() {
        let c = check();
        let rules = Rules::record([(
            "foo",
            Rules::record([("bar", Rules::leaf(&c.is()[Name::Number]))]),
        )]);
        let data = Value::from(json!({ "foo": { "bar": 1 } }));
        assert_eq!(
            map(&data, &rules).unwrap(),
            Value::from(json!({ "foo": { "bar": true } }))
        );
    }

    #[test]
    fn map_absent_container_yields_tolerance() {
        let c = check();
        let rules = |entry: &crate::modifier::Derived| {
            Rules::record([("foo", Rules::record([("bar", Rules::leaf(entry))]))])
        };
        let empty = Value::object(Object::new());
        assert_eq!(
            map(&empty, &rules(&c.is()[Name::Assigned])).unwrap(),
            Value::from(json!({ "foo": { "bar": false } }))
        );
        assert_eq!(
            map(&empty, &rules(&c.not()[Name::Assigned])).unwrap(),
            Value::from(json!({ "foo": { "bar": false } }))
        );
        assert_eq!(
            map(&empty, &rules(&c.maybe()[Name::String])).unwrap(),
            Value::from(json!({ "foo": { "bar": true } }))
        );
    }

    #[test]
    fn map_each_mirrors_the_data() {
        let c = check();
        let rules = Rules::each(&c.is()[Name::Even]);
        assert_eq!(
            map(&Value::from(json!([2, 3])), &rules).unwrap(),
            bools(&[true, false])
        );
        assert_eq!(
            map(&Value::from(json!({ "a": 2, "b": 3 })), &rules).unwrap(),
            Value::from(json!({ "a": true, "b": false }))
        );
    }

    #[test]
    fn map_propagates_assertion_failures() {
        let c = check();
        let rules = Rules::record([("foo", Rules::leaf(&c.assert()[Name::Number]))]);
        let err = map(&Value::from(json!({ "foo": "bar" })), &rules).unwrap_err();
        assert_eq!(err.message(), r#"assert failed: expected "bar" to be Number"#);
        assert_eq!(
            map(&Value::from(json!({ "foo": 1 })), &rules).unwrap(),
            Value::from(json!({ "foo": true }))
        );
    }

    #[test]
    fn all_and_any() {
        assert!(all(&bools(&[true, true])).unwrap());
        assert!(!all(&bools(&[true, false])).unwrap());
        assert!(any(&bools(&[false, true])).unwrap());
        assert!(!any(&bools(&[false, false])).unwrap());
        assert!(all(&bools(&[])).unwrap());
        assert!(!any(&bools(&[])).unwrap());
    }

    #[test]
    fn all_and_any_recurse() {
        let nested = Value::from(json!({ "foo": [false, { "bar": true }] }));
        assert!(!all(&nested).unwrap());
        assert!(any(&nested).unwrap());
    }

    #[test]
    fn non_boolean_leaves_are_ignored() {
        let mixed = Value::from(json!([1, "x", null]));
        assert!(all(&mixed).unwrap());
        assert!(!any(&mixed).unwrap());
    }

    #[test]
    fn scalars_are_invalid_arguments() {
        for value in [Value::from(true), Value::Null, Value::from("x")] {
            assert!(matches!(all(&value), Err(CheckError::InvalidArgument(_))));
            assert!(matches!(any(&value), Err(CheckError::InvalidArgument(_))));
        }
        assert!(all(&Value::set(vec![])).is_err());
    }
}
