//! Accumulating validation
//!
//! [`map`](crate::batch::map) answers one boolean per rule and stops at the
//! first failing assertion. [`audit`] walks the same rules but keeps going,
//! collecting every failure as a [`Violation`] inside a [`Validation`].
//!
//! # Example
//!
//! ```rust
//! use stillwater_check::batch::Rules;
//! use stillwater_check::validation::{audit, Validation};
//! use stillwater_check::{check, Name, Value};
//! use serde_json::json;
//!
//! let c = check();
//! let rules = Rules::record([
//!     ("name", Rules::leaf(&c.is()[Name::NonEmptyString])),
//!     ("age", Rules::leaf(&c.assert()[Name::Integer])),
//! ]);
//!
//! let data = Value::from(json!({ "name": "Ada", "age": 36 }));
//! assert_eq!(audit(&data, &rules), Validation::Success(data.clone()));
//!
//! let bad = Value::from(json!({ "name": "", "age": 36.5 }));
//! let violations = audit(&bad, &rules).into_result().unwrap_err();
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations[0].path(), "name");
//! assert_eq!(
//!     violations[1].to_string(),
//!     "age: assert failed: expected 36.5 to be integer"
//! );
//! ```

use crate::batch::Rules;
use crate::diagnostic::describe;
use crate::predicate::Leaf;
use crate::surface::Entry;
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;

/// A type with an associative `combine`.
///
/// ```rust
/// use stillwater_check::validation::Semigroup;
///
/// assert_eq!(vec![1, 2].combine(vec![3]), vec![1, 2, 3]);
/// assert_eq!("ab".to_string().combine("c".to_string()), "abc");
/// ```
pub trait Semigroup: Sized {
    /// Combine two values; must be associative.
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

/// Like `Result`, but failures accumulate instead of short-circuiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Create a validation from a Result
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }

    /// Convert this validation to a Result
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Transform the success value if present
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the error value if present
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine two validations, accumulating errors with [`Semigroup::combine`].
    ///
    /// ```rust
    /// use stillwater_check::validation::Validation;
    ///
    /// let v1 = Validation::<i32, _>::failure(vec!["error1"]);
    /// let v2 = Validation::<i32, _>::failure(vec!["error2"]);
    /// assert_eq!(v1.and(v2), Validation::Failure(vec!["error1", "error2"]));
    /// ```
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) => Validation::Failure(e),
            (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }
}

/// One failing rule: where it failed and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    path: String,
    message: String,
}

impl Violation {
    /// Create a violation at `path`.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Violation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Where the failing value sits, e.g. `users[1].name`. Empty at the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The synthesized diagnostic or the assertion's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

type Outcome = Validation<(), Vec<Violation>>;

/// Check `data` against `rules`, collecting every failure.
///
/// Positions are matched as in [`map`](crate::batch::map), including the
/// treatment of absent containers. Success hands `data` back unchanged.
pub fn audit(data: &Value, rules: &Rules) -> Validation<Value, Vec<Violation>> {
    walk(data, rules, "").map(|()| data.clone())
}

fn walk(data: &Value, rules: &Rules, path: &str) -> Outcome {
    let start = Validation::success(());
    match rules {
        Rules::Leaf(entry) => judge(entry, data, path),
        Rules::Each(entry) => match data {
            Value::Array(items) => items.iter().enumerate().fold(start, |acc, (i, item)| {
                combine(acc, judge(entry, item, &index(path, i)))
            }),
            Value::Object(record) => record.iter().fold(start, |acc, (key, item)| {
                combine(acc, judge(entry, item, &field(path, key)))
            }),
            _ => start,
        },
        Rules::List(items) => items.iter().enumerate().fold(start, |acc, (i, rules)| {
            combine(acc, child(data, &i.to_string(), rules, &index(path, i)))
        }),
        Rules::Record(fields) => fields.iter().fold(start, |acc, (key, rules)| {
            combine(acc, child(data, key, rules, &field(path, key)))
        }),
    }
}

fn child(data: &Value, key: &str, rules: &Rules, path: &str) -> Outcome {
    match rules {
        Rules::Leaf(Entry::Test(derived)) if !data.is_assigned() => {
            if derived.is_tolerant() {
                Validation::success(())
            } else {
                failed(message(derived.leaf(), &Value::Undefined, derived.is_negated()), path)
            }
        }
        _ => {
            let value = data
                .own_property(key)
                .map_or(Value::Undefined, Cow::into_owned);
            walk(&value, rules, path)
        }
    }
}

fn judge(entry: &Entry, value: &Value, path: &str) -> Outcome {
    match entry {
        Entry::Test(derived) if derived.test(value, &[]) => Validation::success(()),
        Entry::Test(derived) => {
            failed(message(derived.leaf(), value, derived.is_negated()), path)
        }
        Entry::Assert(assertion) => match assertion.call(value.clone(), &[]) {
            Ok(_) => Validation::success(()),
            Err(err) => failed(err.message().to_string(), path),
        },
    }
}

fn message(leaf: &Leaf, value: &Value, negated: bool) -> String {
    describe(leaf, value, &[], negated)
}

fn failed(message: String, path: &str) -> Outcome {
    Validation::failure(vec![Violation::new(path, message)])
}

fn combine(acc: Outcome, next: Outcome) -> Outcome {
    acc.and(next).map(|_| ())
}

fn field(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}
