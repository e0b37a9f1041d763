//! Error types
//!
//! Plain predicates never fail; they answer `false`. Errors come from two
//! places only: the `assert` modifier turning a `false` into an
//! [`AssertionError`], and invalid arguments handed to the batch helpers or
//! the registry, reported as [`CheckError`].

use crate::value::Class;
use std::error::Error as StdError;
use std::fmt;

/// A failed assertion.
///
/// Carries the message (custom or synthesized) and the error kind the caller
/// asked for, `TypeError` by default.
///
/// # Example
///
/// ```rust
/// use stillwater_check::{check, value::Class, Value};
///
/// let err = check().assert()[stillwater_check::Name::Even]
///     .call(Value::from(1), &[])
///     .unwrap_err();
///
/// assert_eq!(err.message(), "assert failed: expected 1 to be even number");
/// assert!(err.is_instance_of(&Class::type_error()));
/// assert!(err.is_instance_of(&Class::error()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionError {
    kind: Class,
    message: String,
}

impl AssertionError {
    /// Create an assertion error of `kind`.
    pub fn new(kind: Class, message: impl Into<String>) -> Self {
        AssertionError {
            kind,
            message: message.into(),
        }
    }

    /// The error kind.
    pub fn kind(&self) -> &Class {
        &self.kind
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the kind is `class` or derives from it.
    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.kind.is_subclass_of(class)
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for AssertionError {}

/// Errors raised outside of predicate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// An argument of the wrong shape, e.g. a scalar passed to `all`.
    InvalidArgument(String),
    /// A predicate name that is not in the registry.
    UnknownPredicate(String),
    /// A registry entry whose name is already taken.
    DuplicatePredicate(String),
    /// An assertion failed.
    Assertion(AssertionError),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            CheckError::UnknownPredicate(name) => write!(f, "unknown predicate: {}", name),
            CheckError::DuplicatePredicate(name) => write!(f, "duplicate predicate: {}", name),
            CheckError::Assertion(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for CheckError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CheckError::Assertion(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AssertionError> for CheckError {
    fn from(err: AssertionError) -> Self {
        CheckError::Assertion(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message() {
        let err = AssertionError::new(Class::range_error(), "blee");
        assert_eq!(err.to_string(), "blee");
        assert!(err.is_instance_of(&Class::range_error()));
        assert!(!err.is_instance_of(&Class::type_error()));
    }

    #[test]
    fn check_error_display() {
        assert_eq!(
            CheckError::InvalidArgument("expected array or object".into()).to_string(),
            "invalid argument: expected array or object"
        );
        assert_eq!(
            CheckError::UnknownPredicate("nope".into()).to_string(),
            "unknown predicate: nope"
        );
    }

    #[test]
    fn assertion_source_is_preserved() {
        let err: CheckError = AssertionError::new(Class::type_error(), "x").into();
        assert!(err.source().is_some());
        assert!(CheckError::UnknownPredicate("y".into()).source().is_none());
    }
}
