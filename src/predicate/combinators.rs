//! Core predicate trait and the modifier combinators
//!
//! This module provides the foundational `Predicate` trait over dynamic
//! values and the three combinators every modifier is built from: `Not`,
//! `Maybe` and `Each`.

use crate::environment::Environment;
use crate::modifier::Container;
use crate::value::Value;

/// A composable predicate over a value and its extra positional arguments.
///
/// Extra arguments are the fixed parameters a predicate declares, such as
/// the bounds of `between`. Predicates must be total: malformed input
/// answers `false`, never panics.
///
/// # Example
///
/// ```rust
/// use stillwater_check::predicate::*;
/// use stillwater_check::Value;
///
/// let short = |value: &Value, args: &[Value]| match (value, args.first()) {
///     (Value::String(s), Some(Value::Number(max))) => (s.chars().count() as f64) <= *max,
///     _ => false,
/// };
/// assert!(short.check(&"abc".into(), &[3.into()]));
/// assert!(!short.not().check(&"abc".into(), &[3.into()]));
/// ```
pub trait Predicate: Send + Sync {
    /// Check if the value satisfies this predicate.
    fn check(&self, value: &Value, args: &[Value]) -> bool;
}

// Blanket impl for closures
impl<F> Predicate for F
where
    F: Fn(&Value, &[Value]) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &Value, args: &[Value]) -> bool {
        self(value, args)
    }
}

/// Extension trait for predicate combinators.
///
/// All methods return concrete types for zero-cost abstraction.
///
/// # Example
///
/// ```rust
/// use stillwater_check::predicate::*;
/// use stillwater_check::{Container, Environment, Value};
///
/// let string = |value: &Value, _: &[Value]| matches!(value, Value::String(_));
/// let strings = string.each(Container::Array, Environment::full());
///
/// assert!(strings.check(&Value::array(vec!["a".into(), "b".into()]), &[]));
/// assert!(!strings.check(&Value::array(vec!["a".into(), 1.into()]), &[]));
/// assert!(strings.maybe().check(&Value::Null, &[]));
/// ```
pub trait PredicateExt: Predicate + Sized {
    /// Invert the predicate.
    ///
    /// Extra arguments are forwarded unchanged.
    fn not(self) -> Not<Self> {
        Not(self)
    }

    /// Tolerate absence.
    ///
    /// Returns a predicate that is true for `Undefined` and `Null` without
    /// consulting the wrapped predicate.
    fn maybe(self) -> Maybe<Self> {
        Maybe(self)
    }

    /// Apply the predicate to every element of a container.
    ///
    /// The container must be of exactly the requested category; anything
    /// else answers `false`. Empty containers pass.
    fn each(self, container: Container, env: Environment) -> Each<Self> {
        Each {
            inner: self,
            container,
            env,
            tolerant: false,
        }
    }
}

impl<P: Predicate> PredicateExt for P {}

/// NOT combinator - inverts the predicate.
#[derive(Clone, Copy, Debug)]
pub struct Not<P>(pub P);

impl<P: Predicate> Predicate for Not<P> {
    #[inline]
    fn check(&self, value: &Value, args: &[Value]) -> bool {
        !self.0.check(value, args)
    }
}

/// MAYBE combinator - absent values pass.
#[derive(Clone, Copy, Debug)]
pub struct Maybe<P>(pub P);

impl<P: Predicate> Predicate for Maybe<P> {
    #[inline]
    fn check(&self, value: &Value, args: &[Value]) -> bool {
        !value.is_assigned() || self.0.check(value, args)
    }
}

/// EACH combinator - every element of a container must pass.
#[derive(Clone, Copy, Debug)]
pub struct Each<P> {
    inner: P,
    container: Container,
    env: Environment,
    tolerant: bool,
}

impl<P> Each<P> {
    /// Let absent elements pass without consulting the wrapped predicate.
    pub fn tolerating_absence(mut self) -> Self {
        self.tolerant = true;
        self
    }

    /// The container category this combinator accepts.
    pub fn container(&self) -> Container {
        self.container
    }
}

impl<P: Predicate> Predicate for Each<P> {
    fn check(&self, value: &Value, args: &[Value]) -> bool {
        if self.env.classify(value) != self.container.kind() {
            return false;
        }
        self.env
            .elements(value)
            .all(|item| (self.tolerant && !item.is_assigned()) || self.inner.check(&item, args))
    }
}
