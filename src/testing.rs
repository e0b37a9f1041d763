//! Testing utilities
//!
//! Assertion macros for [`Validation`](crate::validation::Validation) and
//! assertion results, and `proptest` strategies for [`Value`] (with the
//! `proptest` feature, or in this crate's own tests).
//!
//! # Example
//!
//! ```rust
//! use stillwater_check::{assert_failure, assert_rejects, assert_success};
//! use stillwater_check::batch::Rules;
//! use stillwater_check::validation::audit;
//! use stillwater_check::{check, Name, Value};
//!
//! let rules = Rules::leaf(&check().is()[Name::Even]);
//! assert_success!(audit(&2.into(), &rules));
//! assert_failure!(audit(&3.into(), &rules));
//!
//! assert_rejects!(
//!     check().assert()[Name::Even].call(3.into(), &[]),
//!     "assert failed: expected 3 to be even number"
//! );
//! ```

#[cfg(any(test, feature = "proptest"))]
use crate::value::Value;

/// Assert that a validation succeeds.
///
/// This macro will panic if the validation is a `Failure`.
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::validation::Validation::Success(_) => {}
            $crate::validation::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
///
/// This macro will panic if the validation is a `Success`.
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::validation::Validation::Failure(_) => {}
            $crate::validation::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that an assertion call failed, optionally with an exact message.
///
/// ```rust
/// use stillwater_check::{assert_rejects, check, Name};
///
/// assert_rejects!(check().assert()[Name::Zero].call(1.into(), &[]));
/// assert_rejects!(
///     check().assert()[Name::Zero].call(1.into(), &["nope".into()]),
///     "nope"
/// );
/// ```
#[macro_export]
macro_rules! assert_rejects {
    ($result:expr) => {
        match $result {
            ::std::result::Result::Err(_) => {}
            ::std::result::Result::Ok(v) => {
                panic!("Expected rejection, got Ok: {:?}", v);
            }
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            ::std::result::Result::Err(err) => {
                assert_eq!(err.message(), $message);
            }
            ::std::result::Result::Ok(v) => {
                panic!("Expected rejection with {:?}, got Ok: {:?}", $message, v);
            }
        }
    };
}

#[cfg(any(test, feature = "proptest"))]
use proptest::prelude::*;

/// Primitives, including NaN, both infinities and negative zero.
#[cfg(any(test, feature = "proptest"))]
pub fn scalar_strategy() -> BoxedStrategy<Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-100i32..100).prop_map(Value::from),
        any::<f64>().prop_map(Value::Number),
        prop_oneof![
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            Just(-0.0),
        ]
        .prop_map(Value::Number),
        "[a-z ]{0,6}".prop_map(Value::from),
    ]
    .boxed()
}

/// Arbitrary values up to three levels deep: primitives, arrays, records,
/// sets and maps.
#[cfg(any(test, feature = "proptest"))]
pub fn value_strategy() -> BoxedStrategy<Value> {
    scalar_strategy()
        .prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::array),
                prop::collection::vec(("[a-z]{1,3}", inner.clone()), 0..4)
                    .prop_map(|entries| Value::object(entries.into_iter().collect())),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::set),
                prop::collection::vec((inner.clone(), inner), 0..3).prop_map(Value::map),
            ]
        })
        .boxed()
}

#[cfg(any(test, feature = "proptest"))]
impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        value_strategy()
    }
}
