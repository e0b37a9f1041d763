//! # Stillwater Check
//!
//! > *"Still waters run pure"*
//!
//! Runtime inspection of dynamically typed values: 48 pure leaf predicates
//! and the modifiers derived from them.
//!
//! ## Philosophy
//!
//! The predicates are the **still** part: total, side-effect free, always a
//! plain `bool`. Failure only **flows** out through the `assert` modifier,
//! which turns a `false` into an [`AssertionError`].
//!
//! Every leaf is available in these forms:
//!
//! - `not.*` inverts it
//! - `maybe.*` lets `null`/`undefined` pass
//! - `assert.*` returns the value or fails, with an optional message and
//!   error kind
//! - `array.of.*`, `arrayLike.of.*`, `iterable.of.*`, `object.of.*` test
//!   every element of exactly that container category
//!
//! plus the legal combinations (`assert.not.*`, `maybe.array.of.*`,
//! `assert.maybe.iterable.of.*`, ...). The surface is built once by
//! [`check()`] and shared read-only.
//!
//! ## Quick Example
//!
//! ```rust
//! use stillwater_check::{check, Container, Name, Value};
//!
//! let c = check();
//!
//! assert!(c.is()[Name::Between].test(&1.into(), &[0.into(), 2.into()]));
//! assert!(c.not()[Name::Between].test(&1.into(), &[0.into(), 1.into()]));
//!
//! let ids = Value::array(vec![1.into(), Value::Null, 3.into()]);
//! let maybe_ints = &c.maybe().of(Container::Array).unwrap()[Name::Integer];
//! assert!(maybe_ints.test(&ids, &[]));
//!
//! let err = c.assert()[Name::Odd].call(2.into(), &[]).unwrap_err();
//! assert_eq!(err.message(), "assert failed: expected 2 to be odd number");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod batch;
pub mod diagnostic;
pub mod environment;
pub mod error;
pub mod modifier;
pub mod predicate;
pub mod surface;
pub mod testing;
pub mod validation;
pub mod value;

// Re-exports
pub use batch::Rules;
pub use environment::Environment;
pub use error::{AssertionError, CheckError};
pub use modifier::{Assertion, Container, Derived, Modifier, Namespace};
pub use predicate::{Name, Predicate, PredicateExt, Registry};
pub use surface::{check, AssertSurface, Check, CheckBuilder, Entry};
pub use validation::{audit, Semigroup, Validation, Violation};
pub use value::{Kind, Object, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::batch::{all, any, map, Rules};
    pub use crate::error::{AssertionError, CheckError};
    pub use crate::modifier::Container;
    pub use crate::predicate::{Name, Predicate, PredicateExt};
    pub use crate::surface::{check, Check};
    pub use crate::validation::{audit, Validation};
    pub use crate::value::{Class, Object, Value};
}
