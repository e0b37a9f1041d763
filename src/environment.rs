//! Host capabilities the predicates depend on
//!
//! Some predicates only make sense when the host offers a general iteration
//! protocol or keyed collections (sets and maps). [`Environment`] records
//! which of those capabilities are available. Missing capabilities degrade
//! the affected predicates to `false` instead of failing.
//!
//! # Example
//!
//! ```rust
//! use stillwater_check::{Environment, Kind, Value};
//!
//! let full = Environment::full();
//! let bare = Environment::full().with_collections(false);
//!
//! let set = Value::set(vec!["a".into()]);
//! assert_eq!(full.classify(&set), Kind::Iterable);
//! assert_eq!(bare.classify(&set), Kind::Other);
//! ```

use crate::value::{Kind, Value};
use std::borrow::Cow;

/// Available host capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Environment {
    iteration: bool,
    collections: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self::full()
    }
}

impl Environment {
    /// Every capability available.
    pub const fn full() -> Self {
        Environment {
            iteration: true,
            collections: true,
        }
    }

    /// Enable or disable the general iteration protocol.
    ///
    /// Without it, `iterable` falls back to `arrayLike` and strings are
    /// traversed by index.
    pub const fn with_iteration(mut self, enabled: bool) -> Self {
        self.iteration = enabled;
        self
    }

    /// Enable or disable sets and maps.
    ///
    /// Without them, set and map values are opaque objects.
    pub const fn with_collections(mut self, enabled: bool) -> Self {
        self.collections = enabled;
        self
    }

    /// Whether the iteration protocol is available.
    pub const fn iteration(&self) -> bool {
        self.iteration
    }

    /// Whether sets and maps are available.
    pub const fn collections(&self) -> bool {
        self.collections
    }

    /// Whether `value` is a set or map that this environment recognises.
    pub(crate) fn is_collection(&self, value: &Value) -> bool {
        self.collections && matches!(value, Value::Set(_) | Value::Map(_))
    }

    /// Classify a value for container routing.
    pub fn classify(&self, value: &Value) -> Kind {
        match value {
            Value::Array(_) => Kind::Array,
            Value::String(_) if self.iteration => Kind::Iterable,
            Value::String(_) => Kind::ArrayLike,
            Value::Set(_) | Value::Map(_) if self.is_collection(value) && self.iteration => {
                Kind::Iterable
            }
            Value::Object(object) if value.tag() == "Object" => {
                if is_length(object.get("length")) {
                    Kind::ArrayLike
                } else {
                    Kind::PlainObject
                }
            }
            _ => Kind::Other,
        }
    }

    /// The elements of a container in traversal order.
    ///
    /// Arrays and array-likes yield indices `0..length` (holes read as
    /// `Undefined`), iterables yield set values, map values or string
    /// characters, plain objects yield own values in key order. Anything
    /// else yields nothing. Elements are produced on demand, so a consumer
    /// that stops early never visits the rest.
    pub fn elements<'a>(&self, value: &'a Value) -> Elements<'a> {
        match (self.classify(value), value) {
            (Kind::Array, Value::Array(items)) => Box::new(items.iter().map(Cow::Borrowed)),
            (Kind::Iterable, Value::Set(items)) => Box::new(items.iter().map(Cow::Borrowed)),
            (Kind::Iterable, Value::Map(entries)) => {
                Box::new(entries.iter().map(|(_, v)| Cow::Borrowed(v)))
            }
            (Kind::Iterable | Kind::ArrayLike, Value::String(s)) => Box::new(
                s.chars()
                    .map(|c| Cow::Owned(Value::String(c.to_string()))),
            ),
            (Kind::ArrayLike, Value::Object(object)) => {
                let len = object.get("length").and_then(Value::as_number).unwrap_or(0.0) as u64;
                Box::new((0..len).map(move |i| {
                    object
                        .get(&i.to_string())
                        .map_or(Cow::Owned(Value::Undefined), Cow::Borrowed)
                }))
            }
            (Kind::PlainObject, Value::Object(object)) => {
                Box::new(object.values().map(Cow::Borrowed))
            }
            _ => Box::new(std::iter::empty()),
        }
    }
}

/// Lazy traversal of a container's elements.
pub type Elements<'a> = Box<dyn Iterator<Item = Cow<'a, Value>> + 'a>;

pub(crate) fn is_length(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(n)) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
}
