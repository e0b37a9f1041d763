//! Modifiers and the surfaces they derive
//!
//! A modifier transforms every leaf predicate the same way: [`Modifier::Not`]
//! inverts it, [`Modifier::Maybe`] lets absent values pass, [`Modifier::Assert`]
//! turns a `false` into an error and [`Modifier::Of`] applies it to every
//! element of one container category.
//!
//! Which modifier may follow which is fixed by the static table in
//! [`nesting`]; [`Namespace`] builds one derived entry per leaf for each legal
//! path, and [`Derived`] / [`Assertion`] are those entries.

mod derived;
mod namespace;
pub mod nesting;

pub use derived::{Assertion, Derived};
pub use namespace::Namespace;

use crate::predicate::Name;
use crate::value::Kind;
use std::fmt;

/// Names reserved for modifiers and batch helpers. No leaf may use them.
pub const MODIFIER_NAMES: &[&str] = &["not", "maybe", "assert", "map", "all", "any"];

/// A container category the `.of` modifiers traverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// `array.of`
    Array,
    /// `arrayLike.of`
    ArrayLike,
    /// `iterable.of`
    Iterable,
    /// `object.of`
    Object,
}

impl Container {
    /// Every container, in surface order.
    pub const ALL: [Container; 4] = [
        Container::Array,
        Container::ArrayLike,
        Container::Iterable,
        Container::Object,
    ];

    /// The value category this container accepts.
    pub const fn kind(self) -> Kind {
        match self {
            Container::Array => Kind::Array,
            Container::ArrayLike => Kind::ArrayLike,
            Container::Iterable => Kind::Iterable,
            Container::Object => Kind::PlainObject,
        }
    }

    /// The leaf predicate the `.of` namespace hangs off.
    pub const fn leaf(self) -> Name {
        match self {
            Container::Array => Name::Array,
            Container::ArrayLike => Name::ArrayLike,
            Container::Iterable => Name::Iterable,
            Container::Object => Name::Object,
        }
    }

    /// The public name, e.g. `arrayLike`.
    pub const fn name(self) -> &'static str {
        self.leaf().as_str()
    }

    /// The container whose name is `name`.
    pub fn from_name(name: &str) -> Option<Container> {
        Container::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// One step of a modifier path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Inverted result.
    Not,
    /// Absent values pass.
    Maybe,
    /// Fail with an error instead of returning `false`.
    Assert,
    /// Every element of a container.
    Of(Container),
}

impl Modifier {
    /// The modifier reached through the property `name`, if any.
    ///
    /// Containers are reached in two steps (`array` then `of`) and are not
    /// returned here.
    pub fn from_name(name: &str) -> Option<Modifier> {
        match name {
            "not" => Some(Modifier::Not),
            "maybe" => Some(Modifier::Maybe),
            "assert" => Some(Modifier::Assert),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Not => f.write_str("not"),
            Modifier::Maybe => f.write_str("maybe"),
            Modifier::Assert => f.write_str("assert"),
            Modifier::Of(container) => write!(f, "{}.of", container.name()),
        }
    }
}

/// Dotted form of a path and a leaf, e.g. `assert.maybe.array.of.even`.
pub fn qualified_name(path: &[Modifier], name: Name) -> String {
    let mut out = String::new();
    for modifier in path {
        out.push_str(&modifier.to_string());
        out.push('.');
    }
    out.push_str(name.as_str());
    out
}
