//! The leaf predicate registry
//!
//! Every leaf predicate is a pure, total test over a [`Value`] plus a fixed
//! number of extra positional arguments (its arity, 0 to 2). The registry is
//! a closed, compile-time set: [`Name`] enumerates it and [`Registry`] pairs
//! each name with its test and its diagnostic phrase.
//!
//! The individual tests live in the submodules and are plain functions, so
//! they can also be used directly:
//!
//! ```rust
//! use stillwater_check::predicate::number::between;
//! use stillwater_check::Value;
//!
//! assert!(between(&1.into(), &0.into(), &2.into()));
//! assert!(!between(&1.into(), &0.into(), &1.into()));
//! ```
//!
//! Through the registry they are looked up by name:
//!
//! ```rust
//! use stillwater_check::predicate::Registry;
//! use stillwater_check::{Environment, Value};
//!
//! let registry = Registry::standard().unwrap();
//! let leaf = registry.lookup("inRange").unwrap();
//!
//! assert_eq!(leaf.arity(), 2);
//! assert!(leaf.test(&(-1).into(), &[0.into(), (-1).into()], &Environment::full()));
//! ```

pub mod collection;
mod combinators;
pub mod number;
pub mod object;
pub mod scalar;
pub mod string;

pub use combinators::{Each, Maybe, Not, Predicate, PredicateExt};

use crate::environment::Environment;
use crate::error::CheckError;
use crate::modifier::MODIFIER_NAMES;
use crate::value::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Signature shared by every leaf test.
pub type LeafFn = fn(&Value, &[Value], &Environment) -> bool;

/// Highest number of extra arguments a leaf may declare.
pub const MAX_ARITY: usize = 2;

static UNDEFINED: Value = Value::Undefined;

/// Positional argument `i`, `Undefined` when missing.
pub(crate) fn arg(args: &[Value], i: usize) -> &Value {
    args.get(i).unwrap_or(&UNDEFINED)
}

/// A registry entry.
#[derive(Clone, Copy)]
pub struct Leaf {
    name: Name,
    arity: usize,
    phrase: &'static str,
    test: LeafFn,
}

impl Leaf {
    /// Create an entry.
    ///
    /// `phrase` is the diagnostic template: `{0}` and `{1}` stand for the
    /// extra arguments, `{type}` for the name of a constructor argument.
    pub const fn new(name: Name, arity: usize, phrase: &'static str, test: LeafFn) -> Self {
        Leaf {
            name,
            arity,
            phrase,
            test,
        }
    }

    /// The leaf name.
    pub fn name(&self) -> Name {
        self.name
    }

    /// Number of extra arguments after the tested value.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The diagnostic phrase template.
    pub fn phrase(&self) -> &'static str {
        self.phrase
    }

    /// Run the test.
    #[inline]
    pub fn test(&self, value: &Value, args: &[Value], env: &Environment) -> bool {
        (self.test)(value, args, env)
    }
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("phrase", &self.phrase)
            .finish_non_exhaustive()
    }
}

macro_rules! leaves {
    ($(
        $variant:ident = $name:literal, $arity:literal, $phrase:literal,
        |$v:ident, $a:pat_param, $e:pat_param| $body:expr;
    )+) => {
        /// Name of a leaf predicate.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Name {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl Name {
            /// Every leaf name, in registry order.
            pub const ALL: &'static [Name] = &[$(Name::$variant),+];

            /// The public name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Name::$variant => $name,)+
                }
            }
        }

        static LEAVES: &[Leaf] = &[$(
            Leaf::new(Name::$variant, $arity, $phrase, {
                fn test($v: &Value, $a: &[Value], $e: &Environment) -> bool {
                    $body
                }
                test
            }),
        )+];
    };
}

leaves! {
    Equal = "equal", 1, "to equal {0}", |v, a, _| scalar::equal(v, arg(a, 0));
    Undefined = "undefined", 0, "to be undefined", |v, _, _| scalar::undefined(v);
    Null = "null", 0, "to be null", |v, _, _| scalar::null(v);
    Assigned = "assigned", 0, "to be assigned", |v, _, _| scalar::assigned(v);
    Primitive = "primitive", 0, "to be primitive type", |v, _, _| scalar::primitive(v);
    Zero = "zero", 0, "to be 0", |v, _, _| number::zero(v);
    One = "one", 0, "to be 1", |v, _, _| number::one(v);
    Infinity = "infinity", 0, "to be infinity", |v, _, _| number::infinity(v);
    Number = "number", 0, "to be Number", |v, _, _| number::number(v);
    Integer = "integer", 0, "to be integer", |v, _, _| number::integer(v);
    Float = "float", 0, "to be non-integer number", |v, _, _| number::float(v);
    Even = "even", 0, "to be even number", |v, _, _| number::even(v);
    Odd = "odd", 0, "to be odd number", |v, _, _| number::odd(v);
    Greater = "greater", 1, "to be greater than {0}", |v, a, _| number::greater(v, arg(a, 0));
    Less = "less", 1, "to be less than {0}", |v, a, _| number::less(v, arg(a, 0));
    Between = "between", 2, "to be between {0} and {1}",
        |v, a, _| number::between(v, arg(a, 0), arg(a, 1));
    GreaterOrEqual = "greaterOrEqual", 1, "to be greater than or equal to {0}",
        |v, a, _| number::greater_or_equal(v, arg(a, 0));
    LessOrEqual = "lessOrEqual", 1, "to be less than or equal to {0}",
        |v, a, _| number::less_or_equal(v, arg(a, 0));
    InRange = "inRange", 2, "to be in the range {0} to {1}",
        |v, a, _| number::in_range(v, arg(a, 0), arg(a, 1));
    Positive = "positive", 0, "to be positive number", |v, _, _| number::positive(v);
    Negative = "negative", 0, "to be negative number", |v, _, _| number::negative(v);
    String = "string", 0, "to be String", |v, _, _| string::string(v);
    EmptyString = "emptyString", 0, "to be empty string", |v, _, _| string::empty_string(v);
    NonEmptyString = "nonEmptyString", 0, "to be non-empty string",
        |v, _, _| string::non_empty_string(v);
    Match = "match", 1, "to match {0}", |v, a, _| string::matches(v, arg(a, 0));
    Boolean = "boolean", 0, "to be Boolean", |v, _, _| scalar::boolean(v);
    True = "true", 0, "to be true", |v, _, _| scalar::is_true(v);
    False = "false", 0, "to be false", |v, _, _| scalar::is_false(v);
    Object = "object", 0, "to be Object", |v, _, _| object::object(v);
    EmptyObject = "emptyObject", 0, "to be empty object", |v, _, _| object::empty_object(v);
    NonEmptyObject = "nonEmptyObject", 0, "to be non-empty object",
        |v, _, _| object::non_empty_object(v);
    Thenable = "thenable", 0, "to be promise-like", |v, _, _| object::thenable(v);
    InstanceStrict = "instanceStrict", 1, "to be instanceof {type}",
        |v, a, _| object::instance_strict(v, arg(a, 0));
    Instance = "instance", 1, "to be {type}", |v, a, _| object::instance(v, arg(a, 0));
    Like = "like", 1, "to be like {0}", |v, a, _| object::like(v, arg(a, 0));
    Array = "array", 0, "to be Array", |v, _, _| collection::array(v);
    EmptyArray = "emptyArray", 0, "to be empty array", |v, _, _| collection::empty_array(v);
    NonEmptyArray = "nonEmptyArray", 0, "to be non-empty array",
        |v, _, _| collection::non_empty_array(v);
    ArrayLike = "arrayLike", 0, "to be array-like", |v, _, _| collection::array_like(v);
    Iterable = "iterable", 0, "to be iterable", |v, _, e| collection::iterable(v, e);
    Contains = "contains", 1, "to contain {0}", |v, a, e| collection::contains(v, arg(a, 0), e);
    In = "in", 1, "to be in {0}", |v, a, e| collection::is_in(v, arg(a, 0), e);
    ContainsKey = "containsKey", 1, "to contain key {0}",
        |v, a, e| collection::contains_key(v, arg(a, 0), e);
    KeyIn = "keyIn", 1, "to be key in {0}", |v, a, e| collection::key_in(v, arg(a, 0), e);
    HasLength = "hasLength", 1, "to have length {0}",
        |v, a, _| collection::has_length(v, arg(a, 0));
    Date = "date", 0, "to be valid Date", |v, _, _| object::date(v);
    Function = "function", 0, "to be Function", |v, _, _| object::function(v);
    Throws = "throws", 0, "to throw", |v, _, _| object::throws(v);
}

impl Name {
    /// The registry entry for this name.
    pub fn leaf(self) -> &'static Leaf {
        &LEAVES[self as usize]
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Name {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CheckError::UnknownPredicate(s.to_string()))
    }
}

/// The validated set of leaf predicates a surface is built from.
#[derive(Clone, Copy, Debug)]
pub struct Registry {
    leaves: &'static [Leaf],
}

impl Registry {
    /// The 48 standard leaves.
    pub fn standard() -> Result<Self, CheckError> {
        Self::from_leaves(LEAVES)
    }

    /// Validate a leaf table.
    ///
    /// Names must be unique, must not shadow a modifier and may take at most
    /// [`MAX_ARITY`] extra arguments.
    pub fn from_leaves(leaves: &'static [Leaf]) -> Result<Self, CheckError> {
        let mut seen = HashSet::with_capacity(leaves.len());
        for leaf in leaves {
            let name = leaf.name.as_str();
            if !seen.insert(name) {
                return Err(CheckError::DuplicatePredicate(name.to_string()));
            }
            if MODIFIER_NAMES.contains(&name) {
                return Err(CheckError::InvalidArgument(format!(
                    "predicate name `{}` collides with a modifier",
                    name
                )));
            }
            if leaf.arity > MAX_ARITY {
                return Err(CheckError::InvalidArgument(format!(
                    "predicate `{}` declares {} extra arguments",
                    name, leaf.arity
                )));
            }
        }
        Ok(Registry { leaves })
    }

    /// Look a leaf up by its public name.
    pub fn lookup(&self, name: &str) -> Result<&'static Leaf, CheckError> {
        self.leaves
            .iter()
            .find(|leaf| leaf.name.as_str() == name)
            .ok_or_else(|| CheckError::UnknownPredicate(name.to_string()))
    }

    /// Entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Leaf> {
        self.leaves.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_48_leaves() {
        let registry = Registry::standard().unwrap();
        assert_eq!(registry.len(), 48);
        assert_eq!(Name::ALL.len(), 48);
    }

    #[test]
    fn table_order_matches_names() {
        for (i, name) in Name::ALL.iter().enumerate() {
            assert_eq!(*name as usize, i);
            assert_eq!(name.leaf().name(), *name);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for name in Name::ALL {
            assert_eq!(name.as_str().parse::<Name>().unwrap(), *name);
        }
        assert_eq!(
            "nope".parse::<Name>(),
            Err(CheckError::UnknownPredicate("nope".into()))
        );
    }

    #[test]
    fn arities() {
        assert_eq!(Name::Number.leaf().arity(), 0);
        assert_eq!(Name::Match.leaf().arity(), 1);
        assert_eq!(Name::Between.leaf().arity(), 2);
        assert_eq!(Name::InRange.leaf().arity(), 2);
        assert!(Name::ALL.iter().all(|n| n.leaf().arity() <= MAX_ARITY));
    }

    #[test]
    fn lookup_unknown_name_fails() {
        let registry = Registry::standard().unwrap();
        assert!(registry.lookup("even").is_ok());
        assert_eq!(
            registry.lookup("map").unwrap_err(),
            CheckError::UnknownPredicate("map".into())
        );
    }

    fn zero(value: &Value, _: &[Value], _: &Environment) -> bool {
        number::zero(value)
    }

    #[test]
    fn duplicate_names_are_rejected() {
        static TWICE: &[Leaf] = &[
            Leaf::new(Name::Zero, 0, "to be 0", zero),
            Leaf::new(Name::Zero, 0, "to be 0", zero),
        ];
        assert_eq!(
            Registry::from_leaves(TWICE).unwrap_err(),
            CheckError::DuplicatePredicate("zero".into())
        );
    }

    #[test]
    fn excessive_arity_is_rejected() {
        static WIDE: &[Leaf] = &[Leaf::new(Name::Between, 3, "", zero)];
        assert!(matches!(
            Registry::from_leaves(WIDE),
            Err(CheckError::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_arguments_read_as_undefined() {
        let env = Environment::full();
        assert!(!Name::Greater.leaf().test(&1.into(), &[], &env));
        assert!(Name::Equal.leaf().test(&Value::Undefined, &[], &env));
    }

    #[test]
    fn environment_reaches_the_leaves() {
        let set = Value::set(vec!["a".into()]);
        let iterable = Name::Iterable.leaf();
        assert!(iterable.test(&set, &[], &Environment::full()));
        assert!(!iterable.test(&set, &[], &Environment::full().with_collections(false)));
    }
}
