//! Derived entries: a leaf composed with a modifier path

use super::{qualified_name, Modifier};
use crate::diagnostic;
use crate::environment::Environment;
use crate::error::AssertionError;
use crate::predicate::{Leaf, Maybe, Name, Not, Predicate, PredicateExt};
use crate::value::{Class, Function, Value};
use std::fmt;
use std::sync::Arc;

/// Type-erased layer so the combinator structs can wrap each other.
#[derive(Clone)]
struct Erased(Arc<dyn Predicate>);

impl Predicate for Erased {
    #[inline]
    fn check(&self, value: &Value, args: &[Value]) -> bool {
        self.0.check(value, args)
    }
}

/// A leaf predicate composed with every boolean modifier on its path.
///
/// Cloning is cheap; the composed test is shared.
#[derive(Clone)]
pub struct Derived {
    leaf: &'static Leaf,
    path: Arc<[Modifier]>,
    test: Erased,
}

impl Derived {
    /// Compose `leaf` with `path`, outermost modifier first.
    ///
    /// `Assert` steps are recorded in the path but leave the boolean test
    /// alone; [`Assertion`] adds that behaviour on top. When the path holds
    /// `maybe`, every `.of` below it also lets absent elements pass.
    pub fn compose(leaf: &'static Leaf, path: &[Modifier], env: Environment) -> Self {
        let tolerant = path.contains(&Modifier::Maybe);
        let mut test = Erased(Arc::new(move |value: &Value, args: &[Value]| {
            leaf.test(value, args, &env)
        }));
        for modifier in path.iter().rev() {
            test = match *modifier {
                Modifier::Not => Erased(Arc::new(Not(test))),
                Modifier::Maybe => Erased(Arc::new(Maybe(test))),
                Modifier::Of(container) => {
                    let each = test.each(container, env);
                    if tolerant {
                        Erased(Arc::new(each.tolerating_absence()))
                    } else {
                        Erased(Arc::new(each))
                    }
                }
                Modifier::Assert => test,
            };
        }
        Derived {
            leaf,
            path: path.into(),
            test,
        }
    }

    /// The leaf this entry was derived from.
    pub fn leaf(&self) -> &'static Leaf {
        self.leaf
    }

    /// The leaf name.
    pub fn name(&self) -> Name {
        self.leaf.name()
    }

    /// Extra arguments forwarded to the leaf.
    pub fn arity(&self) -> usize {
        self.leaf.arity()
    }

    /// The modifier path, outermost first.
    pub fn path(&self) -> &[Modifier] {
        &self.path
    }

    /// Whether absent values pass (a `maybe` is on the path).
    pub fn is_tolerant(&self) -> bool {
        self.path.contains(&Modifier::Maybe)
    }

    /// Whether the result is inverted (a `not` is on the path).
    pub fn is_negated(&self) -> bool {
        self.path.contains(&Modifier::Not)
    }

    /// Dotted name, e.g. `maybe.array.of.even`.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.path, self.name())
    }

    /// Run the composed test.
    #[inline]
    pub fn test(&self, value: &Value, args: &[Value]) -> bool {
        self.test.check(value, args)
    }
}

impl Predicate for Derived {
    #[inline]
    fn check(&self, value: &Value, args: &[Value]) -> bool {
        self.test(value, args)
    }
}

impl fmt::Debug for Derived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("name", &self.qualified_name())
            .field("arity", &self.arity())
            .finish()
    }
}

/// An `assert.*` entry: fails with an [`AssertionError`] where the composed
/// test answers `false`, and passes the tested value through otherwise.
///
/// # Example
///
/// ```rust
/// use stillwater_check::{check, Name, Value};
///
/// let assert_match = &check().assert()[Name::Match];
/// let word = Value::regexp(r"^\w+$").unwrap();
///
/// assert_eq!(assert_match.call("foo".into(), &[word.clone()]), Ok("foo".into()));
///
/// let err = assert_match
///     .call("".into(), &[word.clone(), "foo bar".into()])
///     .unwrap_err();
/// assert_eq!(err.message(), "foo bar");
///
/// let err = assert_match.call("".into(), &[word, "".into()]).unwrap_err();
/// assert_eq!(err.message(), r#"assert failed: expected "" to match /^\w+$/"#);
/// ```
#[derive(Clone, Debug)]
pub struct Assertion {
    test: Derived,
}

impl Assertion {
    /// Wrap a composed test.
    pub fn new(test: Derived) -> Self {
        Assertion { test }
    }

    /// The composed boolean test.
    pub fn derived(&self) -> &Derived {
        &self.test
    }

    /// The leaf name.
    pub fn name(&self) -> Name {
        self.test.name()
    }

    /// Extra arguments forwarded to the leaf.
    pub fn arity(&self) -> usize {
        self.test.arity()
    }

    /// The modifier path, starting with `assert`.
    pub fn path(&self) -> &[Modifier] {
        self.test.path()
    }

    /// Assert with positional trailing arguments.
    ///
    /// The first [`arity`](Self::arity) arguments go to the predicate. The
    /// one after them, if a string, is the message; the next, if a
    /// constructor, is the error kind.
    pub fn call(&self, value: Value, args: &[Value]) -> Result<Value, AssertionError> {
        let (args, trailing) = args.split_at(self.arity().min(args.len()));
        let message = trailing.first().and_then(Value::as_str);
        let kind = trailing
            .get(1)
            .and_then(Value::as_function)
            .and_then(Function::class);
        self.call_with(value, args, message, kind)
    }

    /// Assert with an explicit message and error kind.
    ///
    /// An empty message counts as no message. The default kind is
    /// `TypeError`.
    pub fn call_with(
        &self,
        value: Value,
        args: &[Value],
        message: Option<&str>,
        kind: Option<&Class>,
    ) -> Result<Value, AssertionError> {
        if self.test.test(&value, args) {
            return Ok(value);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            predicate = %self.test.qualified_name(),
            value = %value,
            "assertion failed"
        );

        let message = match message {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => diagnostic::describe(self.test.leaf(), &value, args, self.test.is_negated()),
        };
        let kind = kind.cloned().unwrap_or_else(Class::type_error);
        Err(AssertionError::new(kind, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Container;
    use crate::value::Object;

    fn derive(name: Name, path: &[Modifier]) -> Derived {
        Derived::compose(name.leaf(), path, Environment::full())
    }

    fn nums(items: &[f64]) -> Value {
        Value::array(items.iter().map(|n| Value::from(*n)))
    }

    #[test]
    fn bare_leaf() {
        let even = derive(Name::Even, &[]);
        assert!(even.test(&2.into(), &[]));
        assert!(!even.test(&1.into(), &[]));
        assert_eq!(even.qualified_name(), "even");
    }

    #[test]
    fn not_forwards_extra_arguments() {
        let not_between = derive(Name::Between, &[Modifier::Not]);
        assert!(not_between.test(&1.into(), &[0.into(), 1.into()]));
        assert!(!not_between.test(&1.into(), &[0.into(), 2.into()]));
    }

    #[test]
    fn maybe_short_circuits_on_absence() {
        let maybe = derive(Name::Null, &[Modifier::Maybe]);
        assert!(maybe.test(&Value::Null, &[]));
        assert!(!maybe.test(&1.into(), &[]));
    }

    #[test]
    fn of_requires_the_exact_category() {
        let of = derive(Name::Even, &[Modifier::Of(Container::Array)]);
        assert!(of.test(&nums(&[2.0, 4.0]), &[]));
        assert!(!of.test(&nums(&[2.0, 3.0]), &[]));
        assert!(of.test(&nums(&[]), &[]));
        let record = Value::object(Object::new().with("0", 2).with("length", 1));
        assert!(!of.test(&record, &[]));
    }

    #[test]
    fn not_applies_outside_of() {
        let not_of = derive(Name::Even, &[Modifier::Not, Modifier::Of(Container::Array)]);
        assert!(not_of.test(&nums(&[2.0, 3.0]), &[]));
        assert!(!not_of.test(&nums(&[2.0]), &[]));
        assert!(not_of.test(&Value::Null, &[]));
    }

    #[test]
    fn maybe_of_tolerates_absent_elements() {
        let path = [Modifier::Maybe, Modifier::Of(Container::Array)];
        let maybe_of = derive(Name::Even, &path);
        assert!(maybe_of.is_tolerant());
        assert!(maybe_of.test(&Value::Null, &[]));
        assert!(maybe_of.test(&Value::array(vec![2.into(), Value::Null]), &[]));
        assert!(!maybe_of.test(&Value::array(vec![3.into(), Value::Null]), &[]));
    }

    #[test]
    fn assertion_passes_value_through() {
        let assertion = Assertion::new(derive(Name::NonEmptyString, &[
            Modifier::Assert,
            Modifier::Of(Container::Array),
        ]));
        let data = Value::array(vec!["foo".into(), "bar".into()]);
        assert_eq!(assertion.call(data.clone(), &[]), Ok(data));
    }

    #[test]
    fn assertion_strips_trailing_arguments_by_arity() {
        let assertion = Assertion::new(derive(Name::Between, &[
            Modifier::Assert,
            Modifier::Of(Container::Array),
        ]));
        let data = nums(&[2.5, 3.0]);
        let err = assertion
            .call(data.clone(), &[2.into(), 3.into(), "blee".into(), Class::range_error().into()])
            .unwrap_err();
        assert_eq!(err.message(), "blee");
        assert!(err.is_instance_of(&Class::range_error()));

        let err = assertion.call(data, &[2.into(), 3.into(), "wibble".into()]).unwrap_err();
        assert_eq!(err.message(), "wibble");
        assert_eq!(err.kind(), &Class::type_error());
    }

    #[test]
    fn negated_assertion_message() {
        let assertion = Assertion::new(derive(Name::Odd, &[Modifier::Assert, Modifier::Not]));
        let err = assertion.call(1.into(), &[]).unwrap_err();
        assert_eq!(err.message(), "assert failed: expected 1 not to be odd number");
        assert_eq!(assertion.call(2.into(), &[]), Ok(2.into()));
    }

    #[test]
    fn call_with_ignores_empty_message() {
        let assertion = Assertion::new(derive(Name::Even, &[Modifier::Assert]));
        let err = assertion
            .call_with(1.into(), &[], Some(""), Some(&Class::syntax_error()))
            .unwrap_err();
        assert_eq!(err.message(), "assert failed: expected 1 to be even number");
        assert!(err.is_instance_of(&Class::syntax_error()));
    }

    #[cfg(feature = "tracing")]
    #[tracing_test::traced_test]
    #[test]
    fn failures_are_logged() {
        let assertion = Assertion::new(derive(Name::Even, &[Modifier::Assert]));
        assert!(assertion.call(2.into(), &[]).is_ok());
        assert!(!logs_contain("assertion failed"));

        assert!(assertion.call(1.into(), &[]).is_err());
        assert!(logs_contain("assertion failed"));
        assert!(logs_contain("assert.even"));
    }
}
