//! The derived predicate surface
//!
//! [`Check`] is every legal modifier path applied to every leaf, built once
//! and read-only afterwards. The process-wide instance is [`check()`]; build
//! your own through [`Check::builder`] to change the [`Environment`].
//!
//! # Example
//!
//! ```rust
//! use stillwater_check::{check, Container, Name, Value};
//!
//! let c = check();
//! assert!(c.is()[Name::Even].test(&2.into(), &[]));
//! assert!(c.not()[Name::Even].test(&1.into(), &[]));
//! assert!(c.maybe()[Name::Even].test(&Value::Null, &[]));
//!
//! let evens = Value::array(vec![2.into(), 4.into()]);
//! assert!(c.of(Container::Array)[Name::Even].test(&evens, &[]));
//! assert_eq!(c.assert()[Name::Even].call(2.into(), &[]), Ok(2.into()));
//!
//! let entry = c.lookup("assert.not.array.of.even").unwrap();
//! assert_eq!(entry.qualified_name(), "assert.not.array.of.even");
//! ```

use crate::batch::{self, Rules};
use crate::diagnostic::ASSERT_FAILED;
use crate::environment::Environment;
use crate::error::{AssertionError, CheckError};
use crate::modifier::nesting::{self, Position};
use crate::modifier::{Assertion, Container, Derived, Modifier, Namespace};
use crate::predicate::{Leaf, Name, Registry};
use crate::value::{Class, Function, Value};
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

static CHECK: LazyLock<Check> =
    LazyLock::new(|| Check::standard().expect("standard predicate surface is well formed"));

/// The process-wide surface over the standard registry and a full
/// [`Environment`].
pub fn check() -> &'static Check {
    &CHECK
}

/// Either kind of surface entry.
#[derive(Clone, Debug)]
pub enum Entry {
    /// A boolean entry.
    Test(Derived),
    /// An `assert.*` entry.
    Assert(Assertion),
}

impl Entry {
    fn derived(&self) -> &Derived {
        match self {
            Entry::Test(derived) => derived,
            Entry::Assert(assertion) => assertion.derived(),
        }
    }

    /// The leaf name.
    pub fn name(&self) -> Name {
        self.derived().name()
    }

    /// Extra arguments forwarded to the leaf.
    pub fn arity(&self) -> usize {
        self.derived().arity()
    }

    /// The modifier path, outermost first.
    pub fn path(&self) -> &[Modifier] {
        self.derived().path()
    }

    /// Whether absent values pass.
    pub fn is_tolerant(&self) -> bool {
        self.derived().is_tolerant()
    }

    /// Dotted name, e.g. `assert.maybe.even`.
    pub fn qualified_name(&self) -> String {
        self.derived().qualified_name()
    }

    /// Evaluate the entry. Assertion entries answer `true` or fail.
    pub fn evaluate(&self, value: &Value, args: &[Value]) -> Result<bool, AssertionError> {
        match self {
            Entry::Test(derived) => Ok(derived.test(value, args)),
            Entry::Assert(assertion) => assertion.call(value.clone(), args).map(|_| true),
        }
    }
}

impl From<Derived> for Entry {
    fn from(derived: Derived) -> Self {
        Entry::Test(derived)
    }
}

impl From<&Derived> for Entry {
    fn from(derived: &Derived) -> Self {
        Entry::Test(derived.clone())
    }
}

impl From<Assertion> for Entry {
    fn from(assertion: Assertion) -> Self {
        Entry::Assert(assertion)
    }
}

impl From<&Assertion> for Entry {
    fn from(assertion: &Assertion) -> Self {
        Entry::Assert(assertion.clone())
    }
}

/// The `assert` namespace, which is also callable on its own as a
/// truthiness assertion.
///
/// # Example
///
/// ```rust
/// use stillwater_check::{check, value::Class, Value};
///
/// let assert = check().assert();
/// assert_eq!(assert.len(), 50);
/// assert!(assert.that((-1).into(), &[]).is_ok());
///
/// let err = assert.that(0.into(), &[]).unwrap_err();
/// assert_eq!(err.message(), "assert failed");
///
/// let err = assert
///     .that(false.into(), &["bar".into(), Class::syntax_error().into()])
///     .unwrap_err();
/// assert_eq!(err.message(), "bar");
/// assert!(err.is_instance_of(&Class::syntax_error()));
/// ```
#[derive(Clone, Debug)]
pub struct AssertSurface {
    namespace: Arc<Namespace<Assertion>>,
}

impl AssertSurface {
    /// Assert that `value` is truthy. `trailing` may hold a message and an
    /// error constructor, as for any assertion entry.
    pub fn that(&self, value: Value, trailing: &[Value]) -> Result<Value, AssertionError> {
        let message = trailing.first().and_then(Value::as_str);
        let kind = trailing
            .get(1)
            .and_then(Value::as_function)
            .and_then(Function::class);
        self.that_with(value, message, kind)
    }

    /// Typed form of [`that`](Self::that).
    pub fn that_with(
        &self,
        value: Value,
        message: Option<&str>,
        kind: Option<&Class>,
    ) -> Result<Value, AssertionError> {
        if value.is_truthy() {
            return Ok(value);
        }
        let message = message.filter(|m| !m.is_empty()).unwrap_or(ASSERT_FAILED);
        let kind = kind.cloned().unwrap_or_else(Class::type_error);
        Err(AssertionError::new(kind, message))
    }
}

impl Deref for AssertSurface {
    type Target = Namespace<Assertion>;

    fn deref(&self) -> &Self::Target {
        &self.namespace
    }
}

/// Builder for [`Check`].
#[derive(Debug, Default)]
pub struct CheckBuilder {
    env: Environment,
    registry: Option<Registry>,
}

impl CheckBuilder {
    /// Host capabilities captured by every entry.
    pub fn environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Use `registry` instead of the standard leaves.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build every legal namespace.
    pub fn build(self) -> Result<Check, CheckError> {
        let registry = match self.registry {
            Some(registry) => registry,
            None => Registry::standard()?,
        };
        let env = self.env;

        if !nesting::exposes(Position::Root, Modifier::Assert) {
            return Err(missing("assert"));
        }

        let is = Arc::new(Namespace::build(
            &registry,
            &[],
            &|leaf: &'static Leaf, path: &[Modifier]| Derived::compose(leaf, path, env),
        ));
        let assert = Arc::new(Namespace::build(
            &registry,
            &[Modifier::Assert],
            &|leaf: &'static Leaf, path: &[Modifier]| {
                Assertion::new(Derived::compose(leaf, path, env))
            },
        ));

        let not = is.nested(Modifier::Not).cloned().ok_or_else(|| missing("not"))?;
        let maybe = is
            .nested(Modifier::Maybe)
            .cloned()
            .ok_or_else(|| missing("maybe"))?;
        let [array, array_like, iterable, object] = Container::ALL.map(|container| {
            is.of_shared(container)
                .cloned()
                .ok_or_else(|| missing(container.name()))
        });
        let of = [array?, array_like?, iterable?, object?];

        #[cfg(feature = "tracing")]
        tracing::debug!(
            namespaces = nesting::legal_paths().len(),
            entries = is.total_entries() + assert.total_entries(),
            "predicate surface built"
        );

        Ok(Check {
            env,
            registry,
            is,
            not,
            maybe,
            of,
            assert: AssertSurface { namespace: assert },
        })
    }
}

fn missing(path: &str) -> CheckError {
    CheckError::InvalidArgument(format!("nesting table does not expose `{}`", path))
}

/// The derived predicate surface.
#[derive(Clone, Debug)]
pub struct Check {
    env: Environment,
    registry: Registry,
    is: Arc<Namespace<Derived>>,
    not: Arc<Namespace<Derived>>,
    maybe: Arc<Namespace<Derived>>,
    of: [Arc<Namespace<Derived>>; 4],
    assert: AssertSurface,
}

impl Check {
    /// Start building a surface.
    pub fn builder() -> CheckBuilder {
        CheckBuilder::default()
    }

    /// The standard surface with a full environment.
    pub fn standard() -> Result<Self, CheckError> {
        Self::builder().build()
    }

    /// The environment captured at build time.
    pub fn environment(&self) -> Environment {
        self.env
    }

    /// The leaves this surface was built from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The bare leaves.
    pub fn is(&self) -> &Namespace<Derived> {
        &self.is
    }

    /// `not.*`
    pub fn not(&self) -> &Namespace<Derived> {
        &self.not
    }

    /// `maybe.*`
    pub fn maybe(&self) -> &Namespace<Derived> {
        &self.maybe
    }

    /// `<container>.of.*`
    pub fn of(&self, container: Container) -> &Namespace<Derived> {
        &self.of[container as usize]
    }

    /// `assert.*`, also callable on its own.
    pub fn assert(&self) -> &AssertSurface {
        &self.assert
    }

    /// Standalone `not`: the negated truthiness of `value`.
    pub fn not_value(&self, value: &Value) -> bool {
        !value.is_truthy()
    }

    /// Standalone `maybe`: absent values pass, others by truthiness.
    pub fn maybe_value(&self, value: &Value) -> bool {
        !value.is_assigned() || value.is_truthy()
    }

    /// Every top-level key: leaves, modifiers and batch helpers.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.is.keys().chain(["assert", "map", "all", "any"])
    }

    /// Resolve a dotted path such as `assert.maybe.arrayLike.of.between`.
    pub fn lookup(&self, dotted: &str) -> Result<Entry, CheckError> {
        let (path, name) = nesting::parse(dotted)?;
        let entry = match path.split_first() {
            Some((Modifier::Assert, rest)) => self
                .assert
                .descend(rest)
                .and_then(|ns| ns.get(name))
                .cloned()
                .map(Entry::Assert),
            _ => self
                .is
                .descend(&path)
                .and_then(|ns| ns.get(name))
                .cloned()
                .map(Entry::Test),
        };
        entry.ok_or_else(|| CheckError::UnknownPredicate(dotted.to_string()))
    }

    /// See [`batch::map`].
    pub fn map(&self, data: &Value, rules: &Rules) -> Result<Value, AssertionError> {
        batch::map(data, rules)
    }

    /// See [`batch::all`].
    pub fn all(&self, result: &Value) -> Result<bool, CheckError> {
        batch::all(result)
    }

    /// See [`batch::any`].
    pub fn any(&self, result: &Value) -> Result<bool, CheckError> {
        batch::any(result)
    }
}
