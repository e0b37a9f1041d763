//! Constructor identities for object values
//!
//! A [`Class`] names the constructor an object was created with and links to
//! its parent, forming the chain that `instanceStrict` walks. Built-in classes
//! are process-wide singletons so that identity comparison works across calls.

use std::fmt;
use std::sync::{Arc, LazyLock};

/// A constructor identity with an optional parent class.
///
/// Equality is identity: two classes created separately with the same name
/// are different classes, exactly like two distinct constructor functions.
///
/// # Example
///
/// ```rust
/// use stillwater_check::value::Class;
///
/// let base = Class::new("Shape");
/// let circle = Class::extends("Circle", &base);
///
/// assert!(circle.is_subclass_of(&base));
/// assert!(circle.is_subclass_of(&Class::object()));
/// assert!(!base.is_subclass_of(&circle));
/// ```
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

struct ClassInner {
    name: String,
    parent: Option<Class>,
    tag: Option<&'static str>,
}

impl Class {
    /// Create a user class deriving directly from `Object`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::extends(name, &Class::object())
    }

    /// Create a user class deriving from `parent`.
    pub fn extends(name: impl Into<String>, parent: &Class) -> Self {
        Class(Arc::new(ClassInner {
            name: name.into(),
            parent: Some(parent.clone()),
            tag: None,
        }))
    }

    fn builtin(name: &'static str, parent: Option<&Class>, tag: &'static str) -> Self {
        Class(Arc::new(ClassInner {
            name: name.to_string(),
            parent: parent.cloned(),
            tag: Some(tag),
        }))
    }

    /// The constructor name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The parent class, `None` only for `Object`.
    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// Whether this is one of the built-in classes.
    pub fn is_builtin(&self) -> bool {
        self.0.tag.is_some()
    }

    /// This class followed by every ancestor up to `Object`.
    pub fn ancestors(&self) -> impl Iterator<Item = &Class> {
        std::iter::successors(Some(self), |class| class.parent())
    }

    /// Whether `other` appears in this class's chain (including itself).
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        self.ancestors().any(|class| class == other)
    }

    /// The `[object X]` tag of instances: the nearest built-in tag.
    pub fn tag(&self) -> &'static str {
        self.ancestors()
            .find_map(|class| class.0.tag)
            .unwrap_or("Object")
    }

    /// The `Object` class.
    pub fn object() -> Self {
        BUILTINS.object.clone()
    }

    /// The `Function` class.
    pub fn function() -> Self {
        BUILTINS.function.clone()
    }

    /// The `Array` class.
    pub fn array() -> Self {
        BUILTINS.array.clone()
    }

    /// The `Error` class.
    pub fn error() -> Self {
        BUILTINS.error.clone()
    }

    /// The `TypeError` class, the default kind of assertion failures.
    pub fn type_error() -> Self {
        BUILTINS.type_error.clone()
    }

    /// The `RangeError` class.
    pub fn range_error() -> Self {
        BUILTINS.range_error.clone()
    }

    /// The `SyntaxError` class.
    pub fn syntax_error() -> Self {
        BUILTINS.syntax_error.clone()
    }

    /// The `Date` class.
    pub fn date() -> Self {
        BUILTINS.date.clone()
    }

    /// The `RegExp` class.
    pub fn regexp() -> Self {
        BUILTINS.regexp.clone()
    }

    /// The `Set` class.
    pub fn set() -> Self {
        BUILTINS.set.clone()
    }

    /// The `Map` class.
    pub fn map() -> Self {
        BUILTINS.map.clone()
    }

    /// The `Promise` class.
    pub fn promise() -> Self {
        BUILTINS.promise.clone()
    }

    /// The `String` wrapper class.
    pub fn string() -> Self {
        BUILTINS.string.clone()
    }

    /// The `Number` wrapper class.
    pub fn number() -> Self {
        BUILTINS.number.clone()
    }

    /// The `Boolean` wrapper class.
    pub fn boolean() -> Self {
        BUILTINS.boolean.clone()
    }

    /// The `Symbol` class.
    pub fn symbol() -> Self {
        BUILTINS.symbol.clone()
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.0.name)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

struct Builtins {
    object: Class,
    function: Class,
    array: Class,
    error: Class,
    type_error: Class,
    range_error: Class,
    syntax_error: Class,
    date: Class,
    regexp: Class,
    set: Class,
    map: Class,
    promise: Class,
    string: Class,
    number: Class,
    boolean: Class,
    symbol: Class,
}

static BUILTINS: LazyLock<Builtins> = LazyLock::new(|| {
    let object = Class::builtin("Object", None, "Object");
    let error = Class::builtin("Error", Some(&object), "Error");
    let child = |name: &'static str, tag: &'static str| Class::builtin(name, Some(&object), tag);

    Builtins {
        function: child("Function", "Function"),
        array: child("Array", "Array"),
        type_error: Class::builtin("TypeError", Some(&error), "Error"),
        range_error: Class::builtin("RangeError", Some(&error), "Error"),
        syntax_error: Class::builtin("SyntaxError", Some(&error), "Error"),
        date: child("Date", "Date"),
        regexp: child("RegExp", "RegExp"),
        set: child("Set", "Set"),
        map: child("Map", "Map"),
        promise: child("Promise", "Promise"),
        string: child("String", "String"),
        number: child("Number", "Number"),
        boolean: child("Boolean", "Boolean"),
        symbol: child("Symbol", "Symbol"),
        error,
        object,
    }
});
