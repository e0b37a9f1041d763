//! Dynamically typed values
//!
//! The predicates inspect values whose type is only known at runtime:
//! primitives, arrays, keyed records, collections, dates, regular
//! expressions and functions. [`Value`] is the closed set of those shapes.
//!
//! Compound values are reference-counted. Cloning a `Value` shares the
//! underlying data, which gives compounds an identity that the `equal`
//! predicate compares (see [`Value::strict_equals`]). The derived
//! `PartialEq` is structural and meant for tests.
//!
//! # Example
//!
//! ```rust
//! use stillwater_check::value::{Object, Value};
//!
//! let user = Value::object(
//!     Object::new()
//!         .with("name", "Ada")
//!         .with("tags", Value::array(vec!["admin".into(), "ops".into()])),
//! );
//!
//! assert_eq!(user.type_of(), "object");
//! assert_eq!(user.tag(), "Object");
//! assert!(user.own_property("name").is_some());
//! ```

mod class;
mod render;
#[cfg(feature = "serde")]
mod serde_impl;

pub use class::Class;
pub use render::{format_number, render};

pub(crate) use render::quote;

use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A dynamically typed value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The absent value.
    Undefined,
    /// The explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double, including NaN and the infinities.
    Number(f64),
    /// A string.
    String(String),
    /// A unique symbol.
    Symbol(Symbol),
    /// A genuine array.
    Array(Arc<Vec<Value>>),
    /// A keyed record, optionally an instance of a class.
    Object(Arc<Object>),
    /// A set of values.
    Set(Arc<Vec<Value>>),
    /// An associative collection.
    Map(Arc<Vec<(Value, Value)>>),
    /// A date.
    Date(Date),
    /// A regular expression.
    RegExp(RegExp),
    /// A function, possibly a constructor.
    Function(Function),
}

/// Container classification used to route the `.of` modifiers.
///
/// The categories are mutually exclusive: a genuine array is never
/// `ArrayLike`, a string is `Iterable`, a record with a `length` is
/// `ArrayLike` rather than `PlainObject`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A genuine array.
    Array,
    /// A record exposing a non-negative integer `length`.
    ArrayLike,
    /// A value traversed through the iteration protocol.
    Iterable,
    /// A plain record.
    PlainObject,
    /// Anything else.
    Other,
}

impl Value {
    /// Build an array value.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Arc::new(items.into_iter().collect()))
    }

    /// Build a set value. Duplicates (by strict equality) are dropped.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.iter().any(|seen| seen.strict_equals(&item)) {
                unique.push(item);
            }
        }
        Value::Set(Arc::new(unique))
    }

    /// Build a map value from key/value pairs.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Arc::new(entries.into_iter().collect()))
    }

    /// Wrap a record.
    pub fn object(object: Object) -> Self {
        Value::Object(Arc::new(object))
    }

    /// An empty instance of `class`.
    pub fn instance_of(class: &Class) -> Self {
        Value::object(Object::instance_of(class))
    }

    /// A promise-like object: an instance of `Promise` with a `then` method.
    pub fn promise() -> Self {
        Value::object(
            Object::instance_of(&Class::promise())
                .with("then", Value::function("then", |_| Ok(Value::Undefined))),
        )
    }

    /// A new unique symbol.
    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(Symbol::new(description))
    }

    /// Compile a regular expression value.
    pub fn regexp(pattern: &str) -> Result<Self, regex::Error> {
        RegExp::new(pattern).map(Value::RegExp)
    }

    /// A date at `millis` since the Unix epoch.
    pub fn date(millis: f64) -> Self {
        Value::Date(Date::from_millis(millis))
    }

    /// A named function.
    pub fn function<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Value::Function(Function::new(name, body))
    }

    /// The constructor function of `class`.
    pub fn constructor(class: &Class) -> Self {
        Value::Function(Function::constructor(class))
    }

    /// Anything other than `Undefined` or `Null`.
    pub fn is_assigned(&self) -> bool {
        !matches!(self, Value::Undefined | Value::Null)
    }

    /// Primitive truthiness: `undefined`, `null`, `false`, `0`, NaN and the
    /// empty string are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(n.is_nan() || *n == 0.0),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Whether this is a primitive rather than an object or function.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Undefined
                | Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::Symbol(_)
        )
    }

    /// The `typeof` name of this value.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Function(_) => "function",
            _ => "object",
        }
    }

    /// The `[object X]` tag of this value.
    pub fn tag(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Array(_) => "Array",
            Value::Object(object) => object.class().map_or("Object", Class::tag),
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Date(_) => "Date",
            Value::RegExp(_) => "RegExp",
            Value::Function(_) => "Function",
        }
    }

    /// The class whose chain `instanceStrict` walks. Primitives have none.
    pub fn class(&self) -> Option<Class> {
        match self {
            Value::Array(_) => Some(Class::array()),
            Value::Object(object) => Some(object.class().cloned().unwrap_or_else(Class::object)),
            Value::Set(_) => Some(Class::set()),
            Value::Map(_) => Some(Class::map()),
            Value::Date(_) => Some(Class::date()),
            Value::RegExp(_) => Some(Class::regexp()),
            Value::Function(_) => Some(Class::function()),
            _ => None,
        }
    }

    /// The name reached through `value.constructor.name`.
    ///
    /// A record's own `constructor` property takes precedence over its class,
    /// and primitives report their wrapper class. `None` for absent values.
    pub fn constructor_name(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Undefined | Value::Null => None,
            Value::Bool(_) => Some(Cow::Borrowed("Boolean")),
            Value::Number(_) => Some(Cow::Borrowed("Number")),
            Value::String(_) => Some(Cow::Borrowed("String")),
            Value::Symbol(_) => Some(Cow::Borrowed("Symbol")),
            Value::Object(object) => {
                if let Some(Value::Object(ctor)) = object.get("constructor") {
                    if let Some(Value::String(name)) = ctor.get("name") {
                        return Some(Cow::Borrowed(name.as_str()));
                    }
                }
                Some(Cow::Borrowed(object.class().map_or("Object", Class::name)))
            }
            other => other
                .class()
                .map(|class| Cow::Owned(class.name().to_string())),
        }
    }

    /// Look up an own property by key.
    ///
    /// Records expose their entries, arrays and strings expose their indices
    /// and `length`. Everything else has no own properties.
    pub fn own_property(&self, key: &str) -> Option<Cow<'_, Value>> {
        match self {
            Value::Object(object) => object.get(key).map(Cow::Borrowed),
            Value::Array(items) => {
                if key == "length" {
                    return Some(Cow::Owned(Value::Number(items.len() as f64)));
                }
                parse_index(key)
                    .and_then(|i| items.get(i))
                    .map(Cow::Borrowed)
            }
            Value::String(s) => {
                if key == "length" {
                    return Some(Cow::Owned(Value::Number(s.chars().count() as f64)));
                }
                parse_index(key)
                    .and_then(|i| s.chars().nth(i))
                    .map(|c| Cow::Owned(Value::String(c.to_string())))
            }
            _ => None,
        }
    }

    /// Own enumerable keys: record keys or array indices.
    pub fn own_keys(&self) -> Vec<String> {
        match self {
            Value::Object(object) => object.keys().map(str::to_string).collect(),
            Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// The numeric `length` property, if any.
    pub fn length(&self) -> Option<f64> {
        match self.own_property("length")?.as_ref() {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Strict equality: primitives by value (NaN never equal), compounds by
    /// identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) | (Value::Set(a), Value::Set(b)) => {
                Arc::ptr_eq(a, b)
            }
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Date(a), Value::Date(b)) => a.same(b),
            (Value::RegExp(a), Value::RegExp(b)) => a.same(b),
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The function, if this is one.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The record, if this is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Parse a canonical array index: decimal digits only, no sign, no leading
/// zero.
pub(crate) fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty()
        || !key.bytes().all(|b| b.is_ascii_digit())
        || (key.len() > 1 && key.starts_with('0'))
    {
        return None;
    }
    key.parse().ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// A keyed record with insertion-ordered own keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    class: Option<Class>,
    entries: Vec<(String, Value)>,
}

impl Object {
    /// An empty plain record.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty instance of `class`.
    pub fn instance_of(class: &Class) -> Self {
        Object {
            class: Some(class.clone()),
            entries: Vec::new(),
        }
    }

    /// Builder form of [`Object::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Whether `key` is an own key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Own keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Own values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Own entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of own keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no own keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The class this record is an instance of, `None` for plain records.
    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (k, v) in iter {
            object.insert(k, v);
        }
        object
    }
}

/// A unique symbol. Two symbols are equal only if one is a clone of the other.
#[derive(Clone, Debug)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// A fresh symbol with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Symbol(Arc::from(description.into()))
    }

    /// The description given at creation.
    pub fn description(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A point in time, in milliseconds since the Unix epoch. NaN is an invalid date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Date(f64);

impl Date {
    /// A date at `millis`.
    pub fn from_millis(millis: f64) -> Self {
        Date(millis)
    }

    /// The date that failed to parse.
    pub fn invalid() -> Self {
        Date(f64::NAN)
    }

    /// The current time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        Date(millis)
    }

    /// The time value.
    pub fn time(&self) -> f64 {
        self.0
    }

    /// Whether the time value is an integral number of milliseconds.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0
    }

    fn same(&self, other: &Date) -> bool {
        self.0 == other.0
    }
}

/// A compiled regular expression that remembers its source.
#[derive(Clone, Debug)]
pub struct RegExp(Regex);

impl RegExp {
    /// Compile `pattern`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(RegExp)
    }

    /// The pattern text.
    pub fn source(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the pattern matches somewhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    fn same(&self, other: &RegExp) -> bool {
        self.source() == other.source()
    }
}

impl PartialEq for RegExp {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

type Body = dyn Fn(&[Value]) -> Result<Value, Value> + Send + Sync;

/// A callable value. `Err` from [`Function::call`] is a thrown value.
///
/// Constructor functions carry the [`Class`] they construct; they are what
/// `instance`, `instanceStrict` and custom assertion error kinds accept.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    body: Option<Arc<Body>>,
    class: Option<Class>,
}

impl Function {
    /// A named function with `body`.
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Function {
            name: Arc::from(name.into()),
            body: Some(Arc::new(body)),
            class: None,
        }
    }

    /// The constructor of `class`. Calling it builds an empty instance.
    pub fn constructor(class: &Class) -> Self {
        Function {
            name: Arc::from(class.name()),
            body: None,
            class: Some(class.clone()),
        }
    }

    /// The function name (empty for anonymous functions).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class this function constructs, if it is a constructor.
    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Result<Value, Value> {
        match (&self.body, &self.class) {
            (Some(body), _) => body(args),
            (None, Some(class)) => Ok(Value::instance_of(class)),
            (None, None) => Ok(Value::Undefined),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (&self.body, &other.body) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => self.class == other.class,
            _ => false,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )+
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::object(object)
    }
}

impl From<Class> for Value {
    fn from(class: Class) -> Self {
        Value::constructor(&class)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<RegExp> for Value {
    fn from(re: RegExp) -> Self {
        Value::RegExp(re)
    }
}

impl From<Date> for Value {
    fn from(date: Date) -> Self {
        Value::Date(date)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => Value::object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_table() {
        for falsy in [
            Value::Undefined,
            Value::Null,
            Value::Bool(false),
            Value::Number(0.0),
            Value::Number(-0.0),
            Value::Number(f64::NAN),
            Value::from(""),
        ] {
            assert!(!falsy.is_truthy(), "{:?} should be falsy", falsy);
        }
        for truthy in [
            Value::Bool(true),
            Value::Number(-1.0),
            Value::from(" "),
            Value::object(Object::new()),
            Value::array(vec![]),
        ] {
            assert!(truthy.is_truthy(), "{:?} should be truthy", truthy);
        }
    }

    #[test]
    fn clones_share_identity() {
        let a = Value::array(vec![Value::from(1)]);
        let b = a.clone();
        let c = Value::array(vec![Value::from(1)]);
        assert!(a.strict_equals(&b));
        assert!(!a.strict_equals(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn nan_is_not_strictly_equal_to_itself() {
        let nan = Value::Number(f64::NAN);
        assert!(!nan.strict_equals(&nan));
    }

    #[test]
    fn symbols_compare_by_identity() {
        let a = Value::symbol("id");
        assert!(a.strict_equals(&a.clone()));
        assert!(!a.strict_equals(&Value::symbol("id")));
    }

    #[test]
    fn own_properties_of_strings_and_arrays() {
        let s = Value::from("foo");
        assert_eq!(s.length(), Some(3.0));
        assert_eq!(s.own_property("2").as_deref(), Some(&Value::from("o")));
        assert!(s.own_property("3").is_none());
        assert!(s.own_property("01").is_none());
        assert!(s.own_property("+1").is_none());

        let a = Value::array(vec!["x".into()]);
        assert_eq!(a.length(), Some(1.0));
        assert_eq!(a.own_keys(), vec!["0".to_string()]);
    }

    #[test]
    fn index_keys_are_canonical() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("12"), Some(12));
        for key in ["", "01", "+1", "-1", " 1", "1.0", "1e2"] {
            assert_eq!(parse_index(key), None, "{:?}", key);
        }
    }

    #[test]
    fn constructor_property_overrides_class_name() {
        let mock = Value::object(
            Object::new().with("constructor", Object::new().with("name", "Array")),
        );
        assert_eq!(mock.constructor_name().as_deref(), Some("Array"));
        assert_eq!(mock.tag(), "Object");
    }

    #[test]
    fn constructors_build_instances() {
        let ctor = Value::constructor(&Class::error());
        let instance = ctor.as_function().unwrap().call(&[]).unwrap();
        assert_eq!(instance.tag(), "Error");
        assert_eq!(instance.constructor_name().as_deref(), Some("Error"));
    }

    #[test]
    fn insert_replaces_in_place() {
        let object = Object::new().with("a", 1).with("b", 2).with("a", 3);
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(object.get("a"), Some(&Value::from(3)));
    }

    #[test]
    fn from_json_preserves_shape() {
        let value = Value::from(json!({ "foo": [1, "two", null], "bar": { "baz": true } }));
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(
            object.get("foo"),
            Some(&Value::array(vec![1.into(), "two".into(), Value::Null]))
        );
    }

    #[test]
    fn set_drops_duplicates() {
        let set = Value::set(vec!["a".into(), "b".into(), "a".into()]);
        match set {
            Value::Set(items) => assert_eq!(items.len(), 2),
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn invalid_dates() {
        assert!(!Date::invalid().is_valid());
        assert!(Date::from_millis(0.0).is_valid());
        assert!(Date::now().is_valid());
    }
}
