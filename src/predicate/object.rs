//! Object, type and function predicates

use crate::value::{Function, Value};

/// A record whose tag is `Object`: plain records and instances of
/// user-defined classes, but not arrays, errors or promises.
pub fn object(value: &Value) -> bool {
    matches!(value, Value::Object(_)) && value.tag() == "Object"
}

/// An [`object`] with no own keys.
pub fn empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(o) if o.is_empty()) && object(value)
}

/// An [`object`] with at least one own key.
pub fn non_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(o) if !o.is_empty()) && object(value)
}

/// Anything with a callable `then`.
pub fn thenable(value: &Value) -> bool {
    value.is_assigned()
        && matches!(value.own_property("then").as_deref(), Some(Value::Function(_)))
}

/// Whether `value` is an instance of `constructor` through its class chain.
///
/// Primitives are never instances, and a `constructor` that is not a
/// constructor function matches nothing.
///
/// # Example
///
/// ```rust
/// use stillwater_check::predicate::object::instance_strict;
/// use stillwater_check::value::{Class, Value};
///
/// let error = Value::instance_of(&Class::type_error());
/// assert!(instance_strict(&error, &Class::error().into()));
/// assert!(instance_strict(&error, &Class::object().into()));
/// assert!(!instance_strict(&error, &Class::array().into()));
/// ```
pub fn instance_strict(value: &Value, constructor: &Value) -> bool {
    match (value.class(), constructor_class(constructor)) {
        (Some(class), Some(target)) => class.is_subclass_of(target),
        _ => false,
    }
}

/// Loose instance check.
///
/// Passes when [`instance_strict`] does, or when the value's constructor name
/// or tag equals the constructor's name. Survives values crossing realm
/// boundaries and mocked constructors.
pub fn instance(value: &Value, constructor: &Value) -> bool {
    if instance_strict(value, constructor) {
        return true;
    }
    let Some(name) = constructor.as_function().map(Function::name) else {
        return false;
    };
    if name.is_empty() || !value.is_assigned() {
        return false;
    }
    value.constructor_name().as_deref() == Some(name) || value.tag() == name
}

/// Structural likeness: every own key of `archetype` (record keys or array
/// indices) is an own key of `value` holding a value of the same `typeof`,
/// recursively for nested objects. Extra keys on `value` are ignored, and an
/// archetype with no own keys matches anything.
pub fn like(value: &Value, archetype: &Value) -> bool {
    archetype.own_keys().iter().all(|key| {
        let (Some(actual), Some(expected)) = (value.own_property(key), archetype.own_property(key))
        else {
            return false;
        };
        if actual.type_of() != expected.type_of() {
            return false;
        }
        !object(&actual) || like(&actual, &expected)
    })
}

/// A date with a valid time value.
pub fn date(value: &Value) -> bool {
    matches!(value, Value::Date(d) if d.is_valid())
}

/// Any function.
pub fn function(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

/// A function that fails when called with no arguments.
pub fn throws(value: &Value) -> bool {
    value.as_function().is_some_and(|f| f.call(&[]).is_err())
}

fn constructor_class(constructor: &Value) -> Option<&crate::value::Class> {
    constructor.as_function().and_then(Function::class)
}
