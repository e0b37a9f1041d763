//! Default messages for failed assertions
//!
//! Every message has the shape
//! `assert failed: expected <value> [not ]<phrase>`, where the phrase is the
//! leaf's template with its extra arguments filled in. Values render through
//! [`render`], so records and functions show by constructor name rather
//! than by content.

use crate::predicate::{arg, Leaf};
use crate::value::{render, Value};

/// Prefix of every synthesized message, and the whole message of a failed
/// standalone assertion.
pub const ASSERT_FAILED: &str = "assert failed";

/// Synthesize the message for `leaf` failing on `value`.
///
/// # Example
///
/// ```rust
/// use stillwater_check::diagnostic::describe;
/// use stillwater_check::{Name, Value};
///
/// let leaf = Name::Between.leaf();
/// assert_eq!(
///     describe(leaf, &1.into(), &[1.into(), 2.into()], false),
///     "assert failed: expected 1 to be between 1 and 2"
/// );
/// assert_eq!(
///     describe(Name::Odd.leaf(), &1.into(), &[], true),
///     "assert failed: expected 1 not to be odd number"
/// );
/// ```
pub fn describe(leaf: &Leaf, value: &Value, args: &[Value], negated: bool) -> String {
    format!(
        "{}: expected {} {}{}",
        ASSERT_FAILED,
        render(value),
        if negated { "not " } else { "" },
        fill(leaf.phrase(), args)
    )
}

/// Substitute `{0}`, `{1}` and `{type}` in `template`.
///
/// `{type}` is the name of a constructor argument (falling back to its
/// rendering). Anything else between braces is copied verbatim.
pub fn fill(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        match &tail[1..end] {
            "0" => out.push_str(&render(arg(args, 0))),
            "1" => out.push_str(&render(arg(args, 1))),
            "type" => out.push_str(&type_name(arg(args, 0))),
            _ => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}

fn type_name(constructor: &Value) -> String {
    match constructor {
        Value::Function(f) if !f.name().is_empty() => f.name().to_string(),
        other => render(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Name;
    use crate::value::{Class, Object};

    fn message(name: Name, value: Value, args: &[Value]) -> String {
        describe(name.leaf(), &value, args, false)
    }

    #[test]
    fn scalar_messages() {
        assert_eq!(
            message(Name::Equal, "foo".into(), &["bar".into()]),
            r#"assert failed: expected "foo" to equal "bar""#
        );
        assert_eq!(
            message(Name::Equal, true.into(), &[false.into()]),
            "assert failed: expected true to equal false"
        );
        assert_eq!(
            message(Name::Null, Value::Undefined, &[]),
            "assert failed: expected undefined to be null"
        );
        assert_eq!(
            message(Name::Primitive, Value::instance_of(&Class::type_error()), &[]),
            "assert failed: expected TypeError to be primitive type"
        );
    }

    #[test]
    fn numeric_messages() {
        assert_eq!(
            message(Name::Integer, 1.1.into(), &[]),
            "assert failed: expected 1.1 to be integer"
        );
        assert_eq!(
            message(Name::GreaterOrEqual, 1.into(), &[2.into()]),
            "assert failed: expected 1 to be greater than or equal to 2"
        );
        assert_eq!(
            message(Name::InRange, 1.into(), &[2.into(), 3.into()]),
            "assert failed: expected 1 to be in the range 2 to 3"
        );
        assert_eq!(
            message(Name::Infinity, (-1).into(), &[]),
            "assert failed: expected -1 to be infinity"
        );
    }

    #[test]
    fn string_messages_are_json_quoted() {
        assert_eq!(
            message(Name::EmptyString, r#""f\o/o""#.into(), &[]),
            r#"assert failed: expected "\"f\\o/o\"" to be empty string"#
        );
        assert_eq!(
            message(Name::Match, "foo".into(), &[Value::regexp(r#""b\\a/r""#).unwrap()]),
            r#"assert failed: expected "foo" to match /"b\\a/r"/"#
        );
    }

    #[test]
    fn compound_messages() {
        let object = || Value::object(Object::new());
        assert_eq!(
            message(Name::Object, Value::array(vec![]), &[]),
            "assert failed: expected Array to be Object"
        );
        assert_eq!(
            message(Name::Like, object(), &[object()]),
            "assert failed: expected Object to be like Object"
        );
        assert_eq!(
            message(Name::In, "foo".into(), &[Value::array(vec![])]),
            r#"assert failed: expected "foo" to be in Array"#
        );
        assert_eq!(
            message(Name::ContainsKey, Value::array(vec![]), &[0.into()]),
            "assert failed: expected Array to contain key 0"
        );
        assert_eq!(
            message(Name::Throws, Value::function("f", |_| Ok(Value::Undefined)), &[]),
            "assert failed: expected Function to throw"
        );
    }

    #[test]
    fn constructor_arguments_render_by_name() {
        assert_eq!(
            message(Name::InstanceStrict, "foo".into(), &[Class::string().into()]),
            r#"assert failed: expected "foo" to be instanceof String"#
        );
        assert_eq!(
            message(Name::Instance, "".into(), &[Class::date().into()]),
            r#"assert failed: expected "" to be Date"#
        );
    }

    #[test]
    fn fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{2} and {x", &[]), "{2} and {x");
        assert_eq!(fill("to be {0}", &[]), "to be undefined");
    }
}
