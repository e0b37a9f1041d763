//! Short textual representations used in diagnostics
//!
//! Primitives render as literals (strings JSON-quoted), everything else by
//! its constructor or kind name so that messages never dump object contents.

use super::Value;

/// Render a value the way assertion messages show it.
///
/// # Example
///
/// ```rust
/// use stillwater_check::value::{render, Value};
///
/// assert_eq!(render(&Value::from("foo")), "\"foo\"");
/// assert_eq!(render(&Value::from(1.5)), "1.5");
/// assert_eq!(render(&Value::array(vec![])), "Array");
/// assert_eq!(render(&Value::Undefined), "undefined");
/// ```
pub fn render(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => quote(s),
        Value::Symbol(symbol) => format!("Symbol({})", symbol.description()),
        Value::RegExp(re) => format!("/{}/", re.source()),
        _ => value
            .constructor_name()
            .map(|name| name.into_owned())
            .unwrap_or_else(|| "Object".to_string()),
    }
}

/// Format a number like the host language prints it.
///
/// Integral values print without a fractional part, the non-finite values
/// print as `NaN`, `Infinity` and `-Infinity`, and negative zero prints as `0`.
/// Magnitudes from `1e21` up and below `1e-6` use exponent notation with an
/// explicit sign (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else {
        format!("{}", n)
    }
}

pub(crate) fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{:?}", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Class, Object};

    #[test]
    fn numbers() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(1.1), "1.1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e30), "-2.5e+30");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn strings_are_json_quoted() {
        assert_eq!(render(&Value::from("")), "\"\"");
        assert_eq!(render(&Value::from("\"f\\o/o\"")), r#""\"f\\o/o\"""#);
    }

    #[test]
    fn compounds_render_by_constructor_name() {
        assert_eq!(render(&Value::object(Object::new())), "Object");
        assert_eq!(render(&Value::instance_of(&Class::type_error())), "TypeError");
        assert_eq!(
            render(&Value::function("noop", |_| Ok(Value::Undefined))),
            "Function"
        );
        assert_eq!(render(&Value::set(vec![])), "Set");
    }

    #[test]
    fn regexps_render_with_slashes() {
        let re = Value::regexp(r#""b\\a/r""#).unwrap();
        assert_eq!(render(&re), r#"/"b\\a/r"/"#);
    }
}
