//! Integration tests for `map`, `all`, `any` and `audit` over JSON-shaped data

use serde_json::json;
use stillwater_check::prelude::*;
use stillwater_check::{assert_failure, assert_success};

fn data(value: serde_json::Value) -> Value {
    Value::from(value)
}

#[test]
fn test_map_accepts_mismatched_shapes() {
    let c = check();
    let string = || Rules::leaf(&c.is()[Name::String]);
    assert!(c.map(&data(json!([])), &Rules::list([])).is_ok());
    assert!(c.map(&data(json!({})), &Rules::record(Vec::<(&str, Rules)>::new())).is_ok());
    assert!(c.map(&data(json!([])), &Rules::record([("a", string())])).is_ok());
    assert!(c.map(&data(json!({})), &Rules::list([string()])).is_ok());
    assert!(c
        .map(&data(json!([""])), &Rules::list([string(), string()]))
        .is_ok());
}

#[test]
fn test_map_with_object_rules() {
    let c = check();
    let rules = Rules::record([
        ("foo", Rules::leaf(&c.is()[Name::String])),
        ("bar", Rules::leaf(&c.is()[Name::String])),
        (
            "baz",
            Rules::record([("qux", Rules::leaf(&c.is()[Name::Number]))]),
        ),
    ]);
    let result = c
        .map(
            &data(json!({ "foo": "", "bar": 0, "baz": { "qux": 0, "wibble": "blee" } })),
            &rules,
        )
        .unwrap();
    assert_eq!(
        result,
        data(json!({ "foo": true, "bar": false, "baz": { "qux": true } }))
    );
}

#[test]
fn test_map_with_maybe_rules() {
    let c = check();
    let maybe_string = || Rules::leaf(&c.maybe()[Name::String]);
    let rules = Rules::record([
        ("foo", maybe_string()),
        ("bar", maybe_string()),
        ("baz", Rules::record([("qux", maybe_string())])),
    ]);
    let result = c
        .map(&data(json!({ "foo": null, "baz": { "qux": "" } })), &rules)
        .unwrap();
    assert_eq!(
        result,
        data(json!({ "foo": true, "bar": true, "baz": { "qux": true } }))
    );
}

#[test]
fn test_map_single_rule_applies_to_every_position() {
    let c = check();
    let result = c
        .map(
            &data(json!({ "foo": {}, "bar": { "baz": "qux" } })),
            &Rules::each(&c.is()[Name::Object]),
        )
        .unwrap();
    assert_eq!(result, data(json!({ "foo": true, "bar": true })));
}

#[test]
fn test_map_with_absent_nested_data() {
    let c = check();
    let nested = |entry: &stillwater_check::Derived| {
        Rules::record([("foo", Rules::record([("bar", Rules::leaf(entry))]))])
    };
    let empty = data(json!({}));
    assert_eq!(
        c.map(&empty, &nested(&c.maybe()[Name::String])).unwrap(),
        data(json!({ "foo": { "bar": true } }))
    );
    assert_eq!(
        c.map(&empty, &nested(&c.is()[Name::Undefined])).unwrap(),
        data(json!({ "foo": { "bar": false } }))
    );
    assert_eq!(
        c.map(&empty, &nested(&c.not()[Name::Assigned])).unwrap(),
        data(json!({ "foo": { "bar": false } }))
    );
}

#[test]
fn test_map_propagates_assertion_failures() {
    let c = check();
    let assert_string = &c.assert()[Name::String];
    assert!(c.map(&data(json!(["foo"])), &Rules::each(assert_string)).is_ok());
    assert!(c
        .map(
            &data(json!({ "foo": "bar" })),
            &Rules::record([("foo", Rules::leaf(assert_string))])
        )
        .is_ok());

    let err = c
        .map(&data(json!(["foo", 0])), &Rules::each(assert_string))
        .unwrap_err();
    assert_eq!(err.message(), "assert failed: expected 0 to be String");
    assert!(c
        .map(&data(json!({ "foo": "foo", "bar": 0 })), &Rules::each(assert_string))
        .is_err());
}

#[test]
fn test_all_and_any() {
    let c = check();
    assert!(c.all(&data(json!({ "foo": true, "bar": true }))).unwrap());
    assert!(c.all(&data(json!([true, true, true]))).unwrap());
    assert!(c.all(&data(json!({ "foo": { "bar": { "baz": { "qux": true } } } }))).unwrap());
    assert!(!c.all(&data(json!([true, false, true]))).unwrap());
    assert!(!c.all(&data(json!({ "foo": { "bar": { "baz": false } }, "qux": true }))).unwrap());

    assert!(c.any(&data(json!({ "foo": false, "bar": true }))).unwrap());
    assert!(c.any(&data(json!({ "foo": { "bar": true } }))).unwrap());
    assert!(!c.any(&data(json!([false, false]))).unwrap());
    assert!(!c.any(&data(json!({ "foo": { "bar": false } }))).unwrap());
}

#[test]
fn test_all_and_any_reject_scalars() {
    let c = check();
    let helpers: [fn(&Check, &Value) -> Result<bool, CheckError>; 2] = [Check::all, Check::any];
    for helper in helpers {
        assert!(matches!(
            helper(c, &"foo".into()),
            Err(CheckError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_map_then_all() {
    let c = check();
    let rules = Rules::record([
        ("name", Rules::leaf(&c.is()[Name::NonEmptyString])),
        ("age", Rules::leaf(&c.is()[Name::Integer])),
        ("tags", Rules::leaf(&c.of(Container::Array)[Name::String])),
    ]);
    let good = data(json!({ "name": "ada", "age": 36, "tags": ["x"] }));
    let bad = data(json!({ "name": "", "age": 36.5, "tags": ["x", 1] }));

    assert!(c.all(&c.map(&good, &rules).unwrap()).unwrap());
    let result = c.map(&bad, &rules).unwrap();
    assert!(!c.any(&result).unwrap());
}

#[test]
fn test_audit_collects_every_violation() {
    let c = check();
    let rules = Rules::record([
        ("name", Rules::leaf(&c.is()[Name::NonEmptyString])),
        ("age", Rules::leaf(&c.is()[Name::Integer])),
        ("nick", Rules::leaf(&c.maybe()[Name::NonEmptyString])),
    ]);

    assert_success!(audit(&data(json!({ "name": "ada", "age": 36 })), &rules));

    let result = audit(&data(json!({ "name": "", "age": 36.5 })), &rules);
    assert_failure!(result.clone());
    let Validation::Failure(violations) = result else {
        unreachable!()
    };
    let rendered: Vec<String> = violations.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            r#"name: assert failed: expected "" to be non-empty string"#,
            "age: assert failed: expected 36.5 to be integer",
        ]
    );
}
