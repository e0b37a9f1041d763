//! Serde support for [`Value`] (feature-gated)
//!
//! Serialization follows JSON conventions: `Undefined` and non-finite
//! numbers become `null`, sets serialize as sequences, maps as maps with
//! rendered keys, dates as their time value and everything without a JSON
//! form (regexps, symbols, functions) as its rendered name. Deserialization
//! goes through [`serde_json::Value`], so records keep document order.
//!
//! ```rust
//! use stillwater_check::value::{Object, Value};
//!
//! let value = Value::object(
//!     Object::new()
//!         .with("n", 1)
//!         .with("tags", Value::set(vec!["a".into(), "b".into()]))
//!         .with("missing", Value::Undefined),
//! );
//! let json = serde_json::to_string(&value).unwrap();
//! assert_eq!(json, r#"{"n":1,"tags":["a","b"],"missing":null}"#);
//! ```

use super::{render, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries.iter() {
                    match key {
                        Value::String(s) => map.serialize_entry(s, value)?,
                        other => map.serialize_entry(&render(other), value)?,
                    }
                }
                map.end()
            }
            Value::Date(date) => serialize_number(date.time(), serializer),
            Value::Symbol(_) | Value::RegExp(_) | Value::Function(_) => {
                serializer.serialize_str(&render(self))
            }
        }
    }
}

fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !n.is_finite() {
        serializer.serialize_unit()
    } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}
