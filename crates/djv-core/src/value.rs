//! # JSON Value Model Adapter
//!
//! The compiler and the engine read both schema text and documents through
//! `serde_json::Value`. This module narrows that model to the handful of
//! operations they need: a type tag per value, lookup of a field relative
//! to an enclosing value, and lenient typed accessors with defaults.
//!
//! A JSON `null` is reported by [`observe`] as absent. The DSL has no null
//! type, so a `null` field is treated the same as a missing one.

use std::fmt;

use serde_json::Value;

/// Type tag of an observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// No value at the looked-up position.
    Absent,
    /// JSON `null`.
    Null,
    /// Number representable as `i64` or `u64`.
    Int,
    /// Any other number.
    Float,
    /// JSON string.
    String,
    /// `true` or `false`.
    Bool,
    /// JSON object.
    Object,
    /// JSON array.
    Array,
}

impl JsonType {
    /// Tag an optional value; `None` is [`JsonType::Absent`].
    pub fn of(value: Option<&Value>) -> Self {
        value.map_or(JsonType::Absent, json_type)
    }

    /// Lowercase tag used in diagnostics. Absent renders as `""`.
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::Absent => "",
            JsonType::Null => "null",
            JsonType::Int => "int",
            JsonType::Float => "float",
            JsonType::String => "string",
            JsonType::Bool => "bool",
            JsonType::Object => "object",
            JsonType::Array => "array",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonType::Absent => f.write_str("absent"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Returns the type tag of a value. Numbers representable as `i64` or
/// `u64` are integers; every other number is a float.
pub fn json_type(value: &Value) -> JsonType {
    match value {
        Value::Null => JsonType::Null,
        Value::Bool(_) => JsonType::Bool,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                JsonType::Int
            } else {
                JsonType::Float
            }
        }
        Value::String(_) => JsonType::String,
        Value::Array(_) => JsonType::Array,
        Value::Object(_) => JsonType::Object,
    }
}

/// Look up `name` inside `scope`, or return `scope` itself when `name` is
/// `None`. A non-object scope has no fields.
pub fn lookup<'a>(scope: &'a Value, name: Option<&str>) -> Option<&'a Value> {
    match name {
        None => Some(scope),
        Some(key) => scope.as_object().and_then(|map| map.get(key)),
    }
}

/// Like [`lookup`], but a `null` at the looked-up position is absent.
pub fn observe<'a>(scope: &'a Value, name: Option<&str>) -> Option<&'a Value> {
    lookup(scope, name).filter(|v| !v.is_null())
}

/// Integer value of an observed number, widened so `u64` values above
/// `i64::MAX` still compare correctly against `i64` bounds.
pub fn as_wide_int(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

/// Number of characters (not bytes) in a string value.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Read `key` from a schema object as an integer, falling back to
/// `default`. Floats are truncated toward zero, saturating at the `i64`
/// range; non-numeric values yield the default.
pub fn int_field(obj: &Value, key: &str, default: i64) -> i64 {
    let Some(v) = obj.get(key) else {
        return default;
    };
    if let Some(i) = v.as_i64() {
        i
    } else if v.is_u64() {
        i64::MAX
    } else if let Some(f) = v.as_f64() {
        f as i64
    } else {
        default
    }
}

/// Read `key` from a schema object as a float, falling back to `default`.
pub fn float_field(obj: &Value, key: &str, default: f64) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Read `key` from a schema object as a string slice.
pub fn str_field<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Read `key` from a schema object as a bool, falling back to `default`.
pub fn bool_field(obj: &Value, key: &str, default: bool) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Whether `key` holds an integer-typed number.
pub fn is_int_field(obj: &Value, key: &str) -> bool {
    obj.get(key).map(json_type) == Some(JsonType::Int)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_tags() {
        assert_eq!(json_type(&json!(1)), JsonType::Int);
        assert_eq!(json_type(&json!(u64::MAX)), JsonType::Int);
        assert_eq!(json_type(&json!(1.5)), JsonType::Float);
        assert_eq!(json_type(&json!(1.0)), JsonType::Float);
        assert_eq!(json_type(&json!("x")), JsonType::String);
        assert_eq!(json_type(&json!(true)), JsonType::Bool);
        assert_eq!(json_type(&json!({})), JsonType::Object);
        assert_eq!(json_type(&json!([])), JsonType::Array);
        assert_eq!(json_type(&Value::Null), JsonType::Null);
        assert_eq!(JsonType::of(None), JsonType::Absent);
        assert_eq!(JsonType::Absent.as_str(), "");
    }

    #[test]
    fn test_lookup_and_observe() {
        let doc = json!({"a": 1, "n": null});
        assert_eq!(lookup(&doc, Some("a")), Some(&json!(1)));
        assert_eq!(lookup(&doc, Some("missing")), None);
        assert_eq!(lookup(&doc, None), Some(&doc));
        assert_eq!(lookup(&doc, Some("n")), Some(&Value::Null));
        assert_eq!(observe(&doc, Some("n")), None);

        // Scalars have no fields.
        assert_eq!(lookup(&json!("text"), Some("a")), None);
    }

    #[test]
    fn test_int_field_defaults_and_coercion() {
        let obj = json!({"min": 3, "max": 7.9, "big": u64::MAX, "s": "9"});
        assert_eq!(int_field(&obj, "min", 0), 3);
        assert_eq!(int_field(&obj, "max", 0), 7);
        assert_eq!(int_field(&obj, "big", 0), i64::MAX);
        assert_eq!(int_field(&obj, "s", -1), -1);
        assert_eq!(int_field(&obj, "absent", 42), 42);
    }

    #[test]
    fn test_float_bool_str_fields() {
        let obj = json!({"f": 2, "b": true, "t": "INT", "nb": "yes"});
        assert_eq!(float_field(&obj, "f", 0.0), 2.0);
        assert_eq!(float_field(&obj, "absent", -1.5), -1.5);
        assert!(bool_field(&obj, "b", false));
        assert!(!bool_field(&obj, "nb", false));
        assert_eq!(str_field(&obj, "t"), Some("INT"));
        assert_eq!(str_field(&obj, "b"), None);
        assert!(is_int_field(&json!({"size": 4}), "size"));
        assert!(!is_int_field(&json!({"size": 4.5}), "size"));
    }

    #[test]
    fn test_wide_int_and_char_len() {
        assert_eq!(as_wide_int(&json!(-5)), Some(-5));
        assert_eq!(as_wide_int(&json!(u64::MAX)), Some(u64::MAX as i128));
        assert_eq!(as_wide_int(&json!(1.5)), None);
        assert_eq!(char_len("삼색이"), 3);
        assert_eq!(char_len(""), 0);
    }
}
