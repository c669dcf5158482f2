//! Untyped check result metadata
//!
//! The check-execution service returns a free-form JSON object whose keys
//! depend on the check type. `CheckMetadata` wraps that object and only
//! exposes lookups that return `Option`, so every field read has an explicit
//! absent path and a type mismatch never becomes an error.

use serde::Serialize;
use serde_json::{Map, Value};

/// Read-only metadata mapping attached to a check result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CheckMetadata(Map<String, Value>);

impl CheckMetadata {
    /// Wrap an existing JSON object.
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the key is present (regardless of its value).
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether any of the keys is present.
    pub fn contains_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.contains(key))
    }

    /// String value, only when the field actually holds a JSON string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Numeric value; numeric strings such as `"12.5"` are accepted.
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(value_as_f64)
    }

    /// Non-negative integer value; fractional numbers are truncated.
    pub fn u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(value_as_u64)
    }

    /// Array value.
    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Nested object value.
    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    /// String form of any present, non-null value.
    pub fn display(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_null()).map(value_to_display)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for CheckMetadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for CheckMetadata {
    /// Objects are taken as-is, `null` becomes an empty mapping, and any other
    /// value is kept under a single `value` key so it still renders.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            Value::Null => Self::default(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                Self(map)
            }
        }
    }
}

/// Numeric view of a JSON value, accepting numeric strings.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Non-negative integer view of a JSON value.
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Human-readable string form of a JSON value.
///
/// Strings are shown without quotes; arrays and objects fall back to compact
/// JSON.
pub fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// String form of a field inside a nested record, if the record is an object
/// and the field is present and non-null.
pub fn field_display(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .filter(|v| !v.is_null())
        .map(value_to_display)
}

/// First present field among `keys` in a nested record.
pub fn first_field(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| field_display(record, key))
}
