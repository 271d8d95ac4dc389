//! Loosely typed access to one raw body record.
//!
//! The crowd-sourced file is hand-edited JSON with no casing discipline in
//! its keys. [`RawRecord`] lowercases every key once at construction so the
//! normalizer can look fields up case-insensitively without re-scanning the
//! map, and nothing downstream of the normalizer ever touches raw JSON.

use serde_json::Value;
use std::collections::HashMap;

/// One raw celestial-body record with case-insensitive field access.
#[derive(Debug, Default)]
pub struct RawRecord {
    fields: HashMap<String, Value>,
}

impl RawRecord {
    /// Build a record from a raw JSON value. Non-object values produce an
    /// empty record; every lookup on it reports the field as missing.
    pub fn from_value(value: &Value) -> Self {
        let fields = match value.as_object() {
            Some(map) => map
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone()))
                .collect(),
            None => HashMap::new(),
        };
        Self { fields }
    }

    /// Scalar field as text. Strings are returned verbatim; numbers and
    /// booleans are rendered to their JSON text so a `"3"` and a `3` parse
    /// the same way downstream.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// List field as text entries. A missing field or a non-array value is
    /// an empty list; non-scalar array entries are skipped.
    pub fn texts(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
