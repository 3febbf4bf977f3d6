use crate::{CocError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded JSON object returned by a lookup.
///
/// Fields are read by name, or by a dotted path such as `"clan.tag"` for nested
/// objects. A missing field is `None` from the `get*` accessors and a
/// [`CocError::MissingField`] from the `require*` ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupResult {
    fields: Map<String, Value>,
}

impl LookupResult {
    /// Wraps a JSON value. Only objects are accepted.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Looks up a field by dotted path. Numeric segments index into arrays.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    pub fn get_array(&self, path: &str) -> Option<&Vec<Value>> {
        self.get(path).and_then(Value::as_array)
    }

    /// Nested object at `path` as its own result.
    pub fn get_object(&self, path: &str) -> Option<LookupResult> {
        self.get(path).cloned().and_then(Self::from_value)
    }

    pub fn require(&self, path: &str) -> Result<&Value> {
        self.get(path).ok_or_else(|| CocError::missing_field(path))
    }

    pub fn require_str(&self, path: &str) -> Result<&str> {
        self.get_str(path).ok_or_else(|| CocError::missing_field(path))
    }

    /// Converts the payload into a caller-defined typed shape.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| CocError::decode(e.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
