use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::canonicalizer::{CanonicalizationError, Path};

/// Key-ordered map of values. Iteration order never depends on insertion order.
pub type ValueMap = BTreeMap<String, Value>;

/// JSON-like value carried in request parameters and result data.
///
/// `null` is deliberately not a member: decoding a JSON `null` into a
/// [`Value`] fails, and so does converting one from a `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Exact integer number.
    Int(i64),
    /// Exact integer above `i64::MAX`. Smaller integers are always `Int`.
    UInt(u64),
    /// Floating point number. Must be finite to be canonicalized.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Key-ordered mapping.
    Object(ValueMap),
}

impl Value {
    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer that fits `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(i) => u64::try_from(*i).ok(),
            Value::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Returns any number as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Looks up a key when this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Converts into a `serde_json::Value`, rejecting non-finite floats.
    pub fn to_json(&self) -> Result<serde_json::Value, CanonicalizationError> {
        self.to_json_at(&Path::root())
    }

    pub(crate) fn to_json_at(&self, path: &Path) -> Result<serde_json::Value, CanonicalizationError> {
        Ok(match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::UInt(u) => serde_json::Value::from(*u),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| CanonicalizationError::NonFiniteNumber(path.to_string()))?,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| item.to_json_at(&path.push_index(idx)))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => serde_json::Value::Object(map_to_json(map, path)?),
        })
    }

    /// Converts from a `serde_json::Value`, rejecting `null` anywhere in the tree.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CanonicalizationError> {
        Self::from_json_at(value, &Path::root())
    }

    fn from_json_at(value: &serde_json::Value, path: &Path) -> Result<Self, CanonicalizationError> {
        Ok(match value {
            serde_json::Value::Null => {
                return Err(CanonicalizationError::Unsupported(path.to_string()))
            }
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::UInt(u),
                (None, None) => Value::Float(
                    n.as_f64()
                        .ok_or_else(|| CanonicalizationError::Unsupported(path.to_string()))?,
                ),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| Self::from_json_at(item, &path.push_index(idx)))
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), Self::from_json_at(v, &path.push_field(k))?)))
                    .collect::<Result<_, CanonicalizationError>>()?,
            ),
        })
    }
}

pub(crate) fn map_to_json(
    map: &ValueMap,
    path: &Path,
) -> Result<serde_json::Map<String, serde_json::Value>, CanonicalizationError> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), v.to_json_at(&path.push_field(k))?)))
        .collect()
}

impl TryFrom<serde_json::Value> for Value {
    type Error = CanonicalizationError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Value::from_json(&value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::UInt(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Object(value)
    }
}
