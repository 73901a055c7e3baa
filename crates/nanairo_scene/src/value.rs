//! Dynamic property values
//!
//! The editor front end binds widgets to scene fields by token. This module
//! provides the untyped view it works on: a [`Value`] tree whose nested
//! objects are shared handles, so that copying a container keeps pointing at
//! the same nested objects until they are explicitly deep copied.

use parking_lot::RwLock;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::SceneError;
use crate::validation::ValidationError;

/// Key/value container keyed by scene tokens
pub type PropertyMap = BTreeMap<String, Value>;

/// Nested object shared between shallow copies
pub type SharedMap = Arc<RwLock<PropertyMap>>;

/// A dynamic value that can represent any scene field
#[derive(Debug, Clone)]
pub enum Value {
    /// Null/None value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Unsigned integer too large for `Int`
    UInt(u64),
    /// Floating point value
    Float(f64),
    /// String value, also used for relative file paths
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Nested object. Cloning the value clones the handle, not the map.
    Object(SharedMap),
}

impl Value {
    /// Create a null value
    pub fn null() -> Self {
        Self::Null
    }

    /// Wrap a map into a new shared object
    pub fn object(map: PropertyMap) -> Self {
        Self::Object(Arc::new(RwLock::new(map)))
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as u64
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Int(i) => u64::try_from(*i).ok(),
            Self::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::UInt(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get as vec3
    pub fn as_vec3(&self) -> Option<[f64; 3]> {
        match self {
            Self::Array(arr) if arr.len() == 3 => {
                Some([arr[0].as_float()?, arr[1].as_float()?, arr[2].as_float()?])
            }
            _ => None,
        }
    }

    /// Try to get the shared object handle
    pub fn as_object(&self) -> Option<&SharedMap> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a field from an object value
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_object()?.read().get(key).cloned()
    }

    /// Set a field on an object value.
    ///
    /// Visible through every handle to the same object.
    pub fn set(&self, key: impl Into<String>, value: Value) -> Option<()> {
        self.as_object()?.write().insert(key.into(), value);
        Some(())
    }

    /// Whether two values refer to the same nested object
    pub fn shares_object_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Copy the value with all nested objects duplicated
    pub fn deep_copy(&self) -> Value {
        match self {
            Self::Array(arr) => Self::Array(arr.iter().map(Value::deep_copy).collect()),
            Self::Object(o) => {
                let map = o
                    .read()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_copy()))
                    .collect();
                Self::object(map)
            }
            other => other.clone(),
        }
    }

    /// Convert to a plain JSON value.
    ///
    /// JSON has no NaN or infinity; a non-finite float is reported as a
    /// schema violation at its key path.
    pub fn to_json(&self) -> crate::error::Result<serde_json::Value> {
        self.to_json_at("")
    }

    fn to_json_at(&self, path: &str) -> crate::error::Result<serde_json::Value> {
        let json = match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::UInt(u) => serde_json::Value::from(*u),
            Self::Float(f) => match serde_json::Number::from_f64(*f) {
                Some(n) => serde_json::Value::Number(n),
                None => {
                    return Err(SceneError::Validation(ValidationError::SchemaViolation {
                        path: path.to_string(),
                        message: format!("{} is not a finite number", f),
                    }))
                }
            },
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(arr) => serde_json::Value::Array(
                arr.iter()
                    .enumerate()
                    .map(|(i, v)| v.to_json_at(&format!("{}[{}]", path, i)))
                    .collect::<crate::error::Result<Vec<_>>>()?,
            ),
            Self::Object(o) => serde_json::Value::Object(
                o.read()
                    .iter()
                    .map(|(k, v)| {
                        let field = if path.is_empty() {
                            k.clone()
                        } else {
                            format!("{}.{}", path, k)
                        };
                        Ok((k.clone(), v.to_json_at(&field)?))
                    })
                    .collect::<crate::error::Result<serde_json::Map<_, _>>>()?,
            ),
        };
        Ok(json)
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b) || *a.read() == *b.read(),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(arr) => Self::Array(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Self::object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::UInt(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(o) => {
                let map = o.read();
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Self::Int(i),
            Err(_) => Self::UInt(v),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<[f64; 3]> for Value {
    fn from(v: [f64; 3]) -> Self {
        Self::Array(v.iter().map(|x| Self::Float(*x)).collect())
    }
}

impl From<PropertyMap> for Value {
    fn from(v: PropertyMap) -> Self {
        Self::object(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
