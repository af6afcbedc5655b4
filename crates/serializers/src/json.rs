//! Structured-text (JSON) serializer.
//!
//! Output is exactly `serde_json`'s compact rendering: no whitespace, object
//! keys in map order. There is one wire shape and no legacy mode.
//!
//! Only JSON-safe values are accepted. `Bytes`, `Timestamp` and non-finite
//! floats are rejected at encode time rather than silently coerced.

use crate::config::SerializerConfig;
use crate::error::{Result, SerializerError};
use crate::traits::{Serializer, SerializerKind};
use flowresult_core::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

const CODEC: &str = SerializerKind::StructuredText.as_str();

/// Serializer restricted to JSON-representable values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Create a JSON serializer.
    pub fn new() -> Self {
        JsonSerializer
    }

    /// Encode any serde value as compact JSON.
    ///
    /// Types serde_json cannot render (maps with non-string keys, for
    /// example) fail with an encode error.
    pub fn serialize_typed<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| SerializerError::encode(e.to_string(), CODEC))
    }

    /// Decode any serde value from JSON text.
    pub fn deserialize_typed<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_json::from_slice(data)
            .map_err(|e| SerializerError::decode(e.to_string(), CODEC, data.len()))
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>> {
        let json = value_to_json(value)?;
        self.serialize_typed(&json)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value> {
        self.deserialize_typed::<JsonValue>(data).map(Value::from)
    }

    fn kind(&self) -> SerializerKind {
        SerializerKind::StructuredText
    }

    fn descriptor(&self) -> SerializerConfig {
        SerializerConfig::Json
    }
}

/// Convert a Value to a JSON value, rejecting anything without a plain
/// JSON representation.
pub fn value_to_json(value: &Value) -> Result<JsonValue> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Int(i) => Ok(JsonValue::Number((*i).into())),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or_else(|| {
                SerializerError::encode(format!("float {f} is not JSON compliant"), CODEC)
            }),
        Value::String(s) => Ok(JsonValue::String(s.clone())),
        Value::Bytes(_) | Value::Timestamp(_) => Err(SerializerError::encode(
            format!("value of type {} is not JSON serializable", value.type_name()),
            CODEC,
        )),
        Value::Array(items) => items
            .iter()
            .map(value_to_json)
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| value_to_json(v).map(|json| (k.clone(), json)))
            .collect::<Result<serde_json::Map<_, _>>>()
            .map(JsonValue::Object),
    }
}
