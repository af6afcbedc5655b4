//! Object-graph serializer
//!
//! Persists arbitrary values with bincode. Engine-native values (`Bytes`,
//! `Timestamp`) and any `serde`-enabled engine type survive the round trip.
//!
//! ## Wire shapes
//!
//! | Shape   | Bytes                                      | Written by      |
//! |---------|--------------------------------------------|-----------------|
//! | current | raw bincode output                         | `serialize`     |
//! | legacy  | base64 (standard alphabet, padded) of that | older releases  |
//!
//! The shape is a property of the bytes. `deserialize` tries the current
//! shape first and only unwraps base64 if that fails. When both attempts
//! fail the error reported is the one from the direct decode.

use crate::config::SerializerConfig;
use crate::error::{Result, SerializerError};
use crate::nesting;
use crate::traits::{Serializer, SerializerKind};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bincode::Options;
use flowresult_core::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

const CODEC: &str = SerializerKind::Object.as_str();

/// Check run on a candidate payload before bincode sees it.
type Precheck = fn(&[u8]) -> std::result::Result<(), String>;

/// Serializer for arbitrary in-process values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectSerializer {
    max_decode_bytes: Option<u64>,
}

impl ObjectSerializer {
    /// Serializer with no decode size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializer that refuses to decode payloads larger than `limit` bytes.
    ///
    /// The limit applies to the object-codec payload itself, so a legacy
    /// payload is measured after base64 unwrapping.
    pub fn with_max_decode_bytes(limit: u64) -> Self {
        ObjectSerializer {
            max_decode_bytes: Some(limit),
        }
    }

    /// Configured decode limit, if any.
    pub fn max_decode_bytes(&self) -> Option<u64> {
        self.max_decode_bytes
    }

    /// Encode any serde value in the current (unwrapped) shape.
    pub fn serialize_typed<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        codec()
            .serialize(value)
            .map_err(|e| SerializerError::encode(e.to_string(), CODEC))
    }

    /// Decode any serde value, accepting both current and legacy shapes.
    ///
    /// Nesting depth is only bounded for `Value`; deeply recursive typed
    /// values are decoded as-is.
    pub fn deserialize_typed<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        self.decode(data, |_| Ok(()))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8], precheck: Precheck) -> Result<T> {
        let primary = match self.decode_direct(data, precheck) {
            Ok(value) => return Ok(value),
            Err(detail) => detail,
        };

        trace!(data_len = data.len(), error = %primary, "direct decode failed, trying legacy base64 shape");

        match self.decode_legacy(data, precheck) {
            Some(value) => {
                debug!(data_len = data.len(), "decoded legacy base64-wrapped payload");
                Ok(value)
            }
            None => Err(SerializerError::decode(primary, CODEC, data.len())),
        }
    }

    fn decode_direct<T: DeserializeOwned>(
        &self,
        data: &[u8],
        precheck: Precheck,
    ) -> std::result::Result<T, String> {
        if let Some(limit) = self.max_decode_bytes {
            if data.len() as u64 > limit {
                return Err(format!(
                    "payload of {} bytes exceeds max_decode_bytes {}",
                    data.len(),
                    limit
                ));
            }
        }
        precheck(data)?;
        codec().deserialize(data).map_err(|e| e.to_string())
    }

    // Any failure here is discarded in favour of the primary error.
    fn decode_legacy<T: DeserializeOwned>(&self, data: &[u8], precheck: Precheck) -> Option<T> {
        if let Some(limit) = self.max_decode_bytes {
            if base64::decoded_len_estimate(data.len()) as u64 > limit {
                return None;
            }
        }
        let unwrapped = BASE64.decode(data).ok()?;
        self.decode_direct(&unwrapped, precheck).ok()
    }
}

// Fixed-width little-endian integers; byte-compatible with `bincode::serialize`.
// `DefaultOptions` rejects trailing bytes on decode.
fn codec() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

impl Serializer for ObjectSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>> {
        self.serialize_typed(value)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value> {
        self.decode(data, nesting::check_value_depth)
    }

    fn kind(&self) -> SerializerKind {
        SerializerKind::Object
    }

    fn descriptor(&self) -> SerializerConfig {
        SerializerConfig::Object {
            max_decode_bytes: self.max_decode_bytes,
        }
    }
}
