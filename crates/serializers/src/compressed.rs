//! zstd compression around another serializer.

use crate::config::SerializerConfig;
use crate::error::{Result, SerializerError};
use crate::traits::{Serializer, SerializerKind};
use flowresult_core::Value;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

const CODEC: &str = SerializerKind::Compressed.as_str();

/// Default zstd compression level.
pub const DEFAULT_LEVEL: i32 = 3;

/// Compresses the output of an inner serializer.
///
/// Inner encode/decode errors pass through unchanged, so a failure still
/// names the codec that actually rejected the value. When the inner
/// serializer has a decode limit, decompression stops at that limit.
#[derive(Clone)]
pub struct CompressedSerializer {
    inner: Arc<dyn Serializer>,
    level: i32,
}

impl fmt::Debug for CompressedSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedSerializer")
            .field("inner", &self.inner)
            .field("level", &self.level)
            .finish()
    }
}

impl PartialEq for CompressedSerializer {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && *self.inner == *other.inner
    }
}

impl Eq for CompressedSerializer {}

impl CompressedSerializer {
    /// Wrap `inner` at [`DEFAULT_LEVEL`].
    pub fn wrap(inner: impl Serializer + 'static) -> Result<Self> {
        Self::new(Arc::new(inner), DEFAULT_LEVEL)
    }

    /// Wrap `inner` at an explicit zstd level.
    ///
    /// Fails if `level` is outside zstd's supported range or `inner` is
    /// itself compressed.
    pub fn new(inner: Arc<dyn Serializer>, level: i32) -> Result<Self> {
        validate_level(level)?;
        if inner.kind() == SerializerKind::Compressed {
            return Err(SerializerError::config(
                "compressed serializer cannot wrap another compressed serializer",
            ));
        }
        Ok(CompressedSerializer { inner, level })
    }

    /// Wrapped serializer.
    pub fn inner(&self) -> &dyn Serializer {
        self.inner.as_ref()
    }

    /// zstd compression level.
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Largest decompressed payload the inner serializer accepts.
    fn decompressed_limit(&self) -> Option<u64> {
        match self.inner.descriptor() {
            SerializerConfig::Object { max_decode_bytes } => max_decode_bytes,
            _ => None,
        }
    }

    fn decompress(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut decoder = zstd::stream::Decoder::new(data)?;
        let mut raw = Vec::new();
        match self.decompressed_limit() {
            Some(limit) => {
                (&mut decoder)
                    .take(limit.saturating_add(1))
                    .read_to_end(&mut raw)?;
                if raw.len() as u64 > limit {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("decompressed payload exceeds max_decode_bytes {}", limit),
                    ));
                }
            }
            None => {
                decoder.read_to_end(&mut raw)?;
            }
        }
        Ok(raw)
    }
}

pub(crate) fn validate_level(level: i32) -> Result<()> {
    let range = zstd::compression_level_range();
    if range.contains(&level) {
        Ok(())
    } else {
        Err(SerializerError::config(format!(
            "zstd level {} outside {}..={}",
            level,
            range.start(),
            range.end()
        )))
    }
}

impl Serializer for CompressedSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>> {
        let raw = self.inner.serialize(value)?;
        zstd::encode_all(raw.as_slice(), self.level)
            .map_err(|e| SerializerError::encode(e.to_string(), CODEC))
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value> {
        let raw = self
            .decompress(data)
            .map_err(|e| SerializerError::decode(e.to_string(), CODEC, data.len()))?;
        self.inner.deserialize(&raw)
    }

    fn kind(&self) -> SerializerKind {
        SerializerKind::Compressed
    }

    fn descriptor(&self) -> SerializerConfig {
        SerializerConfig::Compressed {
            level: self.level,
            inner: Box::new(self.inner.descriptor()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonSerializer, ObjectSerializer};
    use flowresult_core::Timestamp;

    #[test]
    fn test_roundtrip_object_inner() {
        let serializer = CompressedSerializer::wrap(ObjectSerializer::new()).unwrap();
        let value = Value::Array(vec![
            Value::from("abc".repeat(100)),
            Value::from(Timestamp::from_secs(12)),
        ]);

        let bytes = serializer.serialize(&value).unwrap();
        assert!(bytes.len() < 300);
        assert_eq!(serializer.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn test_inner_encode_error_passes_through() {
        let serializer = CompressedSerializer::wrap(JsonSerializer::new()).unwrap();
        let err = serializer.serialize(&Value::Bytes(vec![1])).unwrap_err();
        assert_eq!(err.codec(), Some("json"));
    }

    #[test]
    fn test_uncompressed_input_is_decode_error() {
        let serializer = CompressedSerializer::wrap(JsonSerializer::new()).unwrap();
        let err = serializer.deserialize(br#"["abc",123]"#).unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.codec(), Some("compressed"));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = CompressedSerializer::new(Arc::new(JsonSerializer::new()), 1000).unwrap_err();
        assert!(matches!(err, SerializerError::Config(_)));
    }

    #[test]
    fn test_nested_compression_rejected() {
        let once = CompressedSerializer::wrap(JsonSerializer::new()).unwrap();
        let err = CompressedSerializer::wrap(once).unwrap_err();
        assert!(matches!(err, SerializerError::Config(_)));
    }

    #[test]
    fn test_equality() {
        let a = CompressedSerializer::wrap(ObjectSerializer::new()).unwrap();
        let b = CompressedSerializer::wrap(ObjectSerializer::new()).unwrap();
        let c = CompressedSerializer::wrap(JsonSerializer::new()).unwrap();
        let d = CompressedSerializer::new(Arc::new(ObjectSerializer::new()), 9).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_accessors() {
        let serializer =
            CompressedSerializer::new(Arc::new(ObjectSerializer::with_max_decode_bytes(10)), 9)
                .unwrap();
        assert_eq!(serializer.level(), 9);
        assert_eq!(serializer.inner().kind(), SerializerKind::Object);
        assert_eq!(
            serializer.inner().descriptor(),
            ObjectSerializer::with_max_decode_bytes(10).descriptor()
        );
        assert_eq!(
            CompressedSerializer::wrap(JsonSerializer::new())
                .unwrap()
                .level(),
            DEFAULT_LEVEL
        );
    }

    #[test]
    fn test_decompression_stops_at_inner_limit() {
        // 16 MiB of zeros compresses to a few hundred bytes
        let bomb = zstd::encode_all(&vec![0u8; 16 << 20][..], 3).unwrap();
        assert!(bomb.len() < 4096);

        let serializer =
            CompressedSerializer::wrap(ObjectSerializer::with_max_decode_bytes(1024)).unwrap();
        let err = serializer.deserialize(&bomb).unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.codec(), Some("compressed"));
        assert!(err
            .to_string()
            .contains("decompressed payload exceeds max_decode_bytes 1024"));
    }

    #[test]
    fn test_payload_within_inner_limit_decodes() {
        let value = Value::from("z".repeat(500));
        let serializer =
            CompressedSerializer::wrap(ObjectSerializer::with_max_decode_bytes(1024)).unwrap();
        let bytes = serializer.serialize(&value).unwrap();
        assert_eq!(serializer.deserialize(&bytes).unwrap(), value);
    }
}
