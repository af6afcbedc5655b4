//! Serializer trait definitions.

use crate::config::SerializerConfig;
use crate::error::Result;
use flowresult_core::Value;
use std::fmt;

/// Result serializer trait.
///
/// Every task result that leaves the process goes through a serializer.
/// Callers hold `dyn Serializer` and never a concrete kind, so formats can be
/// added without touching call sites.
///
/// # Thread Safety
///
/// Serializers are immutable configuration values and must be `Send + Sync`
/// so one instance can be shared across workers without locking.
///
/// # Equality
///
/// Two serializers are equal iff their [`descriptor`](Serializer::descriptor)s
/// are equal: same kind, same configuration. Serializers are routinely
/// rebuilt from configuration, so identity is never compared.
pub trait Serializer: Send + Sync + fmt::Debug {
    /// Encode a value into bytes.
    ///
    /// Fails with `SerializerError::Encode` if the value is outside this
    /// serializer's representable domain.
    fn serialize(&self, value: &Value) -> Result<Vec<u8>>;

    /// Decode bytes produced by [`serialize`](Serializer::serialize) (or by
    /// an older release of the same serializer kind).
    ///
    /// Fails with `SerializerError::Decode` if the bytes are not a valid
    /// encoding.
    fn deserialize(&self, data: &[u8]) -> Result<Value>;

    /// Serializer kind.
    fn kind(&self) -> SerializerKind;

    /// Configuration that rebuilds an equal serializer.
    fn descriptor(&self) -> SerializerConfig;
}

impl PartialEq for dyn Serializer {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor() == other.descriptor()
    }
}

impl Eq for dyn Serializer {}

/// Serializer kinds known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializerKind {
    /// General object-graph codec with legacy base64 support
    Object,
    /// JSON text
    StructuredText,
    /// zstd compression around another serializer
    Compressed,
}

impl SerializerKind {
    /// Stable identifier, also used as the codec name in errors.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SerializerKind::Object => "object",
            SerializerKind::StructuredText => "json",
            SerializerKind::Compressed => "compressed",
        }
    }
}

impl fmt::Display for SerializerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
