//! Serializer error types
//!
//! Every failure a serializer can report is one of:
//! - `Encode`: the value is not representable by the chosen serializer
//! - `Decode`: the bytes are not a valid encoding for the chosen serializer
//! - `Config` / `Io`: a serializer could not be built from configuration
//!
//! Serializers never retry. The caller decides whether to fall back to a
//! different serializer.

use std::io;
use thiserror::Error;

/// Result type alias for serializer operations
pub type Result<T> = std::result::Result<T, SerializerError>;

/// Serializer errors.
#[derive(Debug, Error)]
pub enum SerializerError {
    /// The value cannot be represented by this serializer.
    #[error("Encode error (codec={codec}): {detail}")]
    Encode {
        /// Human-readable error description from the codec
        detail: String,
        /// Codec that rejected the value
        codec: &'static str,
    },

    /// The bytes are not a valid encoding.
    ///
    /// `detail` always carries the diagnostic of the codec named by `codec`,
    /// never that of an internal compatibility fallback.
    #[error("Decode error (codec={codec}, data_len={data_len}): {detail}")]
    Decode {
        /// Human-readable error description from the codec
        detail: String,
        /// Codec whose decode attempt produced `detail`
        codec: &'static str,
        /// Length of the data that failed to decode
        data_len: usize,
    },

    /// Serializer configuration is invalid.
    #[error("Invalid serializer config: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SerializerError {
    /// Create an encode error.
    pub fn encode(detail: impl Into<String>, codec: &'static str) -> Self {
        SerializerError::Encode {
            detail: detail.into(),
            codec,
        }
    }

    /// Create a decode error with full diagnostic context.
    pub fn decode(detail: impl Into<String>, codec: &'static str, data_len: usize) -> Self {
        SerializerError::Decode {
            detail: detail.into(),
            codec,
            data_len,
        }
    }

    /// Create a configuration error.
    pub fn config(detail: impl Into<String>) -> Self {
        SerializerError::Config(detail.into())
    }

    /// Returns `true` for `Encode` errors.
    pub fn is_encode(&self) -> bool {
        matches!(self, SerializerError::Encode { .. })
    }

    /// Returns `true` for `Decode` errors.
    pub fn is_decode(&self) -> bool {
        matches!(self, SerializerError::Decode { .. })
    }

    /// Codec name for `Encode`/`Decode` errors.
    pub fn codec(&self) -> Option<&'static str> {
        match self {
            SerializerError::Encode { codec, .. } | SerializerError::Decode { codec, .. } => {
                Some(codec)
            }
            _ => None,
        }
    }
}
