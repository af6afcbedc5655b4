//! Serializer configuration via TOML
//!
//! Serializers are not kept as singletons. Components that persist results
//! store a `SerializerConfig` and rebuild the serializer on demand; the
//! rebuilt serializer compares equal to the original.
//!
//! ```toml
//! type = "compressed"
//! level = 3
//!
//! [inner]
//! type = "object"
//! ```

use crate::compressed::{validate_level, CompressedSerializer, DEFAULT_LEVEL};
use crate::error::{Result, SerializerError};
use crate::json::JsonSerializer;
use crate::object::ObjectSerializer;
use crate::traits::Serializer;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Config file name conventionally used for result serializer settings.
pub const CONFIG_FILE_NAME: &str = "serializer.toml";

/// Serializer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SerializerConfig {
    /// Object-graph serializer
    Object {
        /// Refuse to decode payloads larger than this many bytes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_decode_bytes: Option<u64>,
    },
    /// JSON serializer
    Json,
    /// zstd around another serializer
    Compressed {
        /// zstd level (default: 3)
        #[serde(default = "default_level")]
        level: i32,
        /// Wrapped serializer
        inner: Box<SerializerConfig>,
    },
}

fn default_level() -> i32 {
    DEFAULT_LEVEL
}

impl Default for SerializerConfig {
    fn default() -> Self {
        SerializerConfig::Object {
            max_decode_bytes: None,
        }
    }
}

impl SerializerConfig {
    /// Check level ranges and nesting without building anything.
    pub fn validate(&self) -> Result<()> {
        match self {
            SerializerConfig::Object { .. } | SerializerConfig::Json => Ok(()),
            SerializerConfig::Compressed { level, inner } => {
                validate_level(*level)?;
                if matches!(**inner, SerializerConfig::Compressed { .. }) {
                    return Err(SerializerError::config(
                        "compressed serializer cannot wrap another compressed serializer",
                    ));
                }
                inner.validate()
            }
        }
    }

    /// Build the serializer this configuration describes.
    pub fn build(&self) -> Result<Box<dyn Serializer>> {
        match self {
            SerializerConfig::Object { max_decode_bytes } => Ok(Box::new(match max_decode_bytes {
                Some(limit) => ObjectSerializer::with_max_decode_bytes(*limit),
                None => ObjectSerializer::new(),
            })),
            SerializerConfig::Json => Ok(Box::new(JsonSerializer::new())),
            SerializerConfig::Compressed { level, inner } => {
                let inner: Arc<dyn Serializer> = Arc::from(inner.build()?);
                Ok(Box::new(CompressedSerializer::new(inner, *level)?))
            }
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SerializerConfig = toml::from_str(content)
            .map_err(|e| SerializerError::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Config` if it cannot be
    /// parsed or describes an invalid serializer.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            SerializerError::Config(detail) => {
                SerializerError::config(format!("{}: {}", path.display(), detail))
            }
            other => other,
        })
    }

    /// Render this config as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| SerializerError::config(format!("failed to render config: {}", e)))
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Result serializer configuration
#
# type: "object" (default), "json" or "compressed"
#   "object"     = any value, including bytes and timestamps
#   "json"       = JSON-safe values only, human-readable
#   "compressed" = zstd around the [inner] serializer
type = "object"

# Refuse to decode object payloads larger than this (optional).
# max_decode_bytes = 67108864

# Compressed example:
# type = "compressed"
# level = 3
# [inner]
# type = "object"
"#
    }
}
