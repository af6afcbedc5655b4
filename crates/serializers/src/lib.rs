//! Result serializers for task outputs
//!
//! This crate turns task results into bytes and back:
//!
//! - `Serializer`: object-safe trait every format implements
//! - `ObjectSerializer`: any value, bincode, transparently reads the legacy
//!   base64-wrapped shape
//! - `JsonSerializer`: JSON-safe values only, compact text
//! - `CompressedSerializer`: zstd around either of the above
//! - `SerializerConfig`: TOML-backed description that rebuilds a serializer
//!
//! Serializers hold no runtime state. Storage, scheduling and transport of
//! the produced bytes belong to the caller, which must store them verbatim.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compressed;
pub mod config;
pub mod error;
pub mod json;
mod nesting;
pub mod object;
pub mod traits;

pub use compressed::CompressedSerializer;
pub use config::SerializerConfig;
pub use error::{Result, SerializerError};
pub use json::JsonSerializer;
pub use object::ObjectSerializer;
pub use traits::{Serializer, SerializerKind};

pub use flowresult_core::{Timestamp, Value};
