//! Flowresult - pluggable serializers for workflow task results
//!
//! A task's output has to survive the trip from the worker that produced it
//! to whatever stores it, and back. Flowresult provides interchangeable
//! serializers behind one trait for that trip.
//!
//! # Quick Start
//!
//! ```
//! use flowresult::{ObjectSerializer, Serializer, Timestamp, Value};
//!
//! let serializer: Box<dyn Serializer> = Box::new(ObjectSerializer::new());
//! let result = Value::Array(vec![Value::from("abc"), Value::from(Timestamp::now())]);
//!
//! let bytes = serializer.serialize(&result).unwrap();
//! assert_eq!(serializer.deserialize(&bytes).unwrap(), result);
//! ```
//!
//! # Architecture
//!
//! Value types live in `flowresult-core`; the serializers, their errors and
//! their configuration live in `flowresult-serializers`. Both are re-exported
//! here.

pub use flowresult_core::{Timestamp, Value};
pub use flowresult_serializers::{
    CompressedSerializer, JsonSerializer, ObjectSerializer, Result, Serializer, SerializerConfig,
    SerializerError, SerializerKind,
};
