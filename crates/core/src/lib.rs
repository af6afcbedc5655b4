//! Core types for task results
//!
//! This crate defines the values that flow between a task-executing worker
//! and whatever persists its output:
//! - Value: Dynamic task result (JSON-safe shapes plus engine-native types)
//! - Timestamp: Microsecond timestamp carried inside results

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod timestamp;
pub mod value;

pub use timestamp::Timestamp;
pub use value::Value;
