//! Shared data shapes for the code viewer: lines, line sequences and event payloads.
//!
//! These types carry no behavior beyond construction and inspection. The host owns
//! every [`CodeData`]; plugins only ever see snapshots of it.

/// Ordered line sequences.
pub mod code_data;
/// Named event occurrences.
pub mod payload;
/// Single line types and identifiers.
pub mod line;

pub use code_data::CodeData;
pub use line::{CodeLine, LineId, LineMeta};
pub use payload::EventPayload;
pub use serde_json::Value;
