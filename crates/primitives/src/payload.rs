use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named event occurrence with optional data.
///
/// The event bus emits name and data as separate arguments; this shape exists for
/// callers that want to pass an occurrence around as a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
	pub event_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}

impl EventPayload {
	pub fn new(event_name: impl Into<String>) -> Self {
		Self {
			event_name: event_name.into(),
			data: None,
		}
	}

	pub fn with_data(mut self, data: impl Into<Value>) -> Self {
		self.data = Some(data.into());
		self
	}
}
