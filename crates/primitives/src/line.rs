use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open-ended per-line metadata reserved for extensions (highlighting, annotations).
///
/// The core defines no reserved keys.
pub type LineMeta = serde_json::Map<String, Value>;

/// Identifier of a line within a [`CodeData`](crate::CodeData) sequence.
///
/// Hosts may use either integers or strings. Uniqueness within a sequence is the
/// host's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineId {
	Num(i64),
	Text(String),
}

impl fmt::Display for LineId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LineId::Num(n) => write!(f, "{n}"),
			LineId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for LineId {
	fn from(n: i64) -> Self {
		LineId::Num(n)
	}
}

impl From<&str> for LineId {
	fn from(s: &str) -> Self {
		LineId::Text(s.to_owned())
	}
}

impl From<String> for LineId {
	fn from(s: String) -> Self {
		LineId::Text(s)
	}
}

/// One displayed line of source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeLine {
	pub id: LineId,
	pub content: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<LineMeta>,
}

impl CodeLine {
	pub fn new(id: impl Into<LineId>, content: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			content: content.into(),
			meta: None,
		}
	}

	/// Attaches a metadata entry, creating the map on first use.
	pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.meta
			.get_or_insert_with(LineMeta::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn meta_value(&self, key: &str) -> Option<&Value> {
		self.meta.as_ref()?.get(key)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	#[rstest]
	#[case(json!({"id": 5, "content": "x"}), LineId::Num(5))]
	#[case(json!({"id": "a1", "content": "x"}), LineId::Text("a1".into()))]
	fn deserializes_either_id_kind(#[case] raw: Value, #[case] expected: LineId) {
		let line: CodeLine = serde_json::from_value(raw).unwrap();
		assert_eq!(line.id, expected);
		assert_eq!(line.content, "x");
		assert!(line.meta.is_none());
	}

	#[test]
	fn meta_is_omitted_when_absent() {
		let line = CodeLine::new(1, "fn main() {}");
		assert_eq!(
			serde_json::to_value(&line).unwrap(),
			json!({"id": 1, "content": "fn main() {}"})
		);
	}

	#[test]
	fn meta_round_trips_arbitrary_values() {
		let line = CodeLine::new("l2", "let x = 1;")
			.with_meta("highlight", true)
			.with_meta("note", json!({"author": "kim"}));

		assert_eq!(line.meta_value("highlight"), Some(&json!(true)));
		assert_eq!(line.meta_value("note"), Some(&json!({"author": "kim"})));
		assert_eq!(line.meta_value("missing"), None);

		let back: CodeLine = serde_json::from_str(&serde_json::to_string(&line).unwrap()).unwrap();
		assert_eq!(back, line);
	}

	#[test]
	fn display_matches_raw_id() {
		assert_eq!(LineId::Num(42).to_string(), "42");
		assert_eq!(LineId::from("abc").to_string(), "abc");
	}
}
