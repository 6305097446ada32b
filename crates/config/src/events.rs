//! `events { }` section parsing.

use codeview_events::HandlerPanicPolicy;
use kdl::KdlNode;

use crate::error::{ConfigError, ConfigWarning, Result};

/// Event bus settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventsConfig {
	/// Panic policy, if the config sets one.
	pub handler_panic: Option<HandlerPanicPolicy>,
}

impl EventsConfig {
	/// Effective panic policy, falling back to the bus default.
	pub fn handler_panic_policy(&self) -> HandlerPanicPolicy {
		self.handler_panic.unwrap_or_default()
	}
}

pub(crate) fn parse_events_node(node: &KdlNode, warnings: &mut Vec<ConfigWarning>) -> Result<EventsConfig> {
	let mut config = EventsConfig::default();
	let Some(children) = node.children() else {
		return Ok(config);
	};

	for child in children.nodes() {
		match child.name().value() {
			"handler-panic" => {
				let raw = child
					.get(0)
					.and_then(|v| v.as_string())
					.ok_or_else(|| ConfigError::MissingField("events.handler-panic".into()))?;
				let policy = HandlerPanicPolicy::from_name(raw).ok_or_else(|| ConfigError::InvalidValue {
					field: "events.handler-panic".into(),
					value: raw.to_string(),
					expected: "\"isolate\" or \"propagate\"",
				})?;
				config.handler_panic = Some(policy);
			}
			other => warnings.push(ConfigWarning::UnknownSetting {
				section: "events",
				name: other.to_string(),
			}),
		}
	}

	Ok(config)
}
