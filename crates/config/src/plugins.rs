//! `plugins { }` section parsing.

use kdl::KdlNode;

use crate::error::{ConfigError, ConfigWarning, Result};

/// One configured plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
	pub name: String,
	/// Defaults to `true` when the node has no `enabled` property.
	pub enabled: bool,
}

pub(crate) fn parse_plugins_node(node: &KdlNode, warnings: &mut Vec<ConfigWarning>) -> Result<Vec<PluginEntry>> {
	let mut entries: Vec<PluginEntry> = Vec::new();
	let Some(children) = node.children() else {
		return Ok(entries);
	};

	for child in children.nodes() {
		let name = child.name().value();
		let enabled = match child.get("enabled") {
			None => true,
			Some(value) => value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
				field: format!("plugins.{name}.enabled"),
				value: value.to_string(),
				expected: "#true or #false",
			})?,
		};

		if entries.iter().any(|e| e.name == name) {
			warnings.push(ConfigWarning::DuplicatePlugin(name.to_string()));
			continue;
		}
		entries.push(PluginEntry {
			name: name.to_string(),
			enabled,
		});
	}

	Ok(entries)
}
