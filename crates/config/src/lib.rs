//! Configuration for the code viewer.
//!
//! Configuration is written in KDL (v2) format:
//!
//! ```kdl
//! // Event bus behavior
//! events {
//!     handler-panic "isolate"   // or "propagate"
//! }
//!
//! // Plugins to install, in order
//! plugins {
//!     lineNumber
//!     minimap enabled=#false
//! }
//! ```
//!
//! Unknown sections and settings are not errors; they are collected in
//! [`Config::warnings`] for the host to display.

pub mod error;
mod events;
mod plugins;

use std::path::Path;

pub use error::{ConfigError, ConfigWarning, Result};
pub use events::EventsConfig;
pub use plugins::PluginEntry;

/// Parsed configuration from a KDL file.
#[derive(Debug, Clone, Default)]
pub struct Config {
	/// Event bus settings.
	pub events: EventsConfig,
	/// Plugin list in declaration order.
	pub plugins: Vec<PluginEntry>,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

impl Config {
	/// Parse a KDL string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let doc: kdl::KdlDocument = input.parse()?;
		let mut config = Config::default();

		for node in doc.nodes() {
			match node.name().value() {
				"events" => {
					config.events = events::parse_events_node(node, &mut config.warnings)?;
				}
				"plugins" => {
					config.plugins = plugins::parse_plugins_node(node, &mut config.warnings)?;
				}
				other => config
					.warnings
					.push(ConfigWarning::UnknownSection(other.to_string())),
			}
		}

		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Merge another config into this one.
	///
	/// Settings present in `other` override those in `self`. Plugins already listed
	/// take `other`'s `enabled` flag; new plugins are appended.
	pub fn merge(&mut self, other: Config) {
		if other.events.handler_panic.is_some() {
			self.events.handler_panic = other.events.handler_panic;
		}
		for entry in other.plugins {
			match self.plugins.iter_mut().find(|p| p.name == entry.name) {
				Some(existing) => existing.enabled = entry.enabled,
				None => self.plugins.push(entry),
			}
		}
		self.warnings.extend(other.warnings);
	}

	/// Names of enabled plugins in declaration order.
	pub fn enabled_plugins(&self) -> impl Iterator<Item = &str> {
		self.plugins
			.iter()
			.filter(|p| p.enabled)
			.map(|p| p.name.as_str())
	}
}
