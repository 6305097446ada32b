//! Error types for plugin installation and management.

use thiserror::Error;

/// Errors raised by plugins, the plugin context, and the plugin manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
	/// The context does not provide the requested capability.
	#[error("missing capability: {key}")]
	MissingCapability { key: String },

	/// The capability exists but holds a different type than requested.
	#[error("capability {key} has type {found}, expected {expected}")]
	CapabilityTypeMismatch {
		key: String,
		expected: &'static str,
		found: &'static str,
	},

	/// A plugin with this name is already registered.
	#[error("plugin already registered: {0}")]
	DuplicatePlugin(String),

	/// No plugin with this name is registered.
	#[error("unknown plugin: {0}")]
	UnknownPlugin(String),

	/// Install requested for a plugin that is already installed.
	#[error("plugin already installed: {0}")]
	AlreadyInstalled(String),

	/// Uninstall requested for a plugin that is not installed.
	#[error("plugin not installed: {0}")]
	NotInstalled(String),

	/// Plugin-specific failure.
	#[error("plugin {plugin} failed: {reason}")]
	Failed { plugin: String, reason: String },
}

/// Result type for plugin operations.
pub type Result<T> = std::result::Result<T, PluginError>;
