//! Error types for configuration parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing KDL syntax.
	#[error("KDL parse error: {0}")]
	Kdl(#[from] kdl::KdlError),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A required value is missing from the configuration.
	#[error("missing required value: {0}")]
	MissingField(String),

	/// A setting has a value of the wrong kind or outside its allowed set.
	#[error("invalid value for {field}: {value} (expected {expected})")]
	InvalidValue {
		field: String,
		value: String,
		expected: &'static str,
	},
}

/// Non-fatal problems found while parsing. Collected in [`Config::warnings`](crate::Config::warnings).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
	/// Top-level node the viewer does not understand.
	#[error("unknown config section '{0}' will be ignored")]
	UnknownSection(String),

	/// Node inside a known section the viewer does not understand.
	#[error("unknown setting '{name}' in '{section}' will be ignored")]
	UnknownSetting { section: &'static str, name: String },

	/// The same plugin is listed more than once; the first entry wins.
	#[error("plugin '{0}' listed more than once; later entries ignored")]
	DuplicatePlugin(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
