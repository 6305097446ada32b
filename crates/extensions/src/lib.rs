//! Built-in plugins.
//!
//! Each built-in is listed in [`BUILTINS`] with a constructor so hosts can map
//! configured plugin names to instances via [`find_builtin`].

use codeview_plugin::Plugin;

mod line_number;

pub use line_number::{LINE_NUMBER_GUTTER_KEY, LineNumberPlugin};

/// Static description of a built-in plugin.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPlugin {
	pub name: &'static str,
	pub description: &'static str,
	pub construct: fn() -> Box<dyn Plugin>,
}

/// All built-in plugins, in default install order.
pub static BUILTINS: &[BuiltinPlugin] = &[BuiltinPlugin {
	name: LineNumberPlugin::NAME,
	description: "Line numbers in the gutter",
	construct: new_line_number,
}];

fn new_line_number() -> Box<dyn Plugin> {
	Box::new(LineNumberPlugin)
}

/// Instantiates the built-in plugin called `name`.
pub fn find_builtin(name: &str) -> Option<Box<dyn Plugin>> {
	BUILTINS
		.iter()
		.find(|b| b.name == name)
		.map(|b| (b.construct)())
}

/// Instantiates every built-in plugin.
pub fn builtin_plugins() -> Vec<Box<dyn Plugin>> {
	BUILTINS.iter().map(|b| (b.construct)()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtins_are_found_by_name() {
		let plugin = find_builtin("lineNumber").unwrap();
		assert_eq!(plugin.name(), "lineNumber");
		assert!(find_builtin("minimap").is_none());
	}

	#[test]
	fn builtin_names_match_instances() {
		for (def, plugin) in BUILTINS.iter().zip(builtin_plugins()) {
			assert_eq!(def.name, plugin.name());
		}
	}
}
