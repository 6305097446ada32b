use crate::context::PluginContext;
use crate::error::Result;

/// Lifecycle state of a registered plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginState {
	#[default]
	Uninstalled,
	Installed,
}

/// A named unit that installs extensions through a [`PluginContext`].
///
/// `uninstall` must undo every registration `install` made, so that an install
/// followed by an uninstall leaves the context's event subscriptions and
/// extensions exactly as they were. Nothing verifies this at runtime.
///
/// Plugins do not guard against repeated installs themselves; [`PluginManager`]
/// does.
///
/// [`PluginManager`]: crate::PluginManager
pub trait Plugin {
	/// Unique key among the plugins installed on one viewer.
	fn name(&self) -> &str;

	fn description(&self) -> &str {
		""
	}

	fn install(&self, ctx: &PluginContext) -> Result<()>;

	fn uninstall(&self, ctx: &PluginContext) -> Result<()>;
}

impl std::fmt::Debug for dyn Plugin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Plugin").field("name", &self.name()).finish()
	}
}
