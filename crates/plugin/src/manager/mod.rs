use tracing::{info, warn};

use crate::context::PluginContext;
use crate::error::{PluginError, Result};
use crate::plugin::{Plugin, PluginState};


struct Slot {
	plugin: Box<dyn Plugin>,
	state: PluginState,
}

/// Registration-ordered set of uniquely named plugins and their lifecycle state.
///
/// Install order is registration order; [`PluginManager::uninstall_all`] runs in
/// reverse so later plugins are torn down before the ones they may build on.
#[derive(Default)]
pub struct PluginManager {
	slots: Vec<Slot>,
}

impl PluginManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a plugin in the [`PluginState::Uninstalled`] state.
	pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<()> {
		if self.slot(plugin.name()).is_some() {
			return Err(PluginError::DuplicatePlugin(plugin.name().to_string()));
		}
		self.slots.push(Slot {
			plugin,
			state: PluginState::Uninstalled,
		});
		Ok(())
	}

	/// Uninstalls the plugin if needed and drops it from the manager.
	pub fn remove(&mut self, name: &str, ctx: &PluginContext) -> Result<Box<dyn Plugin>> {
		let idx = self.index(name)?;
		if self.slots[idx].state == PluginState::Installed {
			self.uninstall(name, ctx)?;
		}
		Ok(self.slots.remove(idx).plugin)
	}

	pub fn install(&mut self, name: &str, ctx: &PluginContext) -> Result<()> {
		let idx = self.index(name)?;
		let slot = &mut self.slots[idx];
		if slot.state == PluginState::Installed {
			return Err(PluginError::AlreadyInstalled(name.to_string()));
		}

		if let Err(e) = slot.plugin.install(ctx) {
			warn!(plugin = name, error = %e, "plugin install failed");
			return Err(e);
		}
		slot.state = PluginState::Installed;
		info!(plugin = name, "plugin installed");
		Ok(())
	}

	pub fn uninstall(&mut self, name: &str, ctx: &PluginContext) -> Result<()> {
		let idx = self.index(name)?;
		let slot = &mut self.slots[idx];
		if slot.state == PluginState::Uninstalled {
			return Err(PluginError::NotInstalled(name.to_string()));
		}

		if let Err(e) = slot.plugin.uninstall(ctx) {
			warn!(plugin = name, error = %e, "plugin uninstall failed");
			return Err(e);
		}
		slot.state = PluginState::Uninstalled;
		info!(plugin = name, "plugin uninstalled");
		Ok(())
	}

	/// Installs every uninstalled plugin in registration order, stopping at the first failure.
	pub fn install_all(&mut self, ctx: &PluginContext) -> Result<()> {
		let pending: Vec<String> = self
			.slots
			.iter()
			.filter(|s| s.state == PluginState::Uninstalled)
			.map(|s| s.plugin.name().to_string())
			.collect();
		for name in pending {
			self.install(&name, ctx)?;
		}
		Ok(())
	}

	/// Uninstalls every installed plugin in reverse registration order.
	///
	/// Failures do not stop the sweep; they are returned per plugin name.
	pub fn uninstall_all(&mut self, ctx: &PluginContext) -> Vec<(String, PluginError)> {
		let installed: Vec<String> = self
			.slots
			.iter()
			.rev()
			.filter(|s| s.state == PluginState::Installed)
			.map(|s| s.plugin.name().to_string())
			.collect();

		installed
			.into_iter()
			.filter_map(|name| self.uninstall(&name, ctx).err().map(|e| (name, e)))
			.collect()
	}

	pub fn state(&self, name: &str) -> Option<PluginState> {
		self.slot(name).map(|s| s.state)
	}

	pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
		self.slot(name).map(|s| &*s.plugin)
	}

	/// Registered plugin names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.slots.iter().map(|s| s.plugin.name())
	}

	pub fn installed(&self) -> impl Iterator<Item = &str> {
		self.slots
			.iter()
			.filter(|s| s.state == PluginState::Installed)
			.map(|s| s.plugin.name())
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	fn slot(&self, name: &str) -> Option<&Slot> {
		self.slots.iter().find(|s| s.plugin.name() == name)
	}

	fn index(&self, name: &str) -> Result<usize> {
		self.slots
			.iter()
			.position(|s| s.plugin.name() == name)
			.ok_or_else(|| PluginError::UnknownPlugin(name.to_string()))
	}
}

impl std::fmt::Debug for PluginManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map()
			.entries(self.slots.iter().map(|s| (s.plugin.name(), s.state)))
			.finish()
	}
}
