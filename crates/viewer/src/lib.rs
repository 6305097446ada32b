//! Reference host for the code viewer plugin layer.
//!
//! [`Viewer`] owns one [`EventBus`], the current [`CodeData`], a [`GutterRegistry`]
//! and a [`PluginManager`], and builds the [`PluginContext`] plugins install
//! against. Rendering of code lines is left to the embedding UI; the viewer only
//! lays out gutter columns.

use std::cell::RefCell;
use std::rc::Rc;

use codeview_config::Config;
use codeview_events::{EventBus, EventsView, HandlerPanicPolicy};
use codeview_gutter::{GUTTER, GutterColumn, GutterHost, GutterRegistry, GutterWidthContext};
use codeview_plugin::{CodeSource, Plugin, PluginContext, PluginManager, PluginState, Result};
use codeview_primitives::CodeData;
use serde_json::json;
use tracing::{debug, warn};
// Used only by the integration tests under `tests/`.
#[cfg(test)]
use {pretty_assertions as _, tracing_subscriber as _};

/// Emitted after [`Viewer::set_code_data`] with `{ "lines": <count> }`.
pub const CODE_DATA_CHANGED: &str = "codeDataChanged";

pub struct Viewer {
	bus: Rc<EventBus>,
	code: Rc<RefCell<CodeData>>,
	gutter: Rc<GutterRegistry>,
	context: PluginContext,
	plugins: PluginManager,
}

impl Viewer {
	pub fn new() -> Self {
		Self::with_panic_policy(HandlerPanicPolicy::default())
	}

	pub fn with_panic_policy(policy: HandlerPanicPolicy) -> Self {
		let bus = Rc::new(EventBus::with_panic_policy(policy));
		let code = Rc::new(RefCell::new(CodeData::default()));
		let gutter = Rc::new(GutterRegistry::new());

		let source: Rc<dyn CodeSource> = code.clone();
		let host: Rc<dyn GutterHost> = gutter.clone();
		let context = PluginContext::new(bus.view(), source).with_capability(GUTTER, host);

		Self {
			bus,
			code,
			gutter,
			context,
			plugins: PluginManager::new(),
		}
	}

	/// Builds a viewer and installs the configured plugins.
	pub fn from_config(config: &Config) -> Result<Self> {
		let mut viewer = Self::with_panic_policy(config.events.handler_panic_policy());
		viewer.apply_config(config)?;
		Ok(viewer)
	}

	/// Applies the panic policy, if the config sets one, and installs every enabled
	/// built-in plugin not yet present.
	///
	/// Unknown plugin names are skipped with a warning and returned.
	pub fn apply_config(&mut self, config: &Config) -> Result<Vec<String>> {
		if let Some(policy) = config.events.handler_panic {
			self.bus.set_panic_policy(policy);
		}
		for warning in &config.warnings {
			warn!(%warning, "config warning");
		}

		let mut unknown = Vec::new();
		for name in config.enabled_plugins() {
			if self.plugins.state(name).is_some() {
				continue;
			}
			match codeview_extensions::find_builtin(name) {
				Some(plugin) => self.install_plugin(plugin)?,
				None => {
					warn!(plugin = name, "unknown plugin in config");
					unknown.push(name.to_string());
				}
			}
		}
		Ok(unknown)
	}

	/// Registers and installs `plugin`. A plugin whose install fails is not kept.
	pub fn install_plugin(&mut self, plugin: Box<dyn Plugin>) -> Result<()> {
		let name = plugin.name().to_string();
		self.plugins.register(plugin)?;
		if let Err(e) = self.plugins.install(&name, &self.context) {
			self.plugins.remove(&name, &self.context)?;
			return Err(e);
		}
		Ok(())
	}

	/// Uninstalls `name` and hands the plugin back.
	pub fn uninstall_plugin(&mut self, name: &str) -> Result<Box<dyn Plugin>> {
		self.plugins.remove(name, &self.context)
	}

	pub fn plugin_state(&self, name: &str) -> Option<PluginState> {
		self.plugins.state(name)
	}

	pub fn plugins(&self) -> &PluginManager {
		&self.plugins
	}

	/// Replaces the displayed code and notifies subscribers.
	pub fn set_code_data(&self, data: CodeData) {
		let lines = data.len();
		*self.code.borrow_mut() = data;
		debug!(lines, "code data replaced");
		self.bus.emit(CODE_DATA_CHANGED, Some(&json!({ "lines": lines })));
	}

	pub fn code_data(&self) -> CodeData {
		self.code.borrow().clone()
	}

	pub fn bus(&self) -> &Rc<EventBus> {
		&self.bus
	}

	pub fn events(&self) -> EventsView {
		self.bus.view()
	}

	pub fn context(&self) -> &PluginContext {
		&self.context
	}

	/// Mutable access for hosts that expose additional capabilities.
	pub fn context_mut(&mut self) -> &mut PluginContext {
		&mut self.context
	}

	pub fn gutter(&self) -> &GutterRegistry {
		&self.gutter
	}

	pub fn gutter_width(&self) -> u16 {
		self.gutter.total_width(&GutterWidthContext {
			total_lines: self.code.borrow().len(),
		})
	}

	pub fn gutter_columns(&self, line_idx: usize) -> Vec<GutterColumn> {
		self.gutter.render_line(&self.code_data(), line_idx)
	}

	pub fn gutter_text(&self, line_idx: usize) -> String {
		self.gutter.format_line(&self.code_data(), line_idx)
	}
}

impl Default for Viewer {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for Viewer {
	fn drop(&mut self) {
		for (name, error) in self.plugins.uninstall_all(&self.context) {
			warn!(plugin = %name, %error, "plugin failed to uninstall on drop");
		}
	}
}

impl std::fmt::Debug for Viewer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Viewer")
			.field("lines", &self.code.borrow().len())
			.field("bus", &self.bus)
			.field("gutter", &self.gutter)
			.field("plugins", &self.plugins)
			.finish()
	}
}
