use std::cell::RefCell;
use std::rc::Rc;

use codeview_events::EventsView;
use codeview_primitives::CodeData;

use crate::capability::{CapabilityKey, Extensions};
use crate::error::Result;

/// Read access to the host's current code data.
pub trait CodeSource {
	/// Returns the current snapshot. Snapshots share lines with the host's copy.
	fn code_data(&self) -> CodeData;
}

impl CodeSource for CodeData {
	fn code_data(&self) -> CodeData {
		self.clone()
	}
}

impl CodeSource for RefCell<CodeData> {
	fn code_data(&self) -> CodeData {
		self.borrow().clone()
	}
}

/// Capability object handed to plugins during install and uninstall.
///
/// Built once per viewer by the host. Plugins may keep clones of the handles they
/// obtain from it (the events view, capability handles) for use inside handlers.
pub struct PluginContext {
	events: EventsView,
	code: Rc<dyn CodeSource>,
	extensions: Extensions,
}

impl PluginContext {
	pub fn new(events: impl Into<EventsView>, code: Rc<dyn CodeSource>) -> Self {
		Self {
			events: events.into(),
			code,
			extensions: Extensions::new(),
		}
	}

	pub fn with_capability<T: Clone + 'static>(mut self, key: CapabilityKey<T>, value: T) -> Self {
		self.extensions.provide(key, value);
		self
	}

	/// The `on`/`off`/`emit` view of the viewer's event bus.
	pub fn events(&self) -> &EventsView {
		&self.events
	}

	pub fn get_code_data(&self) -> CodeData {
		self.code.code_data()
	}

	/// Looks up a host capability by its typed key.
	pub fn capability<T: Clone + 'static>(&self, key: CapabilityKey<T>) -> Result<T> {
		self.extensions.get(key)
	}

	pub fn extensions(&self) -> &Extensions {
		&self.extensions
	}

	pub fn extensions_mut(&mut self) -> &mut Extensions {
		&mut self.extensions
	}
}

impl std::fmt::Debug for PluginContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PluginContext")
			.field("events", &self.events)
			.field("extensions", &self.extensions)
			.finish_non_exhaustive()
	}
}
