use std::rc::Rc;

use codeview_primitives::{EventPayload, Value};

use crate::bus::{EmitReport, EventBus};
use crate::handler::Handler;

/// The slice of an [`EventBus`] handed to plugins: subscribe, unsubscribe, emit.
///
/// Clones share the underlying bus.
#[derive(Clone, Debug)]
pub struct EventsView {
	bus: Rc<EventBus>,
}

impl EventsView {
	pub fn new(bus: Rc<EventBus>) -> Self {
		Self { bus }
	}

	pub fn on(&self, event: &str, handler: Handler) {
		self.bus.subscribe(event, handler);
	}

	pub fn off(&self, event: &str, handler: &Handler) -> usize {
		self.bus.unsubscribe(event, handler)
	}

	pub fn emit(&self, event: &str, payload: Option<&Value>) -> EmitReport {
		self.bus.emit(event, payload)
	}

	/// Emits `payload.data` under `payload.event_name`.
	pub fn emit_payload(&self, payload: &EventPayload) -> EmitReport {
		self.bus.emit(&payload.event_name, payload.data.as_ref())
	}
}

impl From<Rc<EventBus>> for EventsView {
	fn from(bus: Rc<EventBus>) -> Self {
		Self::new(bus)
	}
}
