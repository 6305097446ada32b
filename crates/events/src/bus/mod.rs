use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use codeview_primitives::Value;
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, error, trace};

use crate::handler::Handler;
use crate::policy::HandlerPanicPolicy;
use crate::view::EventsView;


/// Outcome of a single [`EventBus::emit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitReport {
	/// Handlers that returned normally.
	pub delivered: usize,
	/// Handlers that panicked and were isolated.
	pub panicked: usize,
}

impl EmitReport {
	pub fn invoked(&self) -> usize {
		self.delivered + self.panicked
	}
}

/// Event name to ordered handler list.
///
/// All methods take `&self`; handlers may call back into the bus while an emission
/// is running. No internal borrow is held while a handler executes.
#[derive(Default)]
pub struct EventBus {
	handlers: RefCell<HashMap<Box<str>, Vec<Handler>>>,
	panic_policy: Cell<HandlerPanicPolicy>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_panic_policy(policy: HandlerPanicPolicy) -> Self {
		Self {
			handlers: RefCell::default(),
			panic_policy: Cell::new(policy),
		}
	}

	pub fn panic_policy(&self) -> HandlerPanicPolicy {
		self.panic_policy.get()
	}

	pub fn set_panic_policy(&self, policy: HandlerPanicPolicy) {
		self.panic_policy.set(policy);
	}

	/// Restricted `on`/`off`/`emit` view over a shared bus.
	pub fn view(self: &Rc<Self>) -> EventsView {
		EventsView::new(Rc::clone(self))
	}

	/// Appends `handler` to the list for `event`. Duplicates are kept.
	pub fn subscribe(&self, event: &str, handler: Handler) {
		let mut handlers = self.handlers.borrow_mut();
		let list = handlers.entry(Box::from(event)).or_default();
		list.push(handler);
		debug!(event, listeners = list.len(), "subscribed");
	}

	/// Removes every occurrence of `handler` from `event`, returning how many were removed.
	///
	/// Unknown events and handlers are ignored.
	pub fn unsubscribe(&self, event: &str, handler: &Handler) -> usize {
		let mut handlers = self.handlers.borrow_mut();
		let Some(list) = handlers.get_mut(event) else {
			return 0;
		};

		let before = list.len();
		list.retain(|h| !h.same(handler));
		let removed = before - list.len();
		if list.is_empty() {
			handlers.remove(event);
		}
		if removed > 0 {
			debug!(event, removed, "unsubscribed");
		}
		removed
	}

	/// Calls every handler registered for `event` with `payload`, in registration order.
	///
	/// # Panics
	///
	/// Re-raises a handler panic when the policy is [`HandlerPanicPolicy::Propagate`].
	pub fn emit(&self, event: &str, payload: Option<&Value>) -> EmitReport {
		let snapshot = match self.handlers.borrow().get(event) {
			Some(list) => list.clone(),
			None => return EmitReport::default(),
		};

		trace!(event, listeners = snapshot.len(), "emit");
		let mut report = EmitReport::default();
		for handler in &snapshot {
			match self.panic_policy.get() {
				HandlerPanicPolicy::Propagate => {
					handler.call(payload);
					report.delivered += 1;
				}
				HandlerPanicPolicy::Isolate => {
					match catch_unwind(AssertUnwindSafe(|| handler.call(payload))) {
						Ok(()) => report.delivered += 1,
						Err(panic) => {
							error!(event, panic = panic_message(&*panic), "event handler panicked");
							report.panicked += 1;
						}
					}
				}
			}
		}
		report
	}

	pub fn listener_count(&self, event: &str) -> usize {
		self.handlers.borrow().get(event).map_or(0, Vec::len)
	}

	pub fn has_listeners(&self, event: &str) -> bool {
		self.listener_count(event) > 0
	}

	/// Event names with at least one handler, sorted.
	pub fn event_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.handlers.borrow().keys().map(|k| k.to_string()).collect();
		names.sort_unstable();
		names
	}

	/// Listener count per event name, for comparing registration states.
	pub fn registrations(&self) -> BTreeMap<String, usize> {
		self.handlers
			.borrow()
			.iter()
			.map(|(name, list)| (name.to_string(), list.len()))
			.collect()
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventBus")
			.field("registrations", &self.registrations())
			.field("panic_policy", &self.panic_policy.get())
			.finish()
	}
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
	if let Some(s) = panic.downcast_ref::<&'static str>() {
		s
	} else if let Some(s) = panic.downcast_ref::<String>() {
		s.as_str()
	} else {
		"<non-string panic payload>"
	}
}
