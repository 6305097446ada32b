//! Synchronous publish/subscribe event bus for the code viewer.
//!
//! An [`EventBus`] maps event names to ordered handler lists. Each viewer owns its own
//! bus; nothing here is process-global. Plugins never see the bus itself, only an
//! [`EventsView`] restricted to `on`, `off` and `emit`.
//!
//! # Emission semantics
//!
//! - Handlers run synchronously on the caller's thread, in registration order.
//! - Emission iterates the handler list as it was when `emit` was called. Handlers
//!   subscribed by a running handler are first called on the next emission; handlers
//!   unsubscribed by a running handler still receive the current one.
//! - Handler panics follow the bus's [`HandlerPanicPolicy`].

mod bus;
mod handler;
mod policy;
mod view;

pub use bus::{EmitReport, EventBus};
pub use codeview_primitives::Value;
pub use handler::Handler;
pub use policy::HandlerPanicPolicy;
pub use view::EventsView;
