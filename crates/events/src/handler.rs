use std::fmt;
use std::rc::Rc;

use codeview_primitives::Value;

type HandlerFn = dyn Fn(Option<&Value>);

/// A subscribed callback.
///
/// Identity is the allocation, not the closure body: clones of one `Handler` compare
/// equal, while two `Handler::new` calls wrapping identical closures do not. Keep a
/// clone around to unsubscribe later.
#[derive(Clone)]
pub struct Handler(Rc<HandlerFn>);

impl Handler {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Option<&Value>) + 'static,
	{
		Self(Rc::new(f))
	}

	/// Returns true when both handles refer to the same callback allocation.
	pub fn same(&self, other: &Handler) -> bool {
		std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
	}

	pub(crate) fn call(&self, payload: Option<&Value>) {
		(self.0)(payload)
	}
}

impl PartialEq for Handler {
	fn eq(&self, other: &Self) -> bool {
		self.same(other)
	}
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Handler")
			.field(&Rc::as_ptr(&self.0).cast::<()>())
			.finish()
	}
}
