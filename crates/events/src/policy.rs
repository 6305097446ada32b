use std::fmt;

/// What [`EventBus::emit`](crate::EventBus::emit) does when a handler panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerPanicPolicy {
	/// Catch the panic, log it, and keep calling the remaining handlers.
	#[default]
	Isolate,
	/// Let the panic unwind out of `emit`; remaining handlers are skipped.
	Propagate,
}

impl HandlerPanicPolicy {
	/// Parses the configuration spelling (`"isolate"` or `"propagate"`).
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"isolate" => Some(Self::Isolate),
			"propagate" => Some(Self::Propagate),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Isolate => "isolate",
			Self::Propagate => "propagate",
		}
	}
}

impl fmt::Display for HandlerPanicPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
