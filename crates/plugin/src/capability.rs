use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;

use rustc_hash::FxHashMap as HashMap;

use crate::error::{PluginError, Result};

/// Typed name of a capability stored in [`Extensions`].
///
/// Extension kinds declare one constant per capability, e.g.
/// `pub const GUTTER: CapabilityKey<Rc<dyn GutterHost>> = CapabilityKey::new("gutter");`
pub struct CapabilityKey<T> {
	name: &'static str,
	_marker: PhantomData<fn() -> T>,
}

impl<T> CapabilityKey<T> {
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_marker: PhantomData,
		}
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}
}

impl<T> Clone for CapabilityKey<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for CapabilityKey<T> {}

impl<T> fmt::Debug for CapabilityKey<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CapabilityKey")
			.field("name", &self.name)
			.field("type", &type_name::<T>())
			.finish()
	}
}

struct Entry {
	value: Box<dyn Any>,
	type_name: &'static str,
}

/// String-keyed registry of host capabilities.
///
/// Values are usually shared handles (`Rc<dyn SomeHost>`) and are cloned out on
/// lookup.
#[derive(Default)]
pub struct Extensions {
	entries: HashMap<Box<str>, Entry>,
}

impl Extensions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `value` under `key`, returning true if an earlier value was replaced.
	pub fn provide<T: Clone + 'static>(&mut self, key: CapabilityKey<T>, value: T) -> bool {
		self.entries
			.insert(
				Box::from(key.name()),
				Entry {
					value: Box::new(value),
					type_name: type_name::<T>(),
				},
			)
			.is_some()
	}

	/// Looks up `key`, failing if it is absent or holds another type.
	pub fn get<T: Clone + 'static>(&self, key: CapabilityKey<T>) -> Result<T> {
		let entry = self
			.entries
			.get(key.name())
			.ok_or_else(|| PluginError::MissingCapability {
				key: key.name().to_string(),
			})?;

		entry
			.value
			.downcast_ref::<T>()
			.cloned()
			.ok_or_else(|| PluginError::CapabilityTypeMismatch {
				key: key.name().to_string(),
				expected: type_name::<T>(),
				found: entry.type_name,
			})
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Removes a capability, returning true if it existed.
	pub fn withdraw(&mut self, name: &str) -> bool {
		self.entries.remove(name).is_some()
	}

	/// Registered capability names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.entries.keys().map(|k| &**k).collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Debug for Extensions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(self.entries.iter().map(|(k, e)| (k, e.type_name)))
			.finish()
	}
}
