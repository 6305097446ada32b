use std::cell::{Cell, RefCell};
use std::rc::Rc;

use codeview_primitives::CodeData;
use tracing::debug;

use crate::{GutterCell, GutterComponent, GutterHost, GutterLineContext, GutterWidthContext};


struct Entry {
	key: Box<str>,
	component: Rc<dyn GutterComponent>,
	seq: u64,
}

/// One laid-out gutter column for a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterColumn {
	pub key: String,
	pub width: u16,
	pub cell: Option<GutterCell>,
}

/// Host-side store of registered gutter components.
///
/// Implements [`GutterHost`]; re-registering a key replaces the component but keeps
/// its original position among equal-priority columns.
#[derive(Default)]
pub struct GutterRegistry {
	entries: RefCell<Vec<Entry>>,
	next_seq: Cell<u64>,
}

impl GutterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.borrow().iter().any(|e| &*e.key == key)
	}

	pub fn get(&self, key: &str) -> Option<Rc<dyn GutterComponent>> {
		self.entries
			.borrow()
			.iter()
			.find(|e| &*e.key == key)
			.map(|e| Rc::clone(&e.component))
	}

	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	/// Registered keys in layout order (left to right).
	pub fn keys(&self) -> Vec<String> {
		self.ordered().into_iter().map(|(key, _)| key).collect()
	}

	/// `(key, width)` for each registered column, left to right.
	pub fn column_widths(&self, ctx: &GutterWidthContext) -> Vec<(String, u16)> {
		self.ordered()
			.into_iter()
			.map(|(key, component)| (key, component.width().resolve(ctx)))
			.collect()
	}

	/// Sum of column widths plus one separator space; 0 with no columns.
	///
	/// Saturates at `u16::MAX`.
	pub fn total_width(&self, ctx: &GutterWidthContext) -> u16 {
		let columns_width = self
			.column_widths(ctx)
			.iter()
			.fold(0u16, |acc, (_, w)| acc.saturating_add(*w));
		if columns_width > 0 {
			columns_width.saturating_add(1) // trailing separator space
		} else {
			0
		}
	}

	/// Renders every column for line `line_idx` of `data`.
	///
	/// Returns an empty layout when `line_idx` is out of range.
	pub fn render_line(&self, data: &CodeData, line_idx: usize) -> Vec<GutterColumn> {
		let Some(line) = data.get(line_idx) else {
			return Vec::new();
		};
		let width_ctx = GutterWidthContext {
			total_lines: data.len(),
		};
		let line_ctx = GutterLineContext {
			line_idx,
			total_lines: data.len(),
			line,
		};

		self.ordered()
			.into_iter()
			.map(|(key, component)| GutterColumn {
				width: component.width().resolve(&width_ctx),
				cell: component.render(&line_ctx),
				key,
			})
			.collect()
	}

	/// Renders line `line_idx` as plain text: each cell right-aligned in its column,
	/// followed by the separator space.
	pub fn format_line(&self, data: &CodeData, line_idx: usize) -> String {
		let columns = self.render_line(data, line_idx);
		if columns.is_empty() {
			return String::new();
		}

		let mut out = String::new();
		for col in &columns {
			let text = col.cell.as_ref().map_or("", |c| c.text.as_str());
			out.push_str(&format!("{text:>width$}", width = col.width as usize));
		}
		out.push(' ');
		out
	}

	/// Snapshot of `(key, component)` pairs sorted by priority, then registration order.
	///
	/// Taken before any component code runs so components may call back into the registry.
	fn ordered(&self) -> Vec<(String, Rc<dyn GutterComponent>)> {
		let mut entries: Vec<(i16, u64, String, Rc<dyn GutterComponent>)> = self
			.entries
			.borrow()
			.iter()
			.map(|e| (e.component.priority(), e.seq, e.key.to_string(), Rc::clone(&e.component)))
			.collect();
		entries.sort_by_key(|(priority, seq, _, _)| (*priority, *seq));
		entries
			.into_iter()
			.map(|(_, _, key, component)| (key, component))
			.collect()
	}
}

impl GutterHost for GutterRegistry {
	fn register_gutter_component(&self, key: &str, component: Rc<dyn GutterComponent>) {
		let mut entries = self.entries.borrow_mut();
		if let Some(existing) = entries.iter_mut().find(|e| &*e.key == key) {
			existing.component = component;
			debug!(key, "gutter component replaced");
			return;
		}

		let seq = self.next_seq.get();
		self.next_seq.set(seq + 1);
		entries.push(Entry {
			key: Box::from(key),
			component,
			seq,
		});
		debug!(key, "gutter component registered");
	}

	fn unregister_gutter_component(&self, key: &str) -> bool {
		let mut entries = self.entries.borrow_mut();
		let before = entries.len();
		entries.retain(|e| &*e.key != key);
		let removed = entries.len() != before;
		if removed {
			debug!(key, "gutter component unregistered");
		}
		removed
	}
}

impl std::fmt::Debug for GutterRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GutterRegistry").field("keys", &self.keys()).finish()
	}
}
