//! Gutter components registered by plugins at runtime.
//!
//! A plugin looks up the [`GUTTER`] capability on its context and hands the host
//! an `Rc<dyn GutterComponent>` under a string key. The host, usually through a
//! [`GutterRegistry`], lays columns out by priority and then by the order keys
//! were first registered. Components see the whole [`CodeLine`], so a column can
//! be driven by `meta` as well as position.

use std::rc::Rc;

use codeview_plugin::CapabilityKey;
use codeview_primitives::CodeLine;

mod line_numbers;
mod registry;

pub use line_numbers::{HIGHLIGHT_META_KEY, LineNumberGutter};
pub use registry::{GutterColumn, GutterRegistry};

/// Capability key under which hosts provide gutter registration.
pub const GUTTER: CapabilityKey<Rc<dyn GutterHost>> = CapabilityKey::new("gutter");

/// What [`GutterComponent::render`] sees for one line.
#[derive(Debug, Clone, Copy)]
pub struct GutterLineContext<'a> {
	/// Position in the current code data, starting at 0.
	pub line_idx: usize,
	pub total_lines: usize,
	pub line: &'a CodeLine,
}

/// What a [`GutterWidth::Dynamic`] function sees; shared by every line.
#[derive(Debug, Clone, Copy)]
pub struct GutterWidthContext {
	pub total_lines: usize,
}

/// Output of a [`GutterComponent`] for one code line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterCell {
	/// Padded to the column width by [`GutterRegistry::format_line`].
	pub text: String,
	pub style: GutterStyle,
}

/// How the embedding UI should paint a [`GutterCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GutterStyle {
	#[default]
	Normal,
	/// Blank or otherwise uninteresting lines.
	Dim,
	/// Set from a line's metadata, see [`HIGHLIGHT_META_KEY`].
	Highlight,
}

/// Column width a component asks the registry for.
///
/// Widths are re-resolved on every layout, so a `Dynamic` column follows the
/// current [`CodeData`](codeview_primitives::CodeData) after a host swaps it.
#[derive(Debug, Clone, Copy)]
pub enum GutterWidth {
	Fixed(u16),
	Dynamic(fn(&GutterWidthContext) -> u16),
}

impl GutterWidth {
	pub fn resolve(self, ctx: &GutterWidthContext) -> u16 {
		match self {
			Self::Fixed(width) => width,
			Self::Dynamic(compute) => compute(ctx),
		}
	}
}

/// A gutter column implementation understood by the host's rendering layer.
pub trait GutterComponent {
	fn width(&self) -> GutterWidth;

	/// Cell for one line, or `None` to leave the column blank.
	fn render(&self, ctx: &GutterLineContext<'_>) -> Option<GutterCell>;

	/// Lower values render further left.
	fn priority(&self) -> i16 {
		0
	}
}

/// Host extension point for attaching gutter components.
pub trait GutterHost {
	/// Registers `component` under `key`, replacing any component already there.
	fn register_gutter_component(&self, key: &str, component: Rc<dyn GutterComponent>);

	/// Removes the component under `key`, returning true if one was registered.
	fn unregister_gutter_component(&self, key: &str) -> bool;
}
