//! Absolute line numbers gutter column.

use crate::{GutterCell, GutterComponent, GutterLineContext, GutterStyle, GutterWidth, GutterWidthContext};

/// Metadata key that renders a line's number highlighted when set to `true`.
pub const HIGHLIGHT_META_KEY: &str = "highlight";

/// Digits needed for the highest line number, never narrower than three columns.
fn line_number_width(ctx: &GutterWidthContext) -> u16 {
	let digits = ctx.total_lines.checked_ilog10().map_or(1, |log| log + 1);
	u16::try_from(digits).unwrap_or(u16::MAX).max(3)
}

/// Renders 1-based line numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineNumberGutter;

impl GutterComponent for LineNumberGutter {
	fn width(&self) -> GutterWidth {
		GutterWidth::Dynamic(line_number_width)
	}

	fn render(&self, ctx: &GutterLineContext<'_>) -> Option<GutterCell> {
		let highlighted = ctx
			.line
			.meta_value(HIGHLIGHT_META_KEY)
			.and_then(|v| v.as_bool())
			.unwrap_or(false);

		Some(GutterCell {
			text: format!("{}", ctx.line_idx + 1),
			style: if highlighted {
				GutterStyle::Highlight
			} else if ctx.line.content.trim().is_empty() {
				GutterStyle::Dim
			} else {
				GutterStyle::Normal
			},
		})
	}
}
