//! Line-number plugin: attaches [`LineNumberGutter`] to the host gutter.

use std::rc::Rc;

use codeview_gutter::{GUTTER, LineNumberGutter};
use codeview_plugin::{Plugin, PluginContext, Result};
use tracing::info;

/// Key the line-number gutter component is registered under.
pub const LINE_NUMBER_GUTTER_KEY: &str = "lineNumberGutter";

#[derive(Debug, Clone, Copy, Default)]
pub struct LineNumberPlugin;

impl LineNumberPlugin {
	pub const NAME: &'static str = "lineNumber";
}

impl Plugin for LineNumberPlugin {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn description(&self) -> &str {
		"Line numbers in the gutter"
	}

	fn install(&self, ctx: &PluginContext) -> Result<()> {
		let gutter = ctx.capability(GUTTER)?;
		gutter.register_gutter_component(LINE_NUMBER_GUTTER_KEY, Rc::new(LineNumberGutter));
		info!(key = LINE_NUMBER_GUTTER_KEY, "line number plugin installed, gutter component registered");
		Ok(())
	}

	fn uninstall(&self, ctx: &PluginContext) -> Result<()> {
		let gutter = ctx.capability(GUTTER)?;
		gutter.unregister_gutter_component(LINE_NUMBER_GUTTER_KEY);
		info!(key = LINE_NUMBER_GUTTER_KEY, "line number plugin uninstalled, gutter component unregistered");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use codeview_events::EventBus;
	use codeview_gutter::{GutterComponent, GutterHost, GutterRegistry};
	use codeview_plugin::PluginError;
	use codeview_primitives::CodeData;
	use pretty_assertions::assert_eq;

	use super::*;

	#[derive(Debug, PartialEq)]
	enum Call {
		Register(String),
		Unregister(String),
	}

	/// Records gutter hook calls without rendering anything.
	#[derive(Default)]
	struct StubGutter {
		calls: RefCell<Vec<Call>>,
	}

	impl GutterHost for StubGutter {
		fn register_gutter_component(&self, key: &str, _component: Rc<dyn GutterComponent>) {
			self.calls.borrow_mut().push(Call::Register(key.into()));
		}

		fn unregister_gutter_component(&self, key: &str) -> bool {
			self.calls.borrow_mut().push(Call::Unregister(key.into()));
			true
		}
	}

	fn context_with(gutter: Rc<dyn GutterHost>) -> PluginContext {
		PluginContext::new(Rc::new(EventBus::new()), Rc::new(CodeData::default()))
			.with_capability(GUTTER, gutter)
	}

	#[test]
	fn registers_and_unregisters_once_under_fixed_key() {
		let stub = Rc::new(StubGutter::default());
		let ctx = context_with(stub.clone());

		LineNumberPlugin.install(&ctx).unwrap();
		assert_eq!(
			*stub.calls.borrow(),
			vec![Call::Register("lineNumberGutter".into())]
		);

		LineNumberPlugin.uninstall(&ctx).unwrap();
		assert_eq!(
			*stub.calls.borrow(),
			vec![
				Call::Register("lineNumberGutter".into()),
				Call::Unregister("lineNumberGutter".into()),
			]
		);
	}

	#[test]
	fn install_then_uninstall_restores_gutter() {
		let registry = Rc::new(GutterRegistry::new());
		registry.register_gutter_component("signs", Rc::new(LineNumberGutter));
		let ctx = context_with(registry.clone());
		let before = registry.keys();

		LineNumberPlugin.install(&ctx).unwrap();
		assert_eq!(registry.keys(), vec!["signs", "lineNumberGutter"]);

		LineNumberPlugin.uninstall(&ctx).unwrap();
		assert_eq!(registry.keys(), before);
	}

	#[test]
	fn missing_gutter_capability_fails_at_call_site() {
		let ctx = PluginContext::new(Rc::new(EventBus::new()), Rc::new(CodeData::default()));

		let err = LineNumberPlugin.install(&ctx).unwrap_err();

		assert_eq!(
			err,
			PluginError::MissingCapability {
				key: "gutter".into()
			}
		);
		assert_eq!(err.to_string(), "missing capability: gutter");
	}
}
