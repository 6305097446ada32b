//! End-to-end wiring of bus, code data, gutter and plugins through [`Viewer`].

use std::cell::RefCell;
use std::rc::Rc;

use codeview_config::Config;
use codeview_events::{Handler, HandlerPanicPolicy, Value};
use codeview_extensions::{LINE_NUMBER_GUTTER_KEY, LineNumberPlugin};
use codeview_gutter as _;
use codeview_plugin::{Plugin, PluginContext, PluginError, PluginState};
use codeview_primitives::{CodeData, CodeLine, LineId};
use codeview_viewer::{CODE_DATA_CHANGED, Viewer};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// Counts `lineAdded` events it observes while installed.
struct LineCounter {
	seen: Rc<RefCell<Vec<Value>>>,
	handler: RefCell<Option<Handler>>,
}

impl Plugin for LineCounter {
	fn name(&self) -> &str {
		"lineCounter"
	}

	fn install(&self, ctx: &PluginContext) -> codeview_plugin::Result<()> {
		let seen = Rc::clone(&self.seen);
		let handler = Handler::new(move |payload| {
			if let Some(payload) = payload {
				seen.borrow_mut().push(payload.clone());
			}
		});
		ctx.events().on("lineAdded", handler.clone());
		*self.handler.borrow_mut() = Some(handler);
		Ok(())
	}

	fn uninstall(&self, ctx: &PluginContext) -> codeview_plugin::Result<()> {
		if let Some(handler) = self.handler.borrow_mut().take() {
			ctx.events().off("lineAdded", &handler);
		}
		Ok(())
	}
}

#[test]
fn code_data_round_trips_through_context() {
	init_tracing();
	let viewer = Viewer::new();
	let data = CodeData::new(vec![CodeLine::new(1, "a"), CodeLine::new(2, "b")]);
	viewer.set_code_data(data.clone());

	let snapshot = viewer.context().get_code_data();

	assert!(snapshot.ptr_eq(&data));
	assert_eq!(snapshot.len(), 2);
	assert_eq!((&snapshot[0].id, snapshot[0].content.as_str()), (&LineId::Num(1), "a"));
	assert_eq!((&snapshot[1].id, snapshot[1].content.as_str()), (&LineId::Num(2), "b"));
	assert!(std::ptr::eq(&snapshot[1], &data[1]));
}

#[test]
fn set_code_data_notifies_subscribers() {
	init_tracing();
	let viewer = Viewer::new();
	let seen: Rc<RefCell<Vec<Option<Value>>>> = Rc::default();
	let handler = {
		let seen = Rc::clone(&seen);
		Handler::new(move |payload| seen.borrow_mut().push(payload.cloned()))
	};
	viewer.events().on(CODE_DATA_CHANGED, handler);

	viewer.set_code_data(CodeData::from_text("a\nb\nc"));

	assert_eq!(*seen.borrow(), vec![Some(json!({"lines": 3}))]);
}

#[test]
fn line_number_plugin_drives_gutter() {
	init_tracing();
	let mut viewer = Viewer::new();
	viewer.set_code_data(CodeData::from_text("fn main() {\n\n}"));
	assert_eq!(viewer.gutter_width(), 0);

	viewer.install_plugin(Box::new(LineNumberPlugin)).unwrap();

	assert_eq!(viewer.plugin_state("lineNumber"), Some(PluginState::Installed));
	assert_eq!(viewer.gutter().keys(), vec![LINE_NUMBER_GUTTER_KEY]);
	assert_eq!(viewer.gutter_width(), 4);
	assert_eq!(viewer.gutter_text(0), "  1 ");
	assert_eq!(viewer.gutter_text(2), "  3 ");

	viewer.uninstall_plugin("lineNumber").unwrap();

	assert!(viewer.gutter().is_empty());
	assert_eq!(viewer.plugin_state("lineNumber"), None);
	assert_eq!(viewer.gutter_text(0), "");
}

#[test]
fn duplicate_plugin_names_are_rejected() {
	init_tracing();
	let mut viewer = Viewer::new();
	viewer.install_plugin(Box::new(LineNumberPlugin)).unwrap();

	assert_eq!(
		viewer.install_plugin(Box::new(LineNumberPlugin)),
		Err(PluginError::DuplicatePlugin("lineNumber".into()))
	);
	assert_eq!(viewer.gutter().len(), 1);
}

#[test]
fn failed_install_is_not_kept() {
	init_tracing();
	let mut viewer = Viewer::new();
	viewer.context_mut().extensions_mut().withdraw("gutter");

	let err = viewer.install_plugin(Box::new(LineNumberPlugin)).unwrap_err();

	assert_eq!(
		err,
		PluginError::MissingCapability {
			key: "gutter".into()
		}
	);
	assert_eq!(viewer.plugin_state("lineNumber"), None);
}

#[test]
fn plugin_subscriptions_follow_lifecycle() {
	init_tracing();
	let mut viewer = Viewer::new();
	let before = viewer.bus().registrations();
	let seen = Rc::default();
	viewer
		.install_plugin(Box::new(LineCounter {
			seen: Rc::clone(&seen),
			handler: RefCell::new(None),
		}))
		.unwrap();

	let payload = json!({"id": 5, "content": "x"});
	viewer.events().emit("lineAdded", Some(&payload));
	assert_eq!(*seen.borrow(), vec![payload.clone()]);

	viewer.uninstall_plugin("lineCounter").unwrap();
	viewer.events().emit("lineAdded", Some(&payload));

	assert_eq!(seen.borrow().len(), 1);
	assert_eq!(viewer.bus().registrations(), before);
}

#[test]
fn config_installs_enabled_builtins() {
	init_tracing();
	let config = Config::parse(
		r#"
events { handler-panic "propagate"; }
plugins {
    lineNumber
    minimap
    outline enabled=#false
}
"#,
	)
	.unwrap();

	let mut viewer = Viewer::new();
	let unknown = viewer.apply_config(&config).unwrap();

	assert_eq!(unknown, vec!["minimap"]);
	assert_eq!(viewer.bus().panic_policy(), HandlerPanicPolicy::Propagate);
	assert_eq!(viewer.plugins().installed().collect::<Vec<_>>(), vec!["lineNumber"]);

	// Re-applying leaves already installed plugins alone.
	assert_eq!(viewer.apply_config(&config).unwrap(), vec!["minimap"]);
	assert_eq!(viewer.gutter().len(), 1);
}

#[test]
fn from_config_uses_configured_policy() {
	init_tracing();
	let config = Config::parse("plugins { lineNumber; }").unwrap();

	let viewer = Viewer::from_config(&config).unwrap();

	assert_eq!(viewer.bus().panic_policy(), HandlerPanicPolicy::Isolate);
	assert!(viewer.gutter().contains(LINE_NUMBER_GUTTER_KEY));
}

#[test]
fn config_without_events_keeps_current_policy() {
	init_tracing();
	let config = Config::parse("plugins { lineNumber; }").unwrap();
	let mut viewer = Viewer::with_panic_policy(HandlerPanicPolicy::Propagate);

	viewer.apply_config(&config).unwrap();

	assert_eq!(viewer.bus().panic_policy(), HandlerPanicPolicy::Propagate);
	assert!(viewer.gutter().contains(LINE_NUMBER_GUTTER_KEY));
}

#[test]
fn dropping_viewer_uninstalls_plugins() {
	init_tracing();
	let seen: Rc<RefCell<Vec<Value>>> = Rc::default();
	let viewer_bus = {
		let mut viewer = Viewer::new();
		viewer
			.install_plugin(Box::new(LineCounter {
				seen: Rc::clone(&seen),
				handler: RefCell::new(None),
			}))
			.unwrap();
		assert!(viewer.bus().has_listeners("lineAdded"));
		Rc::clone(viewer.bus())
	};

	assert!(!viewer_bus.has_listeners("lineAdded"));
}
