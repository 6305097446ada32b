//! Plugin contract for the code viewer.
//!
//! A [`Plugin`] is a named unit that registers extensions through a
//! [`PluginContext`] on install and removes them again on uninstall. The context
//! bundles a restricted event bus view, read access to the current
//! [`CodeData`](codeview_primitives::CodeData), and a typed capability registry
//! ([`Extensions`]) through which hosts expose extension points such as gutter
//! registration.
//!
//! Hosts that manage several plugins use [`PluginManager`], which enforces unique
//! names and tracks each plugin's [`PluginState`].

mod capability;
mod context;
pub mod error;
mod manager;
mod plugin;

pub use capability::{CapabilityKey, Extensions};
pub use context::{CodeSource, PluginContext};
pub use error::{PluginError, Result};
pub use manager::PluginManager;
pub use plugin::{Plugin, PluginState};
