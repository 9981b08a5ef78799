//! Bind-time configuration of a `jinja_render` call
//!
//! This module contains the configuration system components:
//! - `types`: The immutable per-call `RenderConfig`
//! - `binder`: Validation of the named arguments and their folding into a config

pub mod binder;
pub mod types;


pub use binder::{bind, ConfigArgument};
pub use types::RenderConfig;
