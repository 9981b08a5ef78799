//! Template rendering service behind the `jinja_render` function
//!
//! The module is structured as:
//! - `interface`: The request type and the `RenderService` boundary trait
//! - `minijinja`: MiniJinja-based rendering of one request
//! - `loader`: Loading of templates from a `template_path` override
//! - `native`: The service reached through the C ABI, and the guard owning its results

pub mod interface;
pub mod loader;
pub mod minijinja;
pub mod native;

pub use interface::{RenderRequest, RenderService};
pub use self::minijinja::{describe_error, MiniJinjaRenderer};
pub use native::{NativeRenderService, OwnedRenderResult};
