//! Columnar Jinja template rendering for query engines.
//!
//! `jinja_render(template [, context_json], autoescape := true, template_path := '',
//! autoescape_extensions := [])` renders one template per row. Named arguments are
//! folded into a [`config::RenderConfig`] at bind time; each batch is then rendered
//! row by row through the rendering service behind [`ffi`].

/// Bind-time resolution of the named arguments.
pub mod config;

/// Crate-wide names and message prefixes.
pub mod constants;

/// The slice of the query engine the function depends on.
pub mod engine;

/// Defines custom error types.
pub mod error;

/// Row-wise rendering of columnar batches.
pub mod executor;

/// A set of helpers for working with the file system.
pub mod ext;

/// C ABI of the rendering service.
pub mod ffi;

/// Template rendering service.
pub mod renderer;

/// The function as seen by an engine adapter.
pub mod udf;

pub use config::{bind, RenderConfig};
pub use error::{BindError, Error, Result};
pub use executor::{render_batch, CallShape};
pub use udf::{BoundJinjaRender, JinjaRender};
