//! Execution of a bound `jinja_render` call over columnar batches
//!
//! - `shape`: Resolution of the call shape from the column count
//! - `batch`: The per-row render loop

pub mod batch;
pub mod shape;

pub use batch::{render_batch, render_batch_with, render_shaped};
pub use shape::CallShape;
