//! Row-wise rendering of one columnar batch

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray, StringBuilder};
use arrow::buffer::NullBuffer;
use arrow::compute::cast;
use arrow::datatypes::DataType;
use log::{debug, trace};

use super::shape::CallShape;
use crate::{
    config::RenderConfig,
    constants::DEFAULT_CONTEXT_JSON,
    error::{Error, Result},
    renderer::{NativeRenderService, OwnedRenderResult, RenderRequest, RenderService},
};

/// Renders every row of a batch through the native rendering service.
///
/// # Arguments
/// * `config` - Configuration of the bound call
/// * `input_columns` - Data columns followed by the configuration columns
/// * `row_count` - Number of rows in the batch
///
/// # Returns
/// * `Result<ArrayRef>` - A `Utf8` column with one rendered value per row
pub fn render_batch(
    config: &RenderConfig,
    input_columns: &[ArrayRef],
    row_count: usize,
) -> Result<ArrayRef> {
    let shape = CallShape::resolve(input_columns.len(), config.optional_arg_count)?;
    let service = NativeRenderService::new(config)?;
    render_shaped(&service, shape, config, input_columns, row_count)
}

/// Same as [`render_batch`] with an explicit rendering service.
pub fn render_batch_with<S: RenderService + ?Sized>(
    service: &S,
    config: &RenderConfig,
    input_columns: &[ArrayRef],
    row_count: usize,
) -> Result<ArrayRef> {
    let shape = CallShape::resolve(input_columns.len(), config.optional_arg_count)?;
    render_shaped(service, shape, config, input_columns, row_count)
}

/// Renders a batch of a call whose shape is already resolved.
///
/// A row with a NULL in any input column yields NULL without calling the service.
/// The first row the service rejects fails the whole batch with `Error::Render`.
/// Columns that disagree with `shape` fail with `Error::Arity`.
pub fn render_shaped<S: RenderService + ?Sized>(
    service: &S,
    shape: CallShape,
    config: &RenderConfig,
    input_columns: &[ArrayRef],
    row_count: usize,
) -> Result<ArrayRef> {
    if input_columns.len() != shape.data_arity() + config.optional_arg_count {
        return Err(Error::Arity {
            data_arity: input_columns.len() as isize - config.optional_arg_count as isize,
        });
    }
    for (index, column) in input_columns.iter().enumerate() {
        if column.len() != row_count && column.len() != 1 {
            return Err(Error::InvalidColumn {
                index,
                reason: format!("expected {row_count} rows, got {}", column.len()),
            });
        }
    }

    let expressions = string_column(&input_columns[0], 0)?;
    let expressions = downcast_strings(&expressions, 0)?;
    let contexts = match shape {
        CallShape::WithContext => Some(string_column(&input_columns[1], 1)?),
        CallShape::NoContext => None,
    };
    let contexts = contexts.as_ref().map(|c| downcast_strings(c, 1)).transpose()?;
    debug!("Rendering {row_count} rows as {shape:?}");

    let nulls: Vec<NullBuffer> =
        input_columns.iter().filter_map(|column| column.logical_nulls()).collect();

    let mut builder = StringBuilder::with_capacity(row_count, 0);
    for row in 0..row_count {
        if nulls.iter().any(|n| n.is_null(broadcast(n.len(), row))) {
            trace!("Row {row} has a NULL input, skipping");
            builder.append_null();
            continue;
        }

        let expression = expressions.value(broadcast(expressions.len(), row));
        let context_json = match contexts {
            Some(contexts) => contexts.value(broadcast(contexts.len(), row)),
            None => DEFAULT_CONTEXT_JSON,
        };
        trace!("Rendering row {row}");
        let request = RenderRequest::new(expression, context_json);
        OwnedRenderResult::render(service, &request)
            .commit(&mut builder)
            .map_err(Error::Render)?;
    }

    Ok(Arc::new(builder.finish()))
}

/// Row index into a column that may hold a single broadcast value.
fn broadcast(len: usize, row: usize) -> usize {
    if len == 1 {
        0
    } else {
        row
    }
}

fn string_column(column: &ArrayRef, index: usize) -> Result<ArrayRef> {
    match column.data_type() {
        DataType::Utf8 => Ok(Arc::clone(column)),
        DataType::LargeUtf8 | DataType::Utf8View | DataType::Null => {
            Ok(cast(column, &DataType::Utf8)?)
        }
        other => Err(Error::InvalidColumn {
            index,
            reason: format!("expected a string column, got {other}"),
        }),
    }
}

fn downcast_strings(column: &ArrayRef, index: usize) -> Result<&StringArray> {
    column.as_any().downcast_ref::<StringArray>().ok_or_else(|| Error::InvalidColumn {
        index,
        reason: "downcast to StringArray failed".to_string(),
    })
}
