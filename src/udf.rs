//! The `jinja_render` function as handed to a query engine adapter

use arrow::array::ArrayRef;
use log::debug;

use crate::{
    config::{bind, RenderConfig},
    engine::{BindArgument, FunctionDefinition},
    error::Result,
    executor::{render_shaped, CallShape},
    renderer::NativeRenderService,
};

/// Entry point an engine adapter registers: the definition plus the bind step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JinjaRender {
    definition: FunctionDefinition,
}

impl JinjaRender {
    pub fn new() -> Self {
        Self { definition: FunctionDefinition::jinja_render() }
    }

    pub fn definition(&self) -> &FunctionDefinition {
        &self.definition
    }

    /// Binds one call site. The result can be cloned or compared by the planner.
    pub fn bind<A: BindArgument>(&self, arguments: &[A]) -> Result<BoundJinjaRender> {
        let config = bind(arguments)?;
        let shape = match CallShape::resolve(arguments.len(), config.optional_arg_count) {
            Ok(shape) => Some(shape),
            Err(err) => {
                // Reported again when the call executes.
                debug!("{err}");
                None
            }
        };
        debug!("Bound {} with {} arguments", self.definition.name, arguments.len());
        Ok(BoundJinjaRender { config, shape })
    }
}

impl Default for JinjaRender {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound call site; owns its configuration for the lifetime of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundJinjaRender {
    config: RenderConfig,
    /// `None` when the bound arguments match no call shape
    shape: Option<CallShape>,
}

impl BoundJinjaRender {
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn shape(&self) -> Option<CallShape> {
        self.shape
    }

    /// Renders one batch.
    ///
    /// # Arguments
    /// * `input_columns` - All argument columns, in call order
    /// * `row_count` - Number of rows in the batch
    ///
    /// # Returns
    /// * `Result<ArrayRef>` - The rendered `Utf8` column
    pub fn invoke(&self, input_columns: &[ArrayRef], row_count: usize) -> Result<ArrayRef> {
        let shape = match self.shape {
            Some(shape) => shape,
            None => CallShape::resolve(input_columns.len(), self.config.optional_arg_count)?,
        };
        let service = NativeRenderService::new(&self.config)?;
        render_shaped(&service, shape, &self.config, input_columns, row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ArgumentExpr, Literal, Volatility};
    use arrow::array::StringArray;
    use arrow::datatypes::DataType;
    use std::sync::Arc;

    #[test]
    fn test_bind_and_invoke() {
        let function = JinjaRender::new();
        assert_eq!(function.definition().volatility, Volatility::Volatile);

        let bound = function
            .bind(&[
                ArgumentExpr::column("t", DataType::Utf8),
                ArgumentExpr::literal(Literal::Boolean(false)).with_alias("autoescape"),
            ])
            .unwrap();
        assert_eq!(bound.config().optional_arg_count, 1);
        assert_eq!(bound.shape(), Some(CallShape::NoContext));
        assert_eq!(bound, bound.clone());

        let templates: ArrayRef = Arc::new(StringArray::from(vec!["<{{ 'x' }}>"]));
        let autoescape: ArrayRef = Arc::new(arrow::array::BooleanArray::from(vec![false]));
        let output = bound.invoke(&[templates, autoescape], 1).unwrap();
        let output = output.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(output.value(0), "<x>");
    }

    #[test]
    fn test_bind_without_call_shape_fails_on_invoke() {
        let bound = JinjaRender::new()
            .bind(&[
                ArgumentExpr::column("t", DataType::Utf8),
                ArgumentExpr::column("c", DataType::Utf8),
                ArgumentExpr::literal(Literal::Long(3)),
            ])
            .unwrap();
        assert_eq!(bound.shape(), None);

        let column: ArrayRef = Arc::new(StringArray::from(vec!["x"]));
        let err = bound.invoke(&[column.clone(), column.clone(), column], 1).unwrap_err();
        assert!(matches!(err, crate::Error::Arity { data_arity: 3 }));
    }

    #[test]
    fn test_invoke_rejects_columns_of_another_shape() {
        let bound =
            JinjaRender::new().bind(&[ArgumentExpr::column("t", DataType::Utf8)]).unwrap();
        let column: ArrayRef = Arc::new(StringArray::from(vec!["x"]));
        let err = bound.invoke(&[column.clone(), column], 1).unwrap_err();
        assert!(matches!(err, crate::Error::Arity { data_arity: 2 }));
    }
}
