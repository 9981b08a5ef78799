use log::debug;

use crate::error::{Error, Result};

/// Which overload a call resolved to, from the number of its data columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// Template expression only; the context is `{}`.
    NoContext,
    /// Template expression and a JSON context column.
    WithContext,
}

impl CallShape {
    /// Resolves the shape of a call.
    ///
    /// # Arguments
    /// * `column_count` - Number of input columns, data and configuration
    /// * `optional_arg_count` - Number of trailing configuration columns
    ///
    /// # Returns
    /// * `Result<CallShape>` - `Error::Arity` unless exactly one or two data columns remain
    pub fn resolve(column_count: usize, optional_arg_count: usize) -> Result<Self> {
        let data_arity = column_count as isize - optional_arg_count as isize;
        let shape = match data_arity {
            1 => CallShape::NoContext,
            2 => CallShape::WithContext,
            _ => return Err(Error::Arity { data_arity }),
        };
        debug!("Resolved call shape {shape:?} from {column_count} columns");
        Ok(shape)
    }

    pub fn data_arity(&self) -> usize {
        match self {
            CallShape::NoContext => 1,
            CallShape::WithContext => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_shapes() {
        assert_eq!(CallShape::resolve(1, 0).unwrap(), CallShape::NoContext);
        assert_eq!(CallShape::resolve(2, 0).unwrap(), CallShape::WithContext);
        assert_eq!(CallShape::resolve(4, 3).unwrap(), CallShape::NoContext);
        assert_eq!(CallShape::resolve(5, 3).unwrap(), CallShape::WithContext);
    }

    #[test]
    fn test_resolve_invalid_arity() {
        assert!(matches!(CallShape::resolve(3, 0), Err(Error::Arity { data_arity: 3 })));
        assert!(matches!(CallShape::resolve(2, 2), Err(Error::Arity { data_arity: 0 })));
        assert!(matches!(CallShape::resolve(1, 2), Err(Error::Arity { data_arity: -1 })));
    }

    #[test]
    fn test_data_arity_round_trips() {
        for shape in [CallShape::NoContext, CallShape::WithContext] {
            assert_eq!(CallShape::resolve(shape.data_arity(), 0).unwrap(), shape);
        }
    }
}
