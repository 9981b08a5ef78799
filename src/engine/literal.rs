use std::fmt;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field};

/// A constant value produced by folding a bind argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Long(i64),
    Double(f64),
    String(String),
    Array { element_type: DataType, elements: Vec<Literal> },
}

impl Literal {
    /// Builds a string list literal, the shape expected by `autoescape_extensions`.
    pub fn string_array<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Literal::Array {
            element_type: DataType::Utf8,
            elements: values.into_iter().map(|v| Literal::String(v.into())).collect(),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Literal::Null => DataType::Null,
            Literal::Boolean(_) => DataType::Boolean,
            Literal::Long(_) => DataType::Int64,
            Literal::Double(_) => DataType::Float64,
            Literal::String(_) => DataType::Utf8,
            Literal::Array { element_type, .. } => {
                DataType::List(Arc::new(Field::new("item", element_type.clone(), true)))
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Boolean(v) => write!(f, "{v}"),
            Literal::Long(v) => write!(f, "{v}"),
            Literal::Double(v) => write!(f, "{v}"),
            Literal::String(v) => write!(f, "{v}"),
            Literal::Array { elements, .. } => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_array_data_type() {
        let literal = Literal::string_array([".html", ".xml"]);
        match literal.data_type() {
            DataType::List(field) => assert_eq!(field.data_type(), &DataType::Utf8),
            other => panic!("unexpected type {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::Long(3).to_string(), "3");
        assert_eq!(Literal::Null.to_string(), "NULL");
        assert_eq!(Literal::string_array(["a", "b"]).to_string(), "[a, b]");
    }
}
