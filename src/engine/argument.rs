use arrow::datatypes::DataType;

use super::literal::Literal;

/// What the binder needs to know about one planner argument expression.
pub trait BindArgument {
    /// The name given to the argument with `name := value`, if any.
    fn alias(&self) -> Option<&str>;

    /// Type the planner resolved for the argument.
    fn data_type(&self) -> DataType;

    /// Whether the expression still contains a late-bound parameter placeholder.
    fn has_parameter(&self) -> bool;

    /// Whether the expression can be folded to a constant at plan time.
    fn is_foldable(&self) -> bool;

    /// Folds the expression to its constant value.
    ///
    /// # Returns
    /// * `Option<Literal>` - `None` when the expression is not foldable
    fn evaluate(&self) -> Option<Literal>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A reference to an input column; varies per row.
    Column { name: String },
    Literal(Literal),
    /// A prepared-statement placeholder such as `$1`.
    Parameter { name: String },
}

/// A planner expression passed as a function argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentExpr {
    pub kind: ExprKind,
    pub data_type: DataType,
    pub alias: Option<String>,
}

impl ArgumentExpr {
    pub fn column(name: impl Into<String>, data_type: DataType) -> Self {
        Self { kind: ExprKind::Column { name: name.into() }, data_type, alias: None }
    }

    pub fn literal(literal: Literal) -> Self {
        let data_type = literal.data_type();
        Self { kind: ExprKind::Literal(literal), data_type, alias: None }
    }

    /// A NULL constant that the planner has already given a type.
    pub fn typed_null(data_type: DataType) -> Self {
        Self { kind: ExprKind::Literal(Literal::Null), data_type, alias: None }
    }

    pub fn parameter(name: impl Into<String>, data_type: DataType) -> Self {
        Self { kind: ExprKind::Parameter { name: name.into() }, data_type, alias: None }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl BindArgument for ArgumentExpr {
    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn data_type(&self) -> DataType {
        self.data_type.clone()
    }

    fn has_parameter(&self) -> bool {
        matches!(self.kind, ExprKind::Parameter { .. })
    }

    fn is_foldable(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(_))
    }

    fn evaluate(&self) -> Option<Literal> {
        match &self.kind {
            ExprKind::Literal(literal) => Some(literal.clone()),
            ExprKind::Column { .. } | ExprKind::Parameter { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_foldable() {
        let arg = ArgumentExpr::literal(Literal::Boolean(false)).with_alias("autoescape");
        assert!(arg.is_foldable());
        assert!(!arg.has_parameter());
        assert_eq!(arg.alias(), Some("autoescape"));
        assert_eq!(arg.data_type(), DataType::Boolean);
        assert_eq!(arg.evaluate(), Some(Literal::Boolean(false)));
    }

    #[test]
    fn test_column_is_not_foldable() {
        let arg = ArgumentExpr::column("tmpl", DataType::Utf8);
        assert!(!arg.is_foldable());
        assert_eq!(arg.evaluate(), None);
        assert_eq!(arg.alias(), None);
    }

    #[test]
    fn test_parameter_is_reported() {
        let arg = ArgumentExpr::parameter("$1", DataType::Boolean);
        assert!(arg.has_parameter());
        assert!(!arg.is_foldable());
    }

    #[test]
    fn test_typed_null_keeps_declared_type() {
        let arg = ArgumentExpr::typed_null(DataType::Utf8);
        assert_eq!(arg.data_type(), DataType::Utf8);
        assert_eq!(arg.evaluate(), Some(Literal::Null));
    }
}
