//! The slice of the query engine this function depends on
//!
//! - `literal`: constant values folded from bind arguments
//! - `argument`: planner argument expressions as seen by the binder
//! - `function`: registration metadata of the function set

pub mod argument;
pub mod function;
pub mod literal;

pub use argument::{ArgumentExpr, BindArgument, ExprKind};
pub use function::{ArgumentType, FunctionDefinition, NullHandling, Overload, Volatility};
pub use literal::Literal;
