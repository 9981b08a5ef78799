use crate::constants::FUNCTION_NAME;

/// Whether repeated calls with the same inputs may be folded by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Volatility {
    Immutable,
    Stable,
    Volatile,
}

/// How the engine treats NULL inputs of the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullHandling {
    /// The engine short-circuits NULL inputs to a NULL result.
    Default,
    /// The function inspects NULL inputs itself.
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    Varchar,
    /// Text that the engine has tagged as JSON.
    Json,
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overload {
    pub arguments: Vec<ArgumentType>,
    /// Type accepted by the trailing named arguments.
    pub varargs: Option<ArgumentType>,
    pub return_type: ArgumentType,
}

/// Registration metadata of the function set handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub name: &'static str,
    pub overloads: Vec<Overload>,
    pub volatility: Volatility,
    pub null_handling: NullHandling,
}

impl FunctionDefinition {
    /// The two call shapes: template only, and template with a JSON context.
    pub fn jinja_render() -> Self {
        let overload = |arguments: Vec<ArgumentType>| Overload {
            arguments,
            varargs: Some(ArgumentType::Any),
            return_type: ArgumentType::Varchar,
        };
        Self {
            name: FUNCTION_NAME,
            overloads: vec![
                overload(vec![ArgumentType::Varchar, ArgumentType::Json]),
                overload(vec![ArgumentType::Varchar]),
            ],
            volatility: Volatility::Volatile,
            null_handling: NullHandling::Special,
        }
    }
}
