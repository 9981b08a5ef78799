use thiserror::Error;

/// Failures raised while binding a call at plan time.
///
/// All of these mean the query itself has to be fixed; none are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("jinja_render takes at least one argument")]
    EmptyArguments,

    #[error("jinja_render: arguments must be constant (argument {index} is not)")]
    NonConstantArgument { index: usize },

    #[error("jinja_render: parameter in argument {index} has not been resolved")]
    UnresolvedParameter { index: usize },

    #[error("jinja_render: '{name}' argument must be {expected}, it is {actual}")]
    WrongArgumentType { name: &'static str, expected: &'static str, actual: String },

    /// A single element of `autoescape_extensions` is not a string.
    #[error("jinja_render: 'autoescape_extensions' child must be a string, it is {data_type} value is {value}")]
    InvalidListElement { value: String, data_type: String },

    #[error("jinja_render: Unknown argument '{alias}'")]
    UnknownArgument { alias: String },

    /// Strings handed to the rendering service cannot hold NUL bytes.
    #[error("jinja_render: '{name}' must not contain a NUL byte")]
    NulByte { name: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The number of data columns seen at execution does not match any call shape.
    #[error("Invalid number of arguments to jinja_render: {data_arity} data columns")]
    Arity { data_arity: isize },

    /// The rendering service rejected a row; carries the service message verbatim.
    #[error("Error rendering template: {0}")]
    Render(String),

    #[error("Invalid input column {index}: {reason}")]
    InvalidColumn { index: usize, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Columnar operation failed. Original error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Template loading error: {0}")]
    TemplateLoad(String),

    #[error("Failed to render. Original error: {0}")]
    Minijinja(#[from] minijinja::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with the crate error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;
