//! Constants used throughout the jinja_render function

/// Name under which the function is exposed to the query engine
pub const FUNCTION_NAME: &str = "jinja_render";

/// Context used when the call has no JSON context column
pub const DEFAULT_CONTEXT_JSON: &str = "{}";

/// Names of the recognized named (aliased) arguments
pub mod arguments {
    pub const AUTOESCAPE: &str = "autoescape";
    pub const TEMPLATE_PATH: &str = "template_path";
    pub const AUTOESCAPE_EXTENSIONS: &str = "autoescape_extensions";
}

/// Prefixes of the messages produced by the rendering service
pub mod messages {
    pub const RENDER: &str = "Render error";
    pub const CAUSED_BY: &str = "Caused by";
}
