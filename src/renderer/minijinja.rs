use std::error::Error as _;

use log::{debug, trace};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use super::{interface::RenderRequest, loader::load_templates};
use crate::{
    config::RenderConfig,
    constants::messages,
    error::{Error, Result},
};

/// MiniJinja-based template rendering engine, configured for one bound call.
///
/// Templates under `template_path` are loaded once, when the renderer is built,
/// and reused for every request.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
    uses_template_path: bool,
    /// Reported by every request when the templates could not be loaded
    load_error: Option<String>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer for the options of one call.
    ///
    /// Undefined variables are errors. With an empty `template_path` the expression is
    /// the template source and is HTML-escaped iff `autoescape` is set. Otherwise the
    /// expression names a template loaded from `template_path`, escaped only when its
    /// name ends with one of the `autoescape_extensions`.
    pub fn new(config: &RenderConfig) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        if !config.uses_template_path() {
            let auto_escape = if config.autoescape { AutoEscape::Html } else { AutoEscape::None };
            env.set_auto_escape_callback(move |_| auto_escape.clone());
            return Self { env, uses_template_path: false, load_error: None };
        }

        let extensions = if config.autoescape {
            config.autoescape_extensions.clone()
        } else {
            Vec::new()
        };
        env.set_auto_escape_callback(move |name| {
            if extensions.iter().any(|extension| name.ends_with(extension.as_str())) {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        let load_error = match load_templates(&mut env, &config.template_path) {
            Ok(()) => None,
            Err(Error::TemplateLoad(message)) => Some(message),
            Err(other) => Some(other.to_string()),
        };
        if let Some(message) = &load_error {
            debug!("Templates under '{}' failed to load: {message}", config.template_path);
        }
        Self { env, uses_template_path: true, load_error }
    }

    /// Renders one request.
    ///
    /// # Arguments
    /// * `request` - Expression and JSON context of the row
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    pub fn render(&self, request: &RenderRequest<'_>) -> Result<String> {
        let context = parse_context(request.context_json)?;
        if let Some(message) = &self.load_error {
            return Err(Error::TemplateLoad(message.clone()));
        }

        if !self.uses_template_path {
            trace!("Rendering inline template");
            return Ok(self.env.render_str(request.expression, context)?);
        }
        trace!("Rendering template '{}'", request.expression);
        let tmpl = self.env.get_template(request.expression)?;
        Ok(tmpl.render(context)?)
    }
}

/// Parses the JSON context; anything but an object yields an empty context.
fn parse_context(context_json: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(context_json)?;
    Ok(match value {
        serde_json::Value::Object(_) => value,
        _ => serde_json::Value::Object(serde_json::Map::new()),
    })
}

/// Formats an error the way the rendering service reports it, one line per cause.
pub fn describe_error(err: &Error) -> String {
    match err {
        Error::Minijinja(e) => {
            let mut lines = vec![format!("{}: {e}", messages::RENDER)];
            let mut source = e.source();
            while let Some(cause) = source {
                lines.push(format!("{}: {cause}", messages::CAUSED_BY));
                source = cause.source();
            }
            lines.join("\n")
        }
        other => other.to_string(),
    }
}
