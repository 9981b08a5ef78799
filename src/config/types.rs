//! Per-call configuration resolved at bind time

use serde::{Deserialize, Serialize};

/// Options folded from the constant named arguments of one bound call.
///
/// Immutable once built; shared read-only by every row and batch of the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Location templates are loaded from. Empty means the expression is the template source.
    #[serde(default)]
    pub template_path: String,
    #[serde(default = "get_default_autoescape")]
    pub autoescape: bool,
    /// Template name suffixes that turn autoescaping on when loading from `template_path`.
    #[serde(default)]
    pub autoescape_extensions: Vec<String>,
    /// Number of trailing arguments that are configuration, not data columns.
    #[serde(default)]
    pub optional_arg_count: usize,
}

pub fn get_default_autoescape() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template_path: String::new(),
            autoescape: get_default_autoescape(),
            autoescape_extensions: Vec::new(),
            optional_arg_count: 0,
        }
    }
}

impl RenderConfig {
    /// Whether templates come from `template_path` rather than the expression itself.
    pub fn uses_template_path(&self) -> bool {
        !self.template_path.is_empty()
    }
}
