//! Loading of templates from a `template_path` override
//!
//! A template path is either a plain location (a directory searched lazily, or a
//! single file) or a glob such as `templates/**/*.html`. Glob matches are
//! registered eagerly under their path relative to the non-glob prefix.

use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use log::{debug, warn};
use minijinja::Environment;
use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    ext::PathExt,
};

const GLOB_META_CHARS: &[char] = &['*', '?', '[', ']', '{', '}'];

fn is_glob_component(component: &str) -> bool {
    component.contains(GLOB_META_CHARS)
}

/// Splits a glob into the directory to walk and the pattern relative to it.
fn split_glob(template_path: &str) -> Result<(PathBuf, String)> {
    let mut root = PathBuf::new();
    let mut pattern: Vec<&str> = Vec::new();
    for component in Path::new(template_path).components() {
        let part = match component {
            Component::Normal(part) => Path::new(part).to_str_checked()?,
            other => {
                if pattern.is_empty() {
                    root.push(other.as_os_str());
                    continue;
                }
                Path::new(other.as_os_str()).to_str_checked()?
            }
        };
        if pattern.is_empty() && !is_glob_component(part) {
            root.push(part);
        } else {
            pattern.push(part);
        }
    }
    if root.as_os_str().is_empty() {
        root.push(".");
    }
    Ok((root, pattern.join("/")))
}

/// Makes the templates under `template_path` available to `env`.
///
/// # Arguments
/// * `env` - Environment the templates are registered in
/// * `template_path` - Directory, file, or glob to load templates from
///
/// # Returns
/// * `Result<()>` - `Error::TemplateLoad` when the location is missing or a template fails to parse
pub fn load_templates(env: &mut Environment<'static>, template_path: &str) -> Result<()> {
    if !is_glob_component(template_path) {
        let path = Path::new(template_path);
        if path.is_dir() {
            debug!("Loading templates lazily from directory {}", path.display());
            env.set_loader(minijinja::path_loader(path.to_path_buf()));
            return Ok(());
        }
        if path.is_file() {
            let root = path.parent().unwrap_or_else(|| Path::new(""));
            return add_template_file(env, path, root);
        }
        return Err(Error::TemplateLoad(format!(
            "template path '{template_path}' does not exist"
        )));
    }

    let (root, pattern) = split_glob(template_path)?;
    let matcher = GlobBuilder::new(&pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::TemplateLoad(e.to_string()))?
        .compile_matcher();
    debug!("Loading templates matching '{pattern}' under {}", root.display());

    for dir_entry in WalkDir::new(&root).follow_links(true) {
        let entry = dir_entry.map_err(|e| Error::TemplateLoad(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
        if matcher.is_match(relative) {
            add_template_file(env, entry.path(), &root)?;
        }
    }
    Ok(())
}

fn add_template_file(env: &mut Environment<'static>, path: &Path, root: &Path) -> Result<()> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            warn!("Skipping unreadable template {}: {err}", path.display());
            return Ok(());
        }
    };
    let name = path.to_template_name(root)?;
    debug!("Registering template '{name}'");
    env.add_template_owned(name, source)
        .map_err(|e| Error::TemplateLoad(e.to_string()))
}
