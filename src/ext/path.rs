use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide conversions used when loading templates
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Returns
    /// * `Ok(&str)` - A string slice representing the path
    /// * `Err(Error)` - If the path contains invalid Unicode characters
    ///
    /// # Examples
    /// ```
    /// use jinja_render::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Name under which a template file is registered: the path relative to the
    /// search root, with `/` separators on every platform.
    ///
    /// # Examples
    /// ```
    /// use jinja_render::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("templates/mail/welcome.html");
    /// let name = path.to_template_name(Path::new("templates")).unwrap();
    /// assert_eq!(name, "mail/welcome.html");
    /// ```
    fn to_template_name(&self, root: &Path) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::TemplateLoad(format!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn to_template_name(&self, root: &Path) -> Result<String> {
        let relative = self.strip_prefix(root).unwrap_or(self);
        Ok(relative.to_str_checked()?.replace('\\', "/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_to_str_checked_valid() {
        let path = Path::new("valid_path");
        assert_eq!(path.to_str_checked().unwrap(), "valid_path");
    }

    #[test]
    fn test_to_template_name_strips_root() {
        let path = Path::new("root/a/b.txt");
        assert_eq!(path.to_template_name(Path::new("root")).unwrap(), "a/b.txt");
    }

    #[test]
    fn test_to_template_name_outside_root() {
        let path = Path::new("other/b.txt");
        assert_eq!(path.to_template_name(Path::new("root")).unwrap(), "other/b.txt");
    }
}
