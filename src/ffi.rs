//! C ABI of the rendering service
//!
//! A caller builds one renderer per call with `jinja_renderer_new` and renders rows
//! through it. Each render hands out a heap-allocated C string inside a tagged
//! result; every result must be given back to `jinja_free_render_result` exactly
//! once, whatever its tag.

use std::ffi::{c_char, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::{
    config::RenderConfig,
    renderer::{describe_error, MiniJinjaRenderer, RenderRequest},
};

/// Tagged result of one render: the rendered text or an error message.
///
/// The active pointer is a NUL-terminated string owned by this library.
#[repr(C)]
#[derive(Debug)]
pub enum RawRenderResult {
    Ok(*mut c_char),
    Err(*mut c_char),
}

impl RawRenderResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, RawRenderResult::Ok(_))
    }

    fn ok(text: String) -> Self {
        RawRenderResult::Ok(into_raw_c_string(text))
    }

    fn err(message: String) -> Self {
        RawRenderResult::Err(into_raw_c_string(message))
    }
}

/// Interior NUL bytes cannot cross the boundary and are dropped.
fn into_raw_c_string(text: String) -> *mut c_char {
    let bytes: Vec<u8> = text.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

unsafe fn str_from_parts<'a>(ptr: *const c_char, len: usize, what: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Ok("");
    }
    let bytes = std::slice::from_raw_parts(ptr as *const u8, len);
    std::str::from_utf8(bytes).map_err(|e| format!("{what} is not valid UTF-8: {e}"))
}

unsafe fn str_from_c<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Ok("");
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|e| format!("{what} is not valid UTF-8: {e}"))
}

unsafe fn config_from_c(
    template_path: *const c_char,
    autoescape: bool,
    autoescape_extensions: *const *const c_char,
    autoescape_extension_count: usize,
) -> Result<RenderConfig, String> {
    let mut config = RenderConfig {
        template_path: str_from_c(template_path, "template path")?.to_string(),
        autoescape,
        ..RenderConfig::default()
    };
    if !autoescape_extensions.is_null() {
        let pointers = std::slice::from_raw_parts(autoescape_extensions, autoescape_extension_count);
        for &pointer in pointers.iter().filter(|p| !p.is_null()) {
            let extension = str_from_c(pointer, "autoescape extension")?;
            config.autoescape_extensions.push(extension.to_string());
        }
    }
    Ok(config)
}

/// Runs one render, turning a panic into an error result.
fn guarded(render: impl FnOnce() -> Result<String, String>) -> RawRenderResult {
    match catch_unwind(AssertUnwindSafe(render)) {
        Ok(Ok(text)) => RawRenderResult::ok(text),
        Ok(Err(message)) => RawRenderResult::err(message),
        Err(_) => RawRenderResult::err("rendering panicked".to_string()),
    }
}

/// Builds a renderer for one call, loading the templates under `template_path` once.
///
/// Returns null when an option is not valid UTF-8. A template path that cannot be
/// loaded still yields a renderer; every render through it then fails with the
/// loading error.
///
/// # Safety
/// Same pointer rules as [`jinja_render_template`]. A non-null result must be passed
/// to [`jinja_renderer_free`] exactly once.
#[no_mangle]
pub unsafe extern "C" fn jinja_renderer_new(
    template_path: *const c_char,
    autoescape: bool,
    autoescape_extensions: *const *const c_char,
    autoescape_extension_count: usize,
) -> *mut MiniJinjaRenderer {
    let built = catch_unwind(AssertUnwindSafe(|| {
        config_from_c(template_path, autoescape, autoescape_extensions, autoescape_extension_count)
            .map(|config| MiniJinjaRenderer::new(&config))
    }));
    match built {
        Ok(Ok(renderer)) => Box::into_raw(Box::new(renderer)),
        _ => std::ptr::null_mut(),
    }
}

/// Renders one row with a renderer from [`jinja_renderer_new`].
///
/// # Safety
/// `renderer` must be a live result of [`jinja_renderer_new`]. The expression and
/// context pointers must be valid for their lengths. The returned result must be
/// passed to [`jinja_free_render_result`] exactly once.
#[no_mangle]
pub unsafe extern "C" fn jinja_renderer_render(
    renderer: *const MiniJinjaRenderer,
    expression: *const c_char,
    expression_len: usize,
    context_json: *const c_char,
    context_json_len: usize,
) -> RawRenderResult {
    guarded(|| {
        let renderer = renderer.as_ref().ok_or_else(|| "renderer is null".to_string())?;
        let expression = str_from_parts(expression, expression_len, "template expression")?;
        let context_json = str_from_parts(context_json, context_json_len, "template context")?;
        renderer
            .render(&RenderRequest::new(expression, context_json))
            .map_err(|e| describe_error(&e))
    })
}

/// Frees a renderer built by [`jinja_renderer_new`]. Null is ignored.
///
/// # Safety
/// `renderer` must come from [`jinja_renderer_new`] and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn jinja_renderer_free(renderer: *mut MiniJinjaRenderer) {
    if !renderer.is_null() {
        drop(Box::from_raw(renderer));
    }
}

/// Renders a template with context variables provided as JSON, in a single call.
///
/// Builds a throwaway renderer, so templates under `template_path` are loaded on
/// every call; batch callers use [`jinja_renderer_new`] instead.
///
/// # Arguments
/// * `expression` / `expression_len` - Template source, or template name when `template_path` is set
/// * `context_json` / `context_json_len` - JSON text of the context
/// * `template_path` - NUL-terminated template location; null or empty renders `expression` directly
/// * `autoescape` - Whether autoescaping is enabled
/// * `autoescape_extensions` / `autoescape_extension_count` - NUL-terminated name suffixes that trigger autoescaping
///
/// # Safety
/// Every non-null pointer must be valid for the given length (or up to its NUL
/// terminator) for the duration of the call. The returned result must be passed to
/// [`jinja_free_render_result`] exactly once.
#[no_mangle]
pub unsafe extern "C" fn jinja_render_template(
    expression: *const c_char,
    expression_len: usize,
    context_json: *const c_char,
    context_json_len: usize,
    template_path: *const c_char,
    autoescape: bool,
    autoescape_extensions: *const *const c_char,
    autoescape_extension_count: usize,
) -> RawRenderResult {
    guarded(|| {
        let expression = str_from_parts(expression, expression_len, "template expression")?;
        let context_json = str_from_parts(context_json, context_json_len, "template context")?;
        let config = config_from_c(
            template_path,
            autoescape,
            autoescape_extensions,
            autoescape_extension_count,
        )?;
        MiniJinjaRenderer::new(&config)
            .render(&RenderRequest::new(expression, context_json))
            .map_err(|e| describe_error(&e))
    })
}

/// Frees the strings held by a result of [`jinja_render_template`].
///
/// # Safety
/// The caller must ensure that:
/// - The result was created by this library
/// - The result is not used after calling this function
/// - This function is called exactly once for each result
#[no_mangle]
pub unsafe extern "C" fn jinja_free_render_result(result: RawRenderResult) {
    match result {
        RawRenderResult::Ok(ptr) | RawRenderResult::Err(ptr) => {
            if !ptr.is_null() {
                drop(CString::from_raw(ptr));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take(result: RawRenderResult) -> (bool, String) {
        let (ok, ptr) = match &result {
            RawRenderResult::Ok(ptr) => (true, *ptr),
            RawRenderResult::Err(ptr) => (false, *ptr),
        };
        let text = CStr::from_ptr(ptr).to_string_lossy().into_owned();
        jinja_free_render_result(result);
        (ok, text)
    }

    #[test]
    fn test_render_through_c_abi() {
        let expression = "Hello, {{ name }}!";
        let context = r#"{"name": "World"}"#;
        let (ok, text) = unsafe {
            take(jinja_render_template(
                expression.as_ptr() as *const c_char,
                expression.len(),
                context.as_ptr() as *const c_char,
                context.len(),
                std::ptr::null(),
                false,
                std::ptr::null(),
                0,
            ))
        };
        assert!(ok);
        assert_eq!(text, "Hello, World!");
    }

    #[test]
    fn test_render_error_through_c_abi() {
        let expression = "{{ x }}";
        let context = "not json";
        let path = CString::new("").unwrap();
        let (ok, text) = unsafe {
            take(jinja_render_template(
                expression.as_ptr() as *const c_char,
                expression.len(),
                context.as_ptr() as *const c_char,
                context.len(),
                path.as_ptr(),
                true,
                std::ptr::null(),
                0,
            ))
        };
        assert!(!ok);
        assert!(text.starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_renderer_handle_renders_rows() {
        let path = CString::new("").unwrap();
        let renderer = unsafe { jinja_renderer_new(path.as_ptr(), true, std::ptr::null(), 0) };
        assert!(!renderer.is_null());

        for (context, expected) in [(r#"{"x": "<b>"}"#, "&lt;b&gt;"), (r#"{"x": 1}"#, "1")] {
            let expression = "{{ x }}";
            let (ok, text) = unsafe {
                take(jinja_renderer_render(
                    renderer,
                    expression.as_ptr() as *const c_char,
                    expression.len(),
                    context.as_ptr() as *const c_char,
                    context.len(),
                ))
            };
            assert!(ok);
            assert_eq!(text, expected);
        }
        unsafe { jinja_renderer_free(renderer) };
    }

    #[test]
    fn test_renderer_handle_reports_load_error_per_row() {
        let path = CString::new("/no/such/templates").unwrap();
        let renderer = unsafe { jinja_renderer_new(path.as_ptr(), true, std::ptr::null(), 0) };
        let expression = "page.html";
        let context = "{}";
        let (ok, text) = unsafe {
            take(jinja_renderer_render(
                renderer,
                expression.as_ptr() as *const c_char,
                expression.len(),
                context.as_ptr() as *const c_char,
                context.len(),
            ))
        };
        unsafe { jinja_renderer_free(renderer) };
        assert!(!ok);
        assert!(text.starts_with("Template loading error: "));
    }

    #[test]
    fn test_render_with_null_renderer_fails() {
        let (ok, text) = unsafe {
            take(jinja_renderer_render(std::ptr::null(), std::ptr::null(), 0, std::ptr::null(), 0))
        };
        assert!(!ok);
        assert_eq!(text, "renderer is null");
    }

    #[test]
    fn test_nul_bytes_are_dropped() {
        let ptr = into_raw_c_string("a\0b".to_string());
        let (_, text) = unsafe { take(RawRenderResult::Ok(ptr)) };
        assert_eq!(text, "ab");
    }

    #[test]
    fn test_free_null_pointer_is_noop() {
        unsafe { jinja_free_render_result(RawRenderResult::Err(std::ptr::null_mut())) };
    }
}
