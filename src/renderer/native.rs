use std::ffi::{c_char, CStr, CString};
use std::ptr::NonNull;

use arrow::array::StringBuilder;
use log::debug;

use super::{
    interface::{RenderRequest, RenderService},
    minijinja::MiniJinjaRenderer,
};
use crate::{
    config::RenderConfig,
    error::{Error, Result},
    ffi::{
        jinja_free_render_result, jinja_renderer_free, jinja_renderer_new, jinja_renderer_render,
        RawRenderResult,
    },
};

/// Rendering service reached through the library's C ABI.
///
/// The call options cross the boundary once; templates are loaded when the service is
/// built and reused for every row it renders.
pub struct NativeRenderService {
    renderer: NonNull<MiniJinjaRenderer>,
}

impl NativeRenderService {
    pub fn new(config: &RenderConfig) -> Result<Self> {
        let template_path = CString::new(config.template_path.as_str()).map_err(|_| {
            Error::InvalidArgument("template_path contains a NUL byte".to_string())
        })?;
        let extensions = config
            .autoescape_extensions
            .iter()
            .map(|extension| {
                CString::new(extension.as_str()).map_err(|_| {
                    Error::InvalidArgument(format!(
                        "autoescape extension '{}' contains a NUL byte",
                        extension.escape_debug()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let extension_ptrs: Vec<*const c_char> =
            extensions.iter().map(|extension| extension.as_ptr()).collect();

        // SAFETY: the options are only read during the call, while the CStrings are alive.
        let renderer = unsafe {
            jinja_renderer_new(
                template_path.as_ptr(),
                config.autoescape,
                extension_ptrs.as_ptr(),
                extension_ptrs.len(),
            )
        };
        let renderer = NonNull::new(renderer).ok_or_else(|| {
            Error::InvalidArgument("the rendering service rejected the call options".to_string())
        })?;
        debug!("Opened rendering service for template path '{}'", config.template_path);
        Ok(Self { renderer })
    }
}

impl RenderService for NativeRenderService {
    fn render(&self, request: &RenderRequest<'_>) -> RawRenderResult {
        // SAFETY: the renderer lives until self drops; the request strings are borrowed
        // for the whole call.
        unsafe {
            jinja_renderer_render(
                self.renderer.as_ptr(),
                request.expression.as_ptr() as *const c_char,
                request.expression.len(),
                request.context_json.as_ptr() as *const c_char,
                request.context_json.len(),
            )
        }
    }

    unsafe fn release(&self, result: RawRenderResult) {
        jinja_free_render_result(result);
    }
}

impl Drop for NativeRenderService {
    fn drop(&mut self) {
        // SAFETY: the handle came from `jinja_renderer_new` and is freed only here.
        unsafe { jinja_renderer_free(self.renderer.as_ptr()) };
    }
}

/// A service-owned result that is released exactly once, when the guard drops.
pub struct OwnedRenderResult<'s, S: RenderService + ?Sized> {
    service: &'s S,
    raw: Option<RawRenderResult>,
}

impl<'s, S: RenderService + ?Sized> OwnedRenderResult<'s, S> {
    /// Renders `request` and takes ownership of the service's result.
    pub fn render(service: &'s S, request: &RenderRequest<'_>) -> Self {
        Self { service, raw: Some(service.render(request)) }
    }

    fn payload(&self) -> std::result::Result<&CStr, &CStr> {
        const EMPTY: &CStr = c"";
        let (is_ok, ptr) = match &self.raw {
            Some(RawRenderResult::Ok(ptr)) => (true, *ptr),
            Some(RawRenderResult::Err(ptr)) => (false, *ptr),
            None => (false, std::ptr::null_mut()),
        };
        // SAFETY: a non-null payload is a NUL-terminated string the service keeps alive
        // until it is released, which only happens when self drops.
        let text = if ptr.is_null() { EMPTY } else { unsafe { CStr::from_ptr(ptr) } };
        if is_ok {
            Ok(text)
        } else {
            Err(text)
        }
    }

    /// Copies a successful result into `builder`; an error becomes the returned message.
    ///
    /// Either way the payload is released before this returns.
    pub fn commit(self, builder: &mut StringBuilder) -> std::result::Result<(), String> {
        match self.payload() {
            Ok(text) => {
                builder.append_value(text.to_string_lossy());
                Ok(())
            }
            Err(message) => Err(message.to_string_lossy().into_owned()),
        }
    }

    /// Copies the payload out as an owned `Result`, releasing it.
    pub fn into_result(self) -> std::result::Result<String, String> {
        self.payload()
            .map(|text| text.to_string_lossy().into_owned())
            .map_err(|message| message.to_string_lossy().into_owned())
    }
}

impl<S: RenderService + ?Sized> Drop for OwnedRenderResult<'_, S> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            // SAFETY: `raw` came from `self.service.render` and is taken out of the Option,
            // so it cannot be released twice.
            unsafe { self.service.release(raw) };
        }
    }
}
