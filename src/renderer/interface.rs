use crate::ffi::RawRenderResult;

/// One row's input to the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest<'a> {
    /// Template source, or the template name when rendering from a template path.
    pub expression: &'a str,
    /// JSON text whose top-level object becomes the template context.
    pub context_json: &'a str,
}

impl<'a> RenderRequest<'a> {
    pub fn new(expression: &'a str, context_json: &'a str) -> Self {
        Self { expression, context_json }
    }
}

/// Trait for the rendering service sitting behind the native boundary.
///
/// The service owns the payload of every result it hands out until the payload is
/// given back through [`RenderService::release`].
pub trait RenderService {
    /// Renders one request.
    ///
    /// # Arguments
    /// * `request` - Expression and JSON context of the row
    ///
    /// # Returns
    /// * `RawRenderResult` - Tagged, service-owned rendered text or error message
    fn render(&self, request: &RenderRequest<'_>) -> RawRenderResult;

    /// Gives a result payload back to the service.
    ///
    /// # Safety
    /// `result` must have been returned by [`RenderService::render`] on this service,
    /// must not be read after this call and must be released exactly once.
    unsafe fn release(&self, result: RawRenderResult);
}
