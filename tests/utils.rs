use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use jinja_render::ffi::RawRenderResult;
use jinja_render::renderer::{NativeRenderService, RenderRequest, RenderService};
use jinja_render::RenderConfig;
use log::debug;

/// Native service that records every call crossing the boundary.
pub struct CountingService {
    inner: NativeRenderService,
    pub renders: Cell<usize>,
    pub releases: Cell<usize>,
    pub expressions: RefCell<Vec<String>>,
    outstanding: RefCell<HashSet<usize>>,
}

impl CountingService {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            inner: NativeRenderService::new(config).unwrap(),
            renders: Cell::new(0),
            releases: Cell::new(0),
            expressions: RefCell::new(Vec::new()),
            outstanding: RefCell::new(HashSet::new()),
        }
    }

    /// Payloads handed out and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding.borrow().len()
    }
}

impl RenderService for CountingService {
    fn render(&self, request: &RenderRequest<'_>) -> RawRenderResult {
        self.renders.set(self.renders.get() + 1);
        self.expressions.borrow_mut().push(request.expression.to_string());
        let result = self.inner.render(request);
        self.outstanding.borrow_mut().insert(payload_address(&result));
        result
    }

    unsafe fn release(&self, result: RawRenderResult) {
        let released = self.outstanding.borrow_mut().remove(&payload_address(&result));
        assert!(released, "payload released twice or never handed out");
        debug!("Releasing payload, ok = {}", result.is_ok());
        self.releases.set(self.releases.get() + 1);
        self.inner.release(result);
    }
}

fn payload_address(result: &RawRenderResult) -> usize {
    match result {
        RawRenderResult::Ok(ptr) | RawRenderResult::Err(ptr) => *ptr as usize,
    }
}

pub fn strings(values: Vec<Option<&str>>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

/// Reads a rendered column back as optional strings.
pub fn collect(array: &ArrayRef) -> Vec<Option<String>> {
    let array = array.as_any().downcast_ref::<StringArray>().unwrap();
    (0..array.len())
        .map(|i| if array.is_null(i) { None } else { Some(array.value(i).to_string()) })
        .collect()
}
