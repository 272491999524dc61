use wasm_bindgen::prelude::*;

use otio_timeline_core::{ErrorKind, ErrorStatus, OtioError};

/// Out-parameter for range queries. Pass one in; after the call `outcome` is
/// `"OK"` or the upper-snake-case failure kind, and `details` explains it.
#[wasm_bindgen(js_name = ErrorStatus)]
#[derive(Default)]
pub struct OtioErrorStatus {
    inner: ErrorStatus,
}

#[wasm_bindgen(js_class = ErrorStatus)]
impl OtioErrorStatus {
    #[wasm_bindgen(constructor)]
    pub fn new() -> OtioErrorStatus {
        OtioErrorStatus::default()
    }

    #[wasm_bindgen(getter)]
    pub fn outcome(&self) -> String {
        self.inner.outcome.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn details(&self) -> String {
        self.inner.details.clone()
    }

    #[wasm_bindgen(js_name = isOk)]
    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    #[wasm_bindgen(js_name = isError)]
    pub fn is_error(&self) -> bool {
        self.inner.is_error()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl OtioErrorStatus {
    /// Store the outcome of `result` and hand back its value on success.
    pub(crate) fn record<T>(&mut self, result: Result<T, OtioError>) -> Option<T> {
        self.inner.capture(result)
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.outcome
    }

    pub fn as_core(&self) -> &ErrorStatus {
        &self.inner
    }
}
