//! Boundary adapter: the native `Stack` behind a JavaScript handle.
//!
//! The JS object owns exactly one native stack. Calling `free()` (or letting
//! the host's finalization registry do it) drops it once; there is no way to
//! copy the native side out. Handles are single-threaded, like every
//! wasm-bindgen export.
//!
//! Construction validates every argument first and throws on malformed input,
//! so a half-built stack is never observable. Range queries never throw: they
//! write the outcome into the caller's `ErrorStatus` and return `undefined`
//! on failure.

use wasm_bindgen::prelude::*;

use otio_timeline_core::{
    Composable, Composition, ErrorKind, OtioError, SerializableObject, Stack,
};

pub mod error_status;
pub mod marshal;
pub mod time;
mod utils;

pub use error_status::OtioErrorStatus;
pub use marshal::MarshalError;
pub use time::{OtioRationalTime, OtioTimeRange};

use utils::{config_from_js, engine_error, js_to_json, set_panic_hook};

/// Managed-side indices are signed; negative ones are never valid children.
fn child_index(index: i32, len: usize) -> Result<usize, OtioError> {
    usize::try_from(index).map_err(|_| {
        OtioError::new(
            ErrorKind::IllegalIndex,
            format!("index {index} out of bounds for {len} children"),
        )
    })
}

#[wasm_bindgen(js_name = Stack)]
pub struct OtioStack {
    core: Stack,
}

impl OtioStack {
    pub fn from_core(core: Stack) -> Self {
        log::debug!("stack handle {} created", core.id());
        Self { core }
    }

    pub fn core(&self) -> &Stack {
        &self.core
    }
}

impl Drop for OtioStack {
    fn drop(&mut self) {
        log::debug!("stack handle {} released", self.core.id());
    }
}

#[wasm_bindgen(js_class = Stack)]
impl OtioStack {
    /// Build a stack. `name` is required and throws when missing; everything
    /// after it may be `undefined` or `null`.
    ///
    /// `sourceRange` is a `TimeRange` handle or a plain
    /// `{ start_time: { value, rate }, duration: {...} }` object. `effects` and
    /// `markers` are arrays of plain objects; `OTIO_SCHEMA` may be omitted.
    /// Example:
    ///   new Stack("layers", undefined, { shot: "sh010" }, [], [])
    #[wasm_bindgen(constructor)]
    pub fn new(
        name: Option<String>,
        source_range: JsValue,
        metadata: JsValue,
        effects: JsValue,
        markers: JsValue,
    ) -> Result<OtioStack, JsError> {
        set_panic_hook();
        let args = marshal::stack_args(
            name,
            js_to_json("source_range", source_range)?,
            js_to_json("metadata", metadata)?,
            js_to_json("effects", effects)?,
            js_to_json("markers", markers)?,
        )?;
        Ok(OtioStack::from_core(Stack::new(
            args.name,
            args.source_range,
            args.metadata,
            args.effects,
            args.markers,
        )))
    }

    /// Parse a `Stack.1` document. `config` is optional (`{ strict_schemas: true }`).
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str, config: JsValue) -> Result<OtioStack, JsError> {
        set_panic_hook();
        let cfg = config_from_js(config)?;
        let stack = Stack::from_json_with(json, &cfg).map_err(engine_error)?;
        Ok(OtioStack::from_core(stack))
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self, config: JsValue) -> Result<String, JsError> {
        let cfg = config_from_js(config)?;
        self.core.to_json_string_with(&cfg).map_err(engine_error)
    }

    #[wasm_bindgen(js_name = isEquivalentTo)]
    pub fn is_equivalent_to(&self, other: &OtioStack) -> bool {
        self.core.is_equivalent_to(&other.core)
    }

    #[wasm_bindgen(js_name = rangeOfChildAtIndex)]
    pub fn range_of_child_at_index(
        &self,
        index: i32,
        error_status: &mut OtioErrorStatus,
    ) -> Option<OtioTimeRange> {
        let result = child_index(index, self.core.len())
            .and_then(|i| self.core.range_of_child_at_index(i));
        error_status.record(result).map(Into::into)
    }

    #[wasm_bindgen(js_name = trimmedRangeOfChildAtIndex)]
    pub fn trimmed_range_of_child_at_index(
        &self,
        index: i32,
        error_status: &mut OtioErrorStatus,
    ) -> Option<OtioTimeRange> {
        let result = child_index(index, self.core.len())
            .and_then(|i| self.core.trimmed_range_of_child_at_index(i));
        error_status.record(result).map(Into::into)
    }

    #[wasm_bindgen(js_name = getAvailableRange)]
    pub fn get_available_range(&self, error_status: &mut OtioErrorStatus) -> Option<OtioTimeRange> {
        error_status
            .record(self.core.available_range())
            .map(Into::into)
    }

    /// `Map<childId, TimeRange>` in child order. Any failing child fails the
    /// whole call; no partial map is returned.
    #[wasm_bindgen(js_name = getRangeOfAllChildren)]
    pub fn get_range_of_all_children(
        &self,
        error_status: &mut OtioErrorStatus,
    ) -> Option<js_sys::Map> {
        let ranges = error_status.record(self.core.range_of_all_children())?;
        let out = js_sys::Map::new();
        for child in self.core.children() {
            let id = child.id();
            if let Some(range) = ranges.get(&id) {
                out.set(
                    &JsValue::from_f64(id.0 as f64),
                    &JsValue::from(OtioTimeRange::from(*range)),
                );
            }
        }
        Some(out)
    }

    #[wasm_bindgen(getter)]
    pub fn id(&self) -> f64 {
        self.core.id().0 as f64
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.core.base.name.clone()
    }

    #[wasm_bindgen(setter)]
    pub fn set_name(&mut self, name: String) {
        self.core.base.name = name;
    }

    #[wasm_bindgen(getter, js_name = sourceRange)]
    pub fn source_range(&self) -> Option<OtioTimeRange> {
        self.core.base.source_range.map(Into::into)
    }

    #[wasm_bindgen(js_name = setSourceRange)]
    pub fn set_source_range(&mut self, range: &OtioTimeRange) {
        self.core.base.source_range = Some(range.into_core());
    }

    #[wasm_bindgen(js_name = clearSourceRange)]
    pub fn clear_source_range(&mut self) {
        self.core.base.source_range = None;
    }

    #[wasm_bindgen(js_name = metadataJson)]
    pub fn metadata_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.core.base.metadata)
            .map_err(|e| JsError::new(&format!("metadata error: {e}")))
    }

    #[wasm_bindgen(getter, js_name = childCount)]
    pub fn child_count(&self) -> u32 {
        self.core.len() as u32
    }

    #[wasm_bindgen(js_name = childIdAtIndex)]
    pub fn child_id_at_index(&self, index: i32, error_status: &mut OtioErrorStatus) -> Option<f64> {
        let result = child_index(index, self.core.len())
            .and_then(|i| self.core.child_at(i).map(|c| c.id().0 as f64));
        error_status.record(result)
    }

    /// Append a child given as JSON (`Clip.2`, `Gap.1`, `Stack.1`, `Track.1`, ...).
    #[wasm_bindgen(js_name = appendChildJson)]
    pub fn append_child_json(&mut self, json: &str) -> Result<f64, JsError> {
        let child = Composable::from_json_string(json).map_err(engine_error)?;
        let id = child.id();
        self.core.append_child(child).map_err(engine_error)?;
        Ok(id.0 as f64)
    }

    /// Insert a child given as JSON. Negative indices count from the end; the
    /// result is clamped to `[0, childCount]`.
    #[wasm_bindgen(js_name = insertChildJson)]
    pub fn insert_child_json(&mut self, index: i32, json: &str) -> Result<f64, JsError> {
        let child = Composable::from_json_string(json).map_err(engine_error)?;
        let id = child.id();
        let at = otio_timeline_core::adjusted_index(index as i64, self.core.len());
        self.core.insert_child(at, child).map_err(engine_error)?;
        Ok(id.0 as f64)
    }

    /// Remove child `index`, returning its JSON.
    #[wasm_bindgen(js_name = removeChild)]
    pub fn remove_child(
        &mut self,
        index: i32,
        error_status: &mut OtioErrorStatus,
    ) -> Option<String> {
        let result = child_index(index, self.core.len())
            .and_then(|i| self.core.remove_child(i))
            .and_then(|child| child.to_json_string(0));
        error_status.record(result)
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use otio_timeline_core::{AnyDictionary, Gap, RationalTime, TimeRange};

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    fn handle(durations: &[f64], source_range: Option<TimeRange>) -> OtioStack {
        let mut stack = Stack::new("s", source_range, AnyDictionary::new(), vec![], vec![]);
        for d in durations {
            stack.append_child(Gap::with_duration(rt(*d))).unwrap();
        }
        OtioStack::from_core(stack)
    }

    #[test]
    fn negative_index_is_illegal() {
        assert_eq!(child_index(-1, 3).unwrap_err().kind, ErrorKind::IllegalIndex);
        assert_eq!(child_index(2, 3).unwrap(), 2);

        let stack = handle(&[10.0, 20.0], None);
        let mut status = OtioErrorStatus::new();
        assert!(stack.range_of_child_at_index(-1, &mut status).is_none());
        assert_eq!(status.kind(), ErrorKind::IllegalIndex);
        assert_eq!(status.outcome(), "ILLEGAL_INDEX");
        assert!(stack.trimmed_range_of_child_at_index(2, &mut status).is_none());
        assert_eq!(status.kind(), ErrorKind::IllegalIndex);
        assert!(stack.child_id_at_index(i32::MIN, &mut status).is_none());
    }

    #[test]
    fn success_resets_the_status() {
        let stack = handle(&[10.0, 20.0], None);
        let mut status = OtioErrorStatus::new();
        assert!(stack.range_of_child_at_index(5, &mut status).is_none());
        assert!(status.is_error());

        let range = stack
            .range_of_child_at_index(1, &mut status)
            .expect("valid index");
        assert!(status.is_ok());
        assert!(status.details().is_empty());
        assert_eq!(range.into_core(), TimeRange::new(rt(0.0), rt(20.0)));
    }

    #[test]
    fn available_range_reports_ill_defined_empty_stack() {
        let mut status = OtioErrorStatus::new();
        assert!(handle(&[], None).get_available_range(&mut status).is_none());
        assert_eq!(status.outcome(), "CANNOT_COMPUTE_AVAILABLE_RANGE");

        let bound = TimeRange::new(rt(1.0), rt(2.0));
        let range = handle(&[], Some(bound))
            .get_available_range(&mut status)
            .expect("explicit bound");
        assert_eq!(range.into_core(), bound);
    }

    #[test]
    fn trimmed_range_fits_the_bound() {
        let bound = TimeRange::new(rt(4.0), rt(12.0));
        let stack = handle(&[10.0, 30.0], Some(bound));
        let mut status = OtioErrorStatus::new();
        let available = stack.get_available_range(&mut status).unwrap().into_core();
        for i in 0..2 {
            let trimmed = stack
                .trimmed_range_of_child_at_index(i, &mut status)
                .unwrap()
                .into_core();
            assert!(available.contains_range(&trimmed));
        }
    }

    #[test]
    fn removing_returns_child_json() {
        let mut stack = handle(&[10.0], None);
        let mut status = OtioErrorStatus::new();
        let json = stack.remove_child(0, &mut status).expect("removed");
        assert!(json.contains("\"OTIO_SCHEMA\":\"Gap.1\""));
        assert_eq!(stack.child_count(), 0);
        assert!(stack.remove_child(0, &mut status).is_none());
        assert_eq!(status.kind(), ErrorKind::IllegalIndex);
    }
}
