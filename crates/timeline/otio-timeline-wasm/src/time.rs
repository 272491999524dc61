//! JS handles for the opentime value types. Both are small `Copy` values on
//! the Rust side, so every method returns a new handle.

use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use otio_timeline_core::{DropFrame, OtioError, RationalTime, TimeRange};

use crate::error_status::OtioErrorStatus;

#[wasm_bindgen(js_name = RationalTime)]
#[derive(Copy, Clone, Debug)]
pub struct OtioRationalTime {
    inner: RationalTime,
}

impl From<RationalTime> for OtioRationalTime {
    fn from(inner: RationalTime) -> Self {
        Self { inner }
    }
}

impl OtioRationalTime {
    pub fn into_core(self) -> RationalTime {
        self.inner
    }
}

fn drop_frame(flag: Option<bool>) -> DropFrame {
    match flag {
        None => DropFrame::InferFromRate,
        Some(true) => DropFrame::ForceYes,
        Some(false) => DropFrame::ForceNo,
    }
}

#[wasm_bindgen(js_class = RationalTime)]
impl OtioRationalTime {
    #[wasm_bindgen(constructor)]
    pub fn new(value: f64, rate: f64) -> OtioRationalTime {
        RationalTime::new(value, rate).into()
    }

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[wasm_bindgen(getter)]
    pub fn rate(&self) -> f64 {
        self.inner.rate
    }

    #[wasm_bindgen(js_name = fromSeconds)]
    pub fn from_seconds(seconds: f64, rate: f64) -> OtioRationalTime {
        RationalTime::from_seconds(seconds, rate).into()
    }

    #[wasm_bindgen(js_name = toSeconds)]
    pub fn to_seconds(&self) -> f64 {
        self.inner.to_seconds()
    }

    #[wasm_bindgen(js_name = toFrames)]
    pub fn to_frames(&self) -> f64 {
        self.inner.to_frames() as f64
    }

    #[wasm_bindgen(js_name = rescaledTo)]
    pub fn rescaled_to(&self, rate: f64) -> OtioRationalTime {
        self.inner.rescaled_to(rate).into()
    }

    #[wasm_bindgen(js_name = valueRescaledTo)]
    pub fn value_rescaled_to(&self, rate: f64) -> f64 {
        self.inner.value_rescaled_to(rate)
    }

    pub fn add(&self, other: &OtioRationalTime) -> OtioRationalTime {
        (self.inner + other.inner).into()
    }

    pub fn subtract(&self, other: &OtioRationalTime) -> OtioRationalTime {
        (self.inner - other.inner).into()
    }

    pub fn equals(&self, other: &OtioRationalTime) -> bool {
        self.inner == other.inner
    }

    #[wasm_bindgen(js_name = almostEqual)]
    pub fn almost_equal(&self, other: &OtioRationalTime, delta: f64) -> bool {
        self.inner.almost_equal(&other.inner, delta)
    }

    /// `dropFrame`: `undefined` infers from the rate, `true`/`false` force it.
    #[wasm_bindgen(js_name = toTimecode)]
    pub fn to_timecode(
        &self,
        rate: f64,
        drop_frame_flag: Option<bool>,
        status: &mut OtioErrorStatus,
    ) -> Option<String> {
        status.record(
            self.inner
                .to_timecode(rate, drop_frame(drop_frame_flag))
                .map_err(OtioError::from),
        )
    }

    #[wasm_bindgen(js_name = fromTimecode)]
    pub fn from_timecode(
        timecode: &str,
        rate: f64,
        status: &mut OtioErrorStatus,
    ) -> Option<OtioRationalTime> {
        status
            .record(RationalTime::from_timecode(timecode, rate).map_err(OtioError::from))
            .map(Into::into)
    }

    #[wasm_bindgen(js_name = toTimeString)]
    pub fn to_time_string(&self) -> String {
        self.inner.to_time_string()
    }

    #[wasm_bindgen(js_name = fromTimeString)]
    pub fn from_time_string(
        time_string: &str,
        rate: f64,
        status: &mut OtioErrorStatus,
    ) -> Option<OtioRationalTime> {
        status
            .record(RationalTime::from_time_string(time_string, rate).map_err(OtioError::from))
            .map(Into::into)
    }

    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.inner).map_err(|e| JsError::new(&format!("RationalTime error: {e}")))
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_display_string(&self) -> String {
        self.inner.to_string()
    }
}

#[wasm_bindgen(js_name = TimeRange)]
#[derive(Copy, Clone, Debug)]
pub struct OtioTimeRange {
    inner: TimeRange,
}

impl From<TimeRange> for OtioTimeRange {
    fn from(inner: TimeRange) -> Self {
        Self { inner }
    }
}

impl OtioTimeRange {
    pub fn into_core(self) -> TimeRange {
        self.inner
    }
}

#[wasm_bindgen(js_class = TimeRange)]
impl OtioTimeRange {
    #[wasm_bindgen(constructor)]
    pub fn new(start_time: &OtioRationalTime, duration: &OtioRationalTime) -> OtioTimeRange {
        TimeRange::new(start_time.inner, duration.inner).into()
    }

    #[wasm_bindgen(getter, js_name = startTime)]
    pub fn start_time(&self) -> OtioRationalTime {
        self.inner.start_time.into()
    }

    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> OtioRationalTime {
        self.inner.duration.into()
    }

    #[wasm_bindgen(js_name = endTimeExclusive)]
    pub fn end_time_exclusive(&self) -> OtioRationalTime {
        self.inner.end_time_exclusive().into()
    }

    #[wasm_bindgen(js_name = endTimeInclusive)]
    pub fn end_time_inclusive(&self) -> OtioRationalTime {
        self.inner.end_time_inclusive().into()
    }

    #[wasm_bindgen(js_name = containsTime)]
    pub fn contains_time(&self, time: &OtioRationalTime) -> bool {
        self.inner.contains_time(time.inner)
    }

    #[wasm_bindgen(js_name = containsRange)]
    pub fn contains_range(&self, other: &OtioTimeRange) -> bool {
        self.inner.contains_range(&other.inner)
    }

    pub fn overlaps(&self, other: &OtioTimeRange) -> bool {
        self.inner.overlaps(&other.inner)
    }

    #[wasm_bindgen(js_name = extendedBy)]
    pub fn extended_by(&self, other: &OtioTimeRange) -> OtioTimeRange {
        self.inner.extended_by(&other.inner).into()
    }

    pub fn clamped(&self, other: &OtioTimeRange) -> OtioTimeRange {
        self.inner.clamped(&other.inner).into()
    }

    pub fn equals(&self, other: &OtioTimeRange) -> bool {
        self.inner == other.inner
    }

    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.inner).map_err(|e| JsError::new(&format!("TimeRange error: {e}")))
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_display_string(&self) -> String {
        self.inner.to_string()
    }
}
