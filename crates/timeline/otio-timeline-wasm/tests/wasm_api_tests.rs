#![cfg(target_arch = "wasm32")]
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use otio_timeline_wasm::{
    abi_version, OtioErrorStatus, OtioRationalTime, OtioStack, OtioTimeRange,
};

wasm_bindgen_test_configure!(run_in_browser);

/// Plain JS objects rather than `Map`s, as a host would pass them.
fn js(value: serde_json::Value) -> JsValue {
    value
        .serialize(&swb::Serializer::json_compatible())
        .unwrap()
}

fn range(start: f64, dur: f64) -> serde_json::Value {
    serde_json::json!({
        "start_time": { "value": start, "rate": 24.0 },
        "duration": { "value": dur, "rate": 24.0 }
    })
}

fn gap_json(frames: f64) -> String {
    serde_json::json!({
        "OTIO_SCHEMA": "Gap.1",
        "source_range": {
            "OTIO_SCHEMA": "TimeRange.1",
            "start_time": { "OTIO_SCHEMA": "RationalTime.1", "value": 0.0, "rate": 24.0 },
            "duration": { "OTIO_SCHEMA": "RationalTime.1", "value": frames, "rate": 24.0 }
        }
    })
    .to_string()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_only_a_name() {
    let stack = OtioStack::new(
        Some("empty".into()),
        JsValue::UNDEFINED,
        JsValue::NULL,
        JsValue::UNDEFINED,
        JsValue::NULL,
    )
    .unwrap();
    assert_eq!(stack.name(), "empty");
    assert_eq!(stack.child_count(), 0);

    let mut status = OtioErrorStatus::new();
    assert!(stack.get_available_range(&mut status).is_none());
    assert_eq!(status.outcome(), "CANNOT_COMPUTE_AVAILABLE_RANGE");
}

#[wasm_bindgen_test]
fn source_range_is_reported_back() {
    let stack = OtioStack::new(
        Some("bounded".into()),
        js(range(12.0, 30.0)),
        js(serde_json::json!({ "shot": "sh010" })),
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
    )
    .unwrap();
    let mut status = OtioErrorStatus::new();
    let available = stack.get_available_range(&mut status).unwrap();
    assert!(status.is_ok());
    assert_eq!(available.start_time().value(), 12.0);
    assert_eq!(available.duration().value(), 30.0);
    assert_eq!(stack.metadata_json().unwrap(), r#"{"shot":"sh010"}"#);
}

#[wasm_bindgen_test]
fn malformed_markers_throw_before_construction() {
    let result = OtioStack::new(
        Some("marked".into()),
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        js(serde_json::json!([{ "name": "ok" }, "not a marker"])),
    );
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn missing_name_throws() {
    let result = OtioStack::new(
        None,
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
    );
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn source_range_accepts_a_time_range_handle() {
    let bound = OtioTimeRange::new(
        &OtioRationalTime::new(6.0, 24.0),
        &OtioRationalTime::new(18.0, 24.0),
    );
    let first = OtioStack::new(
        Some("first".into()),
        JsValue::from(bound),
        JsValue::NULL,
        JsValue::NULL,
        JsValue::NULL,
    )
    .unwrap();
    let handle = first.source_range().unwrap();
    let second = OtioStack::new(
        Some("second".into()),
        JsValue::from(handle),
        JsValue::NULL,
        JsValue::NULL,
        JsValue::NULL,
    )
    .unwrap();

    let mut status = OtioErrorStatus::new();
    let available = second.get_available_range(&mut status).unwrap();
    assert!(status.is_ok());
    assert_eq!(available.start_time().value(), 6.0);
    assert_eq!(available.duration().value(), 18.0);
}

#[wasm_bindgen_test]
fn children_are_superimposed() {
    let mut stack = OtioStack::new(
        Some("layers".into()),
        JsValue::NULL,
        JsValue::NULL,
        JsValue::NULL,
        JsValue::NULL,
    )
    .unwrap();
    let a = stack.append_child_json(&gap_json(10.0)).unwrap();
    let b = stack.append_child_json(&gap_json(40.0)).unwrap();
    assert_ne!(a, b);

    let mut status = OtioErrorStatus::new();
    let second = stack.range_of_child_at_index(1, &mut status).unwrap();
    assert_eq!(second.start_time().value(), 0.0);
    assert_eq!(
        stack.get_available_range(&mut status).unwrap().duration().value(),
        40.0
    );

    let all = stack.get_range_of_all_children(&mut status).unwrap();
    assert_eq!(all.size(), 2);
    assert!(all.has(&JsValue::from_f64(a)));
    assert!(all.has(&JsValue::from_f64(b)));

    assert!(stack.range_of_child_at_index(2, &mut status).is_none());
    assert_eq!(status.outcome(), "ILLEGAL_INDEX");
}

#[wasm_bindgen_test]
fn json_round_trip_is_equivalent() {
    let mut stack = OtioStack::new(
        Some("rt".into()),
        JsValue::NULL,
        JsValue::NULL,
        JsValue::NULL,
        JsValue::NULL,
    )
    .unwrap();
    stack.insert_child_json(0, &gap_json(5.0)).unwrap();
    stack.insert_child_json(-1, &gap_json(6.0)).unwrap();
    let json = stack.to_json(JsValue::UNDEFINED).unwrap();
    let back = OtioStack::from_json(&json, JsValue::UNDEFINED).unwrap();
    assert!(back.is_equivalent_to(&stack));
    assert_ne!(back.id(), stack.id());
}

#[wasm_bindgen_test]
fn time_handles() {
    let start = OtioRationalTime::new(24.0, 24.0);
    let dur = OtioRationalTime::new(48.0, 24.0);
    let r = OtioTimeRange::new(&start, &dur);
    assert_eq!(r.end_time_exclusive().value(), 72.0);
    assert!(r.contains_time(&OtioRationalTime::new(30.0, 24.0)));

    let mut status = OtioErrorStatus::new();
    assert_eq!(
        start.to_timecode(24.0, None, &mut status).as_deref(),
        Some("00:00:01:00")
    );
    assert!(OtioRationalTime::from_timecode("nope", 24.0, &mut status).is_none());
    assert_eq!(status.outcome(), "INVALID_TIMECODE_STRING");
}
