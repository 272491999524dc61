//! Managed-side arguments to native values.
//!
//! Everything here works on `serde_json::Value` so it runs (and is tested)
//! off-wasm; `utils` does the `JsValue` hop. Objects may omit `OTIO_SCHEMA`:
//! the expected tag is filled in before deserializing.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use otio_timeline_core::serialization::SCHEMA_KEY;
use otio_timeline_core::{AnyDictionary, Effect, Marker, OtioError, TimeRange};

/// Construction-time failures, raised before any native object exists.
#[derive(Debug, Error)]
pub enum MarshalError {
    #[error("{arg}: {reason}")]
    InvalidArgument { arg: &'static str, reason: String },
    #[error("{arg}[{index}]: {reason}")]
    InvalidElement {
        arg: &'static str,
        index: usize,
        reason: String,
    },
    #[error(transparent)]
    Engine(#[from] OtioError),
}

impl MarshalError {
    fn argument(arg: &'static str, reason: impl ToString) -> Self {
        MarshalError::InvalidArgument {
            arg,
            reason: reason.to_string(),
        }
    }
}

/// Validated constructor arguments for a native `Stack`.
#[derive(Debug, Default)]
pub struct StackArgs {
    pub name: String,
    pub source_range: Option<TimeRange>,
    pub metadata: AnyDictionary,
    pub effects: Vec<Effect>,
    pub markers: Vec<Marker>,
}

/// `name` is required; every other argument treats `null` as its default.
pub fn stack_args(
    name: Option<String>,
    source_range: JsonValue,
    metadata: JsonValue,
    effects: JsonValue,
    markers: JsonValue,
) -> Result<StackArgs, MarshalError> {
    let name = name.ok_or_else(|| MarshalError::argument("name", "expected a string, got null"))?;
    Ok(StackArgs {
        name,
        source_range: time_range("source_range", source_range)?,
        metadata: metadata_dictionary(metadata)?,
        effects: schema_array("effects", effects, "Effect.1", |_| {})?,
        markers: schema_array("markers", markers, "Marker.2", normalize_marker)?,
    })
}

/// `null` → `None`; otherwise a `{start_time, duration}` object.
pub fn time_range(arg: &'static str, value: JsonValue) -> Result<Option<TimeRange>, MarshalError> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Object(mut obj) => {
            normalize_time_range(&mut obj);
            serde_json::from_value(JsonValue::Object(obj))
                .map(Some)
                .map_err(|e| MarshalError::argument(arg, e))
        }
        other => Err(MarshalError::argument(
            arg,
            format!("expected a time range object, got {}", kind_of(&other)),
        )),
    }
}

pub fn metadata_dictionary(value: JsonValue) -> Result<AnyDictionary, MarshalError> {
    match value {
        JsonValue::Null => Ok(AnyDictionary::new()),
        JsonValue::Object(obj) => Ok(AnyDictionary::try_from(obj)?),
        other => Err(MarshalError::argument(
            "metadata",
            format!("expected an object, got {}", kind_of(&other)),
        )),
    }
}

fn schema_array<T: DeserializeOwned>(
    arg: &'static str,
    value: JsonValue,
    tag: &str,
    normalize: fn(&mut Map<String, JsonValue>),
) -> Result<Vec<T>, MarshalError> {
    let items = match value {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(items) => items,
        other => {
            return Err(MarshalError::argument(
                arg,
                format!("expected an array, got {}", kind_of(&other)),
            ))
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let mut obj = match item {
                JsonValue::Object(obj) => obj,
                other => {
                    return Err(MarshalError::InvalidElement {
                        arg,
                        index,
                        reason: format!("expected a {tag} object, got {}", kind_of(&other)),
                    })
                }
            };
            match obj.get(SCHEMA_KEY).and_then(JsonValue::as_str) {
                Some(found) if found != tag => {
                    return Err(MarshalError::InvalidElement {
                        arg,
                        index,
                        reason: format!("expected schema {tag}, found {found}"),
                    });
                }
                Some(_) => {}
                None => {
                    obj.insert(SCHEMA_KEY.to_string(), JsonValue::from(tag));
                }
            }
            normalize(&mut obj);
            serde_json::from_value(JsonValue::Object(obj)).map_err(|e| {
                MarshalError::InvalidElement {
                    arg,
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}

fn tag_if_object(value: Option<&mut JsonValue>, tag: &str) {
    if let Some(JsonValue::Object(obj)) = value {
        obj.entry(SCHEMA_KEY)
            .or_insert_with(|| JsonValue::from(tag));
    }
}

fn normalize_time_range(obj: &mut Map<String, JsonValue>) {
    obj.entry(SCHEMA_KEY)
        .or_insert_with(|| JsonValue::from("TimeRange.1"));
    tag_if_object(obj.get_mut("start_time"), "RationalTime.1");
    tag_if_object(obj.get_mut("duration"), "RationalTime.1");
}

fn normalize_marker(obj: &mut Map<String, JsonValue>) {
    if let Some(JsonValue::Object(range)) = obj.get_mut("marked_range") {
        normalize_time_range(range);
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
