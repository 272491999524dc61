use serde_json::Value as JsonValue;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use otio_timeline_core::{Config, OtioError};

use crate::marshal::MarshalError;

pub(crate) fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

pub(crate) fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Exported handles (`TimeRange`, `RationalTime`) have no own fields to read;
/// anything with a `toJSON()` method is replaced by what it returns.
fn plain_value(value: JsValue) -> Result<JsValue, JsValue> {
    if !value.is_object() {
        return Ok(value);
    }
    let to_json = js_sys::Reflect::get(&value, &JsValue::from_str("toJSON"))?;
    match to_json.dyn_ref::<js_sys::Function>() {
        Some(f) => f.call0(&value),
        None => Ok(value),
    }
}

/// JS value to JSON; `undefined` and `null` both become `null`.
pub(crate) fn js_to_json(arg: &'static str, value: JsValue) -> Result<JsonValue, MarshalError> {
    if jsvalue_is_undefined_or_null(&value) {
        return Ok(JsonValue::Null);
    }
    let value = plain_value(value).map_err(|e| MarshalError::InvalidArgument {
        arg,
        reason: e
            .as_string()
            .unwrap_or_else(|| "toJSON() threw".to_string()),
    })?;
    swb::from_value(value).map_err(|e| MarshalError::InvalidArgument {
        arg,
        reason: e.to_string(),
    })
}

/// Optional config object, defaults for `undefined`/`null`.
pub(crate) fn config_from_js(config: JsValue) -> Result<Config, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(Config::default());
    }
    swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))
}

pub(crate) fn engine_error(err: OtioError) -> JsError {
    JsError::new(&err.to_string())
}
