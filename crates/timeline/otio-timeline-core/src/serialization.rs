//! JSON persistence shared by every schema-tagged type.
//!
//! Objects carry `"OTIO_SCHEMA": "<Name>.<version>"`. Schemas this crate does
//! not model are kept verbatim as [`UnknownSchema`] so a read/write cycle does
//! not lose data.

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value as JsonValue};

use crate::config::Config;
use crate::error::{ErrorKind, OtioError};
use crate::ids::ItemId;

pub const SCHEMA_KEY: &str = "OTIO_SCHEMA";

/// Split the `OTIO_SCHEMA` tag of `value` into name and version.
pub fn schema_of(value: &JsonValue) -> Result<(String, u32), OtioError> {
    let tag = value
        .as_object()
        .and_then(|obj| obj.get(SCHEMA_KEY))
        .and_then(JsonValue::as_str)
        .ok_or_else(|| {
            OtioError::new(
                ErrorKind::MalformedSchema,
                format!("expected an object with a string {SCHEMA_KEY} field"),
            )
        })?;
    let (name, version) = tag.rsplit_once('.').ok_or_else(|| {
        OtioError::new(
            ErrorKind::MalformedSchema,
            format!("schema tag '{tag}' has no version"),
        )
    })?;
    let version = version.parse::<u32>().map_err(|_| {
        OtioError::new(
            ErrorKind::MalformedSchema,
            format!("schema tag '{tag}' has a non-numeric version"),
        )
    })?;
    if name.is_empty() {
        return Err(OtioError::new(
            ErrorKind::MalformedSchema,
            format!("schema tag '{tag}' has no name"),
        ));
    }
    Ok((name.to_string(), version))
}

/// An object whose schema is not modelled here, preserved field for field.
#[derive(Clone, Debug)]
pub struct UnknownSchema {
    pub id: ItemId,
    pub original_schema_name: String,
    pub original_schema_version: u32,
    pub data: Map<String, JsonValue>,
}

impl UnknownSchema {
    pub(crate) fn from_json_value(
        name: String,
        version: u32,
        value: JsonValue,
    ) -> Result<Self, OtioError> {
        let JsonValue::Object(mut data) = value else {
            return Err(OtioError::new(
                ErrorKind::MalformedSchema,
                "unknown schema payload is not an object",
            ));
        };
        data.shift_remove(SCHEMA_KEY);
        log::debug!("preserving unknown schema {name}.{version}");
        Ok(Self {
            id: ItemId::fresh(),
            original_schema_name: name,
            original_schema_version: version,
            data,
        })
    }

    pub fn schema_tag(&self) -> String {
        format!(
            "{}.{}",
            self.original_schema_name, self.original_schema_version
        )
    }

    pub(crate) fn with_fresh_id(&self) -> Self {
        Self {
            id: ItemId::fresh(),
            ..self.clone()
        }
    }
}

impl PartialEq for UnknownSchema {
    fn eq(&self, other: &Self) -> bool {
        self.original_schema_name == other.original_schema_name
            && self.original_schema_version == other.original_schema_version
            && self.data == other.data
    }
}

impl Serialize for UnknownSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.data.len() + 1))?;
        map.serialize_entry(SCHEMA_KEY, &self.schema_tag())?;
        for (k, v) in &self.data {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// JSON round-tripping for schema-tagged types.
pub trait SerializableObject: Serialize + DeserializeOwned {
    fn to_json_value(&self) -> Result<JsonValue, OtioError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Write with `indent` spaces per level, or compact when `indent` is 0.
    fn to_json_string(&self, indent: usize) -> Result<String, OtioError> {
        to_json_string_indented(self, indent)
    }

    fn to_json_string_with(&self, config: &Config) -> Result<String, OtioError> {
        self.to_json_string(config.json_indent)
    }

    fn from_json_string(input: &str) -> Result<Self, OtioError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Structural equality of the serialized forms. Identity is not compared.
    fn is_equivalent_to(&self, other: &Self) -> bool {
        match (self.to_json_value(), other.to_json_value()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

pub(crate) fn to_json_string_indented<T: Serialize + ?Sized>(
    value: &T,
    indent: usize,
) -> Result<String, OtioError> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let pad = vec![b' '; indent];
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&pad));
    value.serialize(&mut ser)?;
    String::from_utf8(out)
        .map_err(|e| OtioError::new(ErrorKind::InternalError, e.to_string()))
}
