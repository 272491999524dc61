//! Media references: where a clip's media lives and how much of it exists.

use otio_opentime_core::TimeRange;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::any::AnyDictionary;
use crate::error::OtioError;
use crate::image_sequence::ImageSequenceReference;
use crate::serialization::{schema_of, SerializableObject, UnknownSchema};

/// Reference to media via a url, for example `file:///var/tmp/foo.mov`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "ExternalReference.1")]
pub struct ExternalReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub target_url: String,
    #[serde(default)]
    pub available_range: Option<TimeRange>,
    #[serde(default)]
    pub metadata: AnyDictionary,
}

impl ExternalReference {
    pub fn new(target_url: impl Into<String>, available_range: Option<TimeRange>) -> Self {
        Self {
            target_url: target_url.into(),
            available_range,
            ..Self::default()
        }
    }
}

/// Placeholder for media that is not (yet) known.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "MissingReference.1")]
pub struct MissingReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub available_range: Option<TimeRange>,
    #[serde(default)]
    pub metadata: AnyDictionary,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MediaReference {
    External(ExternalReference),
    ImageSequence(ImageSequenceReference),
    Missing(MissingReference),
    Unknown(UnknownSchema),
}

impl Default for MediaReference {
    fn default() -> Self {
        MediaReference::Missing(MissingReference::default())
    }
}

impl MediaReference {
    pub fn available_range(&self) -> Option<TimeRange> {
        match self {
            MediaReference::External(r) => r.available_range,
            MediaReference::ImageSequence(r) => r.available_range,
            MediaReference::Missing(r) => r.available_range,
            MediaReference::Unknown(_) => None,
        }
    }

    pub fn is_missing_reference(&self) -> bool {
        matches!(self, MediaReference::Missing(_))
    }

    pub fn unknown_schema(&self) -> Option<&UnknownSchema> {
        match self {
            MediaReference::Unknown(u) => Some(u),
            _ => None,
        }
    }

    pub(crate) fn from_json_value(value: JsonValue) -> Result<Self, OtioError> {
        let (name, version) = schema_of(&value)?;
        let parsed = match name.as_str() {
            "ExternalReference" => MediaReference::External(serde_json::from_value(value)?),
            "ImageSequenceReference" => {
                MediaReference::ImageSequence(serde_json::from_value(value)?)
            }
            "MissingReference" => MediaReference::Missing(serde_json::from_value(value)?),
            _ => MediaReference::Unknown(UnknownSchema::from_json_value(name, version, value)?),
        };
        Ok(parsed)
    }
}

impl From<ExternalReference> for MediaReference {
    fn from(r: ExternalReference) -> Self {
        MediaReference::External(r)
    }
}

impl From<ImageSequenceReference> for MediaReference {
    fn from(r: ImageSequenceReference) -> Self {
        MediaReference::ImageSequence(r)
    }
}

impl From<MissingReference> for MediaReference {
    fn from(r: MissingReference) -> Self {
        MediaReference::Missing(r)
    }
}

impl Serialize for MediaReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MediaReference::External(r) => r.serialize(serializer),
            MediaReference::ImageSequence(r) => r.serialize(serializer),
            MediaReference::Missing(r) => r.serialize(serializer),
            MediaReference::Unknown(u) => u.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MediaReference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        MediaReference::from_json_value(value).map_err(serde::de::Error::custom)
    }
}

impl SerializableObject for MediaReference {}
