//! Clip: a segment of editable media.

use indexmap::IndexMap;
use otio_opentime_core::TimeRange;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, OtioError};
use crate::item::ItemBase;
use crate::media_reference::{MediaReference, MissingReference};
use crate::serialization::SerializableObject;

pub const DEFAULT_MEDIA_KEY: &str = "DEFAULT_MEDIA";

fn default_media_key() -> String {
    DEFAULT_MEDIA_KEY.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Clip.2")]
pub struct Clip {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default)]
    pub media_references: IndexMap<String, MediaReference>,
    #[serde(default = "default_media_key")]
    pub active_media_reference_key: String,
}

impl Default for Clip {
    fn default() -> Self {
        Self::new("", None, None)
    }
}

impl Clip {
    /// A clip over `media_reference`, or over a `MissingReference` when none is given.
    pub fn new(
        name: impl Into<String>,
        media_reference: Option<MediaReference>,
        source_range: Option<TimeRange>,
    ) -> Self {
        let mut media_references = IndexMap::new();
        media_references.insert(
            default_media_key(),
            media_reference.unwrap_or_else(|| MissingReference::default().into()),
        );
        Self {
            base: ItemBase {
                source_range,
                ..ItemBase::named(name)
            },
            media_references,
            active_media_reference_key: default_media_key(),
        }
    }

    pub fn media_reference(&self) -> Option<&MediaReference> {
        self.media_references.get(&self.active_media_reference_key)
    }

    /// Replace the active media reference.
    pub fn set_media_reference(&mut self, media_reference: MediaReference) {
        self.media_references
            .insert(self.active_media_reference_key.clone(), media_reference);
    }

    pub fn set_media_references(
        &mut self,
        media_references: IndexMap<String, MediaReference>,
        active_key: impl Into<String>,
    ) -> Result<(), OtioError> {
        let active_key = active_key.into();
        check_media_references(&media_references, &active_key)?;
        self.media_references = media_references;
        self.active_media_reference_key = active_key;
        Ok(())
    }

    pub fn set_active_media_reference_key(
        &mut self,
        active_key: impl Into<String>,
    ) -> Result<(), OtioError> {
        let active_key = active_key.into();
        check_media_references(&self.media_references, &active_key)?;
        self.active_media_reference_key = active_key;
        Ok(())
    }

    pub fn available_range(&self) -> Result<TimeRange, OtioError> {
        let reference = self.media_reference().ok_or_else(|| {
            OtioError::new(
                ErrorKind::MediaReferencesDoNotContainActiveKey,
                format!(
                    "clip '{}' has no media reference under '{}'",
                    self.base.name, self.active_media_reference_key
                ),
            )
        })?;
        reference.available_range().ok_or_else(|| {
            OtioError::new(
                ErrorKind::CannotComputeAvailableRange,
                format!("media reference of clip '{}' has no available range", self.base.name),
            )
        })
    }
}

fn check_media_references(
    refs: &IndexMap<String, MediaReference>,
    active_key: &str,
) -> Result<(), OtioError> {
    if refs.keys().any(String::is_empty) {
        return Err(OtioError::new(
            ErrorKind::MediaReferencesContainEmptyKey,
            "media reference keys must not be empty",
        ));
    }
    if !refs.contains_key(active_key) {
        return Err(OtioError::new(
            ErrorKind::MediaReferencesDoNotContainActiveKey,
            format!("no media reference under '{active_key}'"),
        ));
    }
    Ok(())
}

/// `Clip.1` carried a single `media_reference`; read it and upgrade.
#[derive(Deserialize)]
pub(crate) struct ClipV1 {
    #[serde(flatten)]
    base: ItemBase,
    #[serde(default)]
    media_reference: Option<MediaReference>,
}

impl From<ClipV1> for Clip {
    fn from(v1: ClipV1) -> Self {
        let mut clip = Clip::new("", v1.media_reference, None);
        clip.base = v1.base;
        clip
    }
}

impl SerializableObject for Clip {}
