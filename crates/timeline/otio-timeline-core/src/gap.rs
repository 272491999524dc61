//! Gap: empty space with a duration.

use otio_opentime_core::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, OtioError};
use crate::item::ItemBase;
use crate::serialization::SerializableObject;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Gap.1")]
pub struct Gap {
    #[serde(flatten)]
    pub base: ItemBase,
}

impl Gap {
    pub fn with_duration(duration: RationalTime) -> Self {
        Self {
            base: ItemBase {
                source_range: Some(TimeRange::from_duration(duration)),
                ..ItemBase::default()
            },
        }
    }

    pub fn available_range(&self) -> Result<TimeRange, OtioError> {
        self.base.source_range.ok_or_else(|| {
            OtioError::new(
                ErrorKind::ObjectWithoutDuration,
                format!("gap '{}' has no source range", self.base.name),
            )
        })
    }
}

impl SerializableObject for Gap {}
