//! Markers: named, colored annotations over a range of an item.

use otio_opentime_core::TimeRange;
use serde::{Deserialize, Serialize};

use crate::any::AnyDictionary;
use crate::serialization::SerializableObject;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkerColor {
    Pink,
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Magenta,
    Black,
    White,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Marker.2")]
pub struct Marker {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub marked_range: TimeRange,
    #[serde(default)]
    pub color: MarkerColor,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub metadata: AnyDictionary,
}

impl Marker {
    pub fn new(name: impl Into<String>, marked_range: TimeRange, color: MarkerColor) -> Self {
        Self {
            name: name.into(),
            marked_range,
            color,
            ..Self::default()
        }
    }
}

impl SerializableObject for Marker {}

#[cfg(test)]
mod tests {
    use super::*;
    use otio_opentime_core::RationalTime;

    #[test]
    fn color_serializes_upper_case() {
        let m = Marker::new(
            "note",
            TimeRange::new(RationalTime::new(1.0, 24.0), RationalTime::new(0.0, 24.0)),
            MarkerColor::Green,
        );
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["OTIO_SCHEMA"], "Marker.2");
        assert_eq!(json["color"], "GREEN");
        let back: Marker = serde_json::from_value(json).unwrap();
        assert_eq!(back, m);
    }
}
