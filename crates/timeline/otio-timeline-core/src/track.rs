//! Track: children played one after another.

use hashbrown::HashMap;
use otio_opentime_core::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};

use crate::composition::Composition;
use crate::error::{ErrorKind, OtioError};
use crate::ids::ItemId;
use crate::item::{Composable, ItemBase};
use crate::serialization::SerializableObject;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackKind {
    #[default]
    Video,
    Audio,
    Other(String),
}

impl From<String> for TrackKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Video" => TrackKind::Video,
            "Audio" => TrackKind::Audio,
            _ => TrackKind::Other(s),
        }
    }
}

impl From<TrackKind> for String {
    fn from(k: TrackKind) -> Self {
        match k {
            TrackKind::Video => "Video".to_string(),
            TrackKind::Audio => "Audio".to_string(),
            TrackKind::Other(s) => s,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Track.1")]
pub struct Track {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default)]
    pub kind: TrackKind,
    #[serde(default)]
    pub children: Vec<Composable>,
}

impl Track {
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            base: ItemBase::named(name),
            kind,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.base.id
    }

    pub(crate) fn refresh_ids(&mut self) {
        self.base.id = ItemId::fresh();
        self.children.iter_mut().for_each(Composable::refresh_ids);
    }
}

impl Composition for Track {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn children(&self) -> &[Composable] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Composable> {
        &mut self.children
    }

    fn composition_kind(&self) -> &'static str {
        "Track"
    }

    fn range_of_child_at_index(&self, index: usize) -> Result<TimeRange, OtioError> {
        let duration = self.child_at(index)?.duration()?;
        let mut start = RationalTime::new(0.0, duration.rate);
        for earlier in &self.children[..index] {
            start += earlier.duration()?;
        }
        Ok(TimeRange::new(start, duration))
    }

    fn trimmed_range_of_child_at_index(&self, index: usize) -> Result<TimeRange, OtioError> {
        let range = self.range_of_child_at_index(index)?;
        self.trim_child_range(range).ok_or_else(|| {
            OtioError::new(
                ErrorKind::InvalidTimeRange,
                format!(
                    "child {index} of track '{}' lies outside its source range",
                    self.base.name
                ),
            )
        })
    }

    fn natural_duration(&self) -> Result<RationalTime, OtioError> {
        let mut total: Option<RationalTime> = None;
        for child in &self.children {
            let d = child.duration()?;
            total = Some(match total {
                Some(t) => t + d,
                None => d,
            });
        }
        Ok(total.unwrap_or_default())
    }

    /// Single pass with a running start instead of one sum per child.
    fn range_of_all_children(&self) -> Result<HashMap<ItemId, TimeRange>, OtioError> {
        let mut out = HashMap::with_capacity(self.children.len());
        let mut start: Option<RationalTime> = None;
        for child in &self.children {
            let d = child.duration()?;
            let at = start.unwrap_or(RationalTime::new(0.0, d.rate));
            out.insert(child.id(), TimeRange::new(at, d));
            start = Some(at + d);
        }
        Ok(out)
    }
}

impl SerializableObject for Track {}
