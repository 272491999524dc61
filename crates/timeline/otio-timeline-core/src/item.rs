//! Items: the things a composition can hold.
//!
//! Fields shared by every item live in [`ItemBase`], flattened into each
//! schema's JSON object. [`Composable`] is the closed set of child kinds.

use otio_opentime_core::{RationalTime, TimeRange};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::any::AnyDictionary;
use crate::clip::{Clip, ClipV1};
use crate::composition::Composition;
use crate::config::Config;
use crate::effect::Effect;
use crate::error::{ErrorKind, OtioError};
use crate::gap::Gap;
use crate::ids::ItemId;
use crate::marker::Marker;
use crate::serialization::{schema_of, SerializableObject, UnknownSchema};
use crate::stack::Stack;
use crate::track::Track;

fn enabled_default() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemBase {
    #[serde(skip, default = "ItemId::fresh")]
    pub id: ItemId,
    #[serde(default)]
    pub metadata: AnyDictionary,
    #[serde(default)]
    pub name: String,
    /// Explicit bound on the item's media; `None` means "use what is available".
    #[serde(default)]
    pub source_range: Option<TimeRange>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

impl Default for ItemBase {
    fn default() -> Self {
        Self {
            id: ItemId::fresh(),
            metadata: AnyDictionary::new(),
            name: String::new(),
            source_range: None,
            effects: Vec::new(),
            markers: Vec::new(),
            enabled: true,
        }
    }
}

impl ItemBase {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Any child a composition can hold.
#[derive(Clone, Debug)]
pub enum Composable {
    Clip(Clip),
    Gap(Gap),
    Stack(Stack),
    Track(Track),
    Unknown(UnknownSchema),
}

impl Composable {
    pub fn id(&self) -> ItemId {
        match self {
            Composable::Clip(c) => c.base.id,
            Composable::Gap(g) => g.base.id,
            Composable::Stack(s) => s.base.id,
            Composable::Track(t) => t.base.id,
            Composable::Unknown(u) => u.id,
        }
    }

    pub fn base(&self) -> Option<&ItemBase> {
        match self {
            Composable::Clip(c) => Some(&c.base),
            Composable::Gap(g) => Some(&g.base),
            Composable::Stack(s) => Some(&s.base),
            Composable::Track(t) => Some(&t.base),
            Composable::Unknown(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self.base() {
            Some(base) => &base.name,
            None => "",
        }
    }

    pub fn schema_name(&self) -> &str {
        match self {
            Composable::Clip(_) => "Clip",
            Composable::Gap(_) => "Gap",
            Composable::Stack(_) => "Stack",
            Composable::Track(_) => "Track",
            Composable::Unknown(u) => &u.original_schema_name,
        }
    }

    pub fn source_range(&self) -> Option<TimeRange> {
        self.base().and_then(|b| b.source_range)
    }

    pub fn available_range(&self) -> Result<TimeRange, OtioError> {
        match self {
            Composable::Clip(c) => c.available_range(),
            Composable::Gap(g) => g.available_range(),
            Composable::Stack(s) => s.available_range(),
            Composable::Track(t) => t.available_range(),
            Composable::Unknown(u) => Err(OtioError::new(
                ErrorKind::ObjectWithoutDuration,
                format!("unknown schema {} has no duration", u.schema_tag()),
            )),
        }
    }

    /// The explicit source range, else the available range.
    pub fn trimmed_range(&self) -> Result<TimeRange, OtioError> {
        match self.source_range() {
            Some(sr) => Ok(sr),
            None => self.available_range(),
        }
    }

    pub fn duration(&self) -> Result<RationalTime, OtioError> {
        Ok(self.trimmed_range()?.duration)
    }

    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Composable::Stack(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_track(&self) -> Option<&Track> {
        match self {
            Composable::Track(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_clip(&self) -> Option<&Clip> {
        match self {
            Composable::Clip(c) => Some(c),
            _ => None,
        }
    }

    /// Clone with fresh ids for this item and every descendant.
    pub fn deep_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.refresh_ids();
        copy
    }

    pub(crate) fn refresh_ids(&mut self) {
        match self {
            Composable::Clip(c) => c.base.id = ItemId::fresh(),
            Composable::Gap(g) => g.base.id = ItemId::fresh(),
            Composable::Stack(s) => s.refresh_ids(),
            Composable::Track(t) => t.refresh_ids(),
            Composable::Unknown(u) => *u = u.with_fresh_id(),
        }
    }

    /// Tag of the first schema in this subtree that was preserved as unknown.
    pub fn first_unknown_schema(&self) -> Option<String> {
        match self {
            Composable::Unknown(u) => Some(u.schema_tag()),
            Composable::Clip(c) => c
                .media_references
                .values()
                .find_map(|r| r.unknown_schema().map(UnknownSchema::schema_tag)),
            Composable::Gap(_) => None,
            Composable::Stack(s) => s.children().iter().find_map(Composable::first_unknown_schema),
            Composable::Track(t) => t.children().iter().find_map(Composable::first_unknown_schema),
        }
    }

    /// Parse a document, rejecting unmodelled schemas when `config.strict_schemas` is set.
    pub fn from_json_with(input: &str, config: &Config) -> Result<Self, OtioError> {
        let parsed = Self::from_json_string(input)?;
        if config.strict_schemas {
            if let Some(tag) = parsed.first_unknown_schema() {
                return Err(OtioError::new(
                    ErrorKind::SchemaNotRegistered,
                    format!("schema {tag} is not registered"),
                ));
            }
        }
        Ok(parsed)
    }

    pub(crate) fn from_json_value(value: JsonValue) -> Result<Self, OtioError> {
        let (name, version) = schema_of(&value)?;
        let parsed = match (name.as_str(), version) {
            ("Clip", 1) => {
                let legacy: ClipV1 = serde_json::from_value(value)?;
                Composable::Clip(legacy.into())
            }
            ("Clip", _) => Composable::Clip(serde_json::from_value(value)?),
            ("Gap", _) => Composable::Gap(serde_json::from_value(value)?),
            ("Stack", _) => Composable::Stack(serde_json::from_value(value)?),
            ("Track", _) => Composable::Track(serde_json::from_value(value)?),
            _ => {
                log::warn!("child schema {name}.{version} is not modelled; keeping it verbatim");
                Composable::Unknown(UnknownSchema::from_json_value(name, version, value)?)
            }
        };
        Ok(parsed)
    }
}

impl From<Clip> for Composable {
    fn from(c: Clip) -> Self {
        Composable::Clip(c)
    }
}

impl From<Gap> for Composable {
    fn from(g: Gap) -> Self {
        Composable::Gap(g)
    }
}

impl From<Stack> for Composable {
    fn from(s: Stack) -> Self {
        Composable::Stack(s)
    }
}

impl From<Track> for Composable {
    fn from(t: Track) -> Self {
        Composable::Track(t)
    }
}

impl Serialize for Composable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Composable::Clip(c) => c.serialize(serializer),
            Composable::Gap(g) => g.serialize(serializer),
            Composable::Stack(s) => s.serialize(serializer),
            Composable::Track(t) => t.serialize(serializer),
            Composable::Unknown(u) => u.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Composable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Composable::from_json_value(value).map_err(serde::de::Error::custom)
    }
}

impl SerializableObject for Composable {}
