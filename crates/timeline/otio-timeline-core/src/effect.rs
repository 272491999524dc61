//! Effects attached to items.

use serde::{Deserialize, Serialize};

use crate::any::AnyDictionary;
use crate::serialization::SerializableObject;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Effect.1")]
pub struct Effect {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub effect_name: String,
    #[serde(default)]
    pub metadata: AnyDictionary,
}

impl Effect {
    pub fn new(
        name: impl Into<String>,
        effect_name: impl Into<String>,
        metadata: AnyDictionary,
    ) -> Self {
        Self {
            name: name.into(),
            effect_name: effect_name.into(),
            metadata,
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Effect(name={}, effectName={}, metadata={})",
            self.name, self.effect_name, self.metadata
        )
    }
}

impl SerializableObject for Effect {}
