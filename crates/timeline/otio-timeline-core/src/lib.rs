//! otio-timeline-core: the composite timeline engine.
//!
//! Items (`Clip`, `Gap`, `Stack`, `Track`) are owned trees. Compositions lay
//! their children out in time through the [`Composition`] trait: a `Stack`
//! superimposes them, a `Track` concatenates them. Failures are
//! `Result<_, OtioError>`; boundary adapters fold them into an [`ErrorStatus`].

pub mod any;
pub mod clip;
pub mod composition;
pub mod config;
pub mod effect;
pub mod error;
pub mod gap;
pub mod ids;
pub mod image_sequence;
pub mod item;
pub mod marker;
pub mod media_reference;
pub mod serialization;
pub mod stack;
pub mod track;

// Re-exports for consumers (adapters)
pub use any::{AnyDictionary, AnyValue};
pub use clip::{Clip, DEFAULT_MEDIA_KEY};
pub use composition::{adjusted_index, Composition};
pub use config::Config;
pub use effect::Effect;
pub use error::{ErrorKind, ErrorStatus, OtioError};
pub use gap::Gap;
pub use ids::ItemId;
pub use image_sequence::{ImageSequenceReference, MissingFramePolicy};
pub use item::{Composable, ItemBase};
pub use marker::{Marker, MarkerColor};
pub use media_reference::{ExternalReference, MediaReference, MissingReference};
pub use serialization::{SerializableObject, UnknownSchema};
pub use stack::Stack;
pub use track::{Track, TrackKind};

pub use otio_opentime_core::{DropFrame, RationalTime, TimeRange};
