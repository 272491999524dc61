//! otio-opentime-core: rational time arithmetic for the timeline engine.
//!
//! Times are `value / rate` seconds and are never reduced, so a frame count
//! authored at one rate survives a round trip. Ranges are half-open
//! `(start_time, duration)` pairs.

pub mod error;
pub mod rational_time;
pub mod time_range;
pub mod timecode;

pub use error::OpentimeError;
pub use rational_time::RationalTime;
pub use time_range::TimeRange;
pub use timecode::{is_valid_timecode_rate, nearest_valid_timecode_rate, DropFrame};
