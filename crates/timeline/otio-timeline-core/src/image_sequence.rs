//! ImageSequenceReference: a numbered series of single-frame image files.
//!
//! Two numbering schemes coexist. *Frame numbers* appear in file names and may
//! be discontinuous (`frame_step`) or negative. *Image numbers* are the dense,
//! zero-based indices of the images actually present.

use otio_opentime_core::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};

use crate::any::AnyDictionary;
use crate::error::{ErrorKind, OtioError};

/// What a player should do with frames that are not on disk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFramePolicy {
    #[default]
    Error,
    Hold,
    Black,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "ImageSequenceReference.1")]
#[serde(default)]
pub struct ImageSequenceReference {
    pub name: String,
    /// Everything leading up to the file name.
    pub target_url_base: String,
    /// Everything in the file name before the frame number.
    pub name_prefix: String,
    /// Everything after the frame number.
    pub name_suffix: String,
    /// First frame number used in file names.
    pub start_frame: i64,
    pub frame_step: i64,
    /// Frame rate if every frame of the sequence were played back.
    pub rate: f64,
    /// Digits to zero-pad frame numbers to.
    pub frame_zero_padding: usize,
    pub missing_frame_policy: MissingFramePolicy,
    pub available_range: Option<TimeRange>,
    pub metadata: AnyDictionary,
}

impl Default for ImageSequenceReference {
    fn default() -> Self {
        Self {
            name: String::new(),
            target_url_base: String::new(),
            name_prefix: String::new(),
            name_suffix: String::new(),
            start_frame: 1,
            frame_step: 1,
            rate: 1.0,
            frame_zero_padding: 0,
            missing_frame_policy: MissingFramePolicy::Error,
            available_range: None,
            metadata: AnyDictionary::new(),
        }
    }
}

impl ImageSequenceReference {
    /// Last frame number of the sequence (inclusive). Without an available range
    /// this is `start_frame`.
    pub fn end_frame(&self) -> i64 {
        match self.available_range {
            Some(range) => self.start_frame + range.duration.to_frames_at(self.rate) - 1,
            None => self.start_frame,
        }
    }

    pub fn number_of_images_in_sequence(&self) -> i64 {
        match self.available_range {
            Some(range) if self.frame_step > 0 && self.rate > 0.0 => {
                let playback_rate = self.rate / self.frame_step as f64;
                range.duration.to_frames_at(playback_rate)
            }
            _ => 0,
        }
    }

    /// Frame number (as used in file names) shown at `time`.
    pub fn frame_for_time(&self, time: RationalTime) -> Result<i64, OtioError> {
        let range = self.require_available_range()?;
        if !range.contains_time(time) {
            return Err(OtioError::new(
                ErrorKind::InvalidTimeRange,
                format!("{time} is outside the available range {range}"),
            ));
        }
        let offset = (time - range.start_time).to_frames_at(self.rate);
        Ok(self.start_frame + offset)
    }

    /// First and last frame numbers covering `range`.
    pub fn frame_range_for_time_range(&self, range: &TimeRange) -> Result<(i64, i64), OtioError> {
        Ok((
            self.frame_for_time(range.start_time)?,
            self.frame_for_time(range.end_time_inclusive())?,
        ))
    }

    pub fn target_url_for_image_number(&self, image_number: i64) -> Result<String, OtioError> {
        self.check_image_number(image_number)?;
        let file_frame = self.start_frame + image_number * self.frame_step;
        let digits = file_frame.unsigned_abs().to_string();
        let pad = "0".repeat(self.frame_zero_padding.saturating_sub(digits.len()));
        let sign = if file_frame < 0 { "-" } else { "" };
        Ok(format!(
            "{}{}{sign}{pad}{digits}{}",
            self.base_with_separator(),
            self.name_prefix,
            self.name_suffix
        ))
    }

    pub fn presentation_time_for_image_number(
        &self,
        image_number: i64,
    ) -> Result<RationalTime, OtioError> {
        self.check_image_number(image_number)?;
        let first = self.require_available_range()?.start_time;
        Ok(first + RationalTime::new((image_number * self.frame_step) as f64, self.rate))
    }

    /// Target url with `symbol` in place of the frame number, e.g. for wildcards.
    pub fn abstract_target_url(&self, symbol: &str) -> String {
        format!(
            "{}{}{symbol}{}",
            self.base_with_separator(),
            self.name_prefix,
            self.name_suffix
        )
    }

    fn base_with_separator(&self) -> String {
        if self.target_url_base.is_empty() || self.target_url_base.ends_with('/') {
            self.target_url_base.clone()
        } else {
            format!("{}/", self.target_url_base)
        }
    }

    fn require_available_range(&self) -> Result<TimeRange, OtioError> {
        self.available_range.ok_or_else(|| {
            OtioError::new(
                ErrorKind::CannotComputeAvailableRange,
                "image sequence has no available range",
            )
        })
    }

    fn check_image_number(&self, image_number: i64) -> Result<(), OtioError> {
        if self.rate.is_nan() || self.rate <= 0.0 {
            return Err(OtioError::new(
                ErrorKind::InvalidRate,
                "zero rate sequence has no frames",
            ));
        }
        let range = self.require_available_range()?;
        if range.duration.value == 0.0 {
            return Err(OtioError::new(
                ErrorKind::IllegalIndex,
                "zero duration sequence has no frames",
            ));
        }
        let count = self.number_of_images_in_sequence();
        if image_number < 0 || image_number >= count {
            return Err(OtioError::new(
                ErrorKind::IllegalIndex,
                format!("image number {image_number} out of range for {count} images"),
            ));
        }
        Ok(())
    }
}
