//! Errors produced by time conversions.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpentimeError {
    #[error("invalid time string '{input}': {reason}")]
    InvalidTimestring { input: String, reason: String },
    #[error("invalid timecode rate {0}")]
    InvalidTimecodeRate(f64),
    #[error("invalid timecode string '{input}': {reason}")]
    InvalidTimecodeString { input: String, reason: String },
    #[error("timecode cannot represent negative time ({0} frames)")]
    NegativeValue(f64),
    #[error("drop-frame timecode is not supported at rate {0}")]
    DropFrameUnsupported(f64),
    #[error("rate must be positive and finite, got {0}")]
    InvalidRate(f64),
}

impl OpentimeError {
    pub(crate) fn timestring(input: &str, reason: impl Into<String>) -> Self {
        OpentimeError::InvalidTimestring {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn timecode(input: &str, reason: impl Into<String>) -> Self {
        OpentimeError::InvalidTimecodeString {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
