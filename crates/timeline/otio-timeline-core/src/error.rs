//! Domain error taxonomy.
//!
//! Engine calls return `Result<T, OtioError>`. Callers that need the
//! out-parameter style (the managed-runtime adapters) fold a result into an
//! [`ErrorStatus`] with [`ErrorStatus::capture`].

use std::fmt;

use otio_opentime_core::OpentimeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome kinds. `Ok` is the absence of an error.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    #[default]
    Ok,
    NotImplemented,
    UnresolvedObjectReference,
    DuplicateObjectReference,
    MalformedSchema,
    JsonParseError,
    ChildAlreadyParented,
    FileOpenFailed,
    FileWriteFailed,
    SchemaAlreadyRegistered,
    SchemaNotRegistered,
    SchemaVersionUnsupported,
    KeyNotFound,
    IllegalIndex,
    TypeMismatch,
    InternalError,
    NotAnItem,
    NotAChildOf,
    NotAChild,
    NotDescendedFrom,
    CannotComputeAvailableRange,
    InvalidTimeRange,
    ObjectWithoutDuration,
    CannotTrimTransition,
    ObjectCycle,
    CannotComputeBounds,
    MediaReferencesDoNotContainActiveKey,
    MediaReferencesContainEmptyKey,
    NotAClip,
    InvalidRate,
    InvalidTimecodeRate,
    InvalidTimecodeString,
    InvalidTimeString,
    NegativeValue,
    InvalidRateForDropFrameTimecode,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Ok => "OK",
            ErrorKind::NotImplemented => "NOT_IMPLEMENTED",
            ErrorKind::UnresolvedObjectReference => "UNRESOLVED_OBJECT_REFERENCE",
            ErrorKind::DuplicateObjectReference => "DUPLICATE_OBJECT_REFERENCE",
            ErrorKind::MalformedSchema => "MALFORMED_SCHEMA",
            ErrorKind::JsonParseError => "JSON_PARSE_ERROR",
            ErrorKind::ChildAlreadyParented => "CHILD_ALREADY_PARENTED",
            ErrorKind::FileOpenFailed => "FILE_OPEN_FAILED",
            ErrorKind::FileWriteFailed => "FILE_WRITE_FAILED",
            ErrorKind::SchemaAlreadyRegistered => "SCHEMA_ALREADY_REGISTERED",
            ErrorKind::SchemaNotRegistered => "SCHEMA_NOT_REGISTERED",
            ErrorKind::SchemaVersionUnsupported => "SCHEMA_VERSION_UNSUPPORTED",
            ErrorKind::KeyNotFound => "KEY_NOT_FOUND",
            ErrorKind::IllegalIndex => "ILLEGAL_INDEX",
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
            ErrorKind::InternalError => "INTERNAL_ERROR",
            ErrorKind::NotAnItem => "NOT_AN_ITEM",
            ErrorKind::NotAChildOf => "NOT_A_CHILD_OF",
            ErrorKind::NotAChild => "NOT_A_CHILD",
            ErrorKind::NotDescendedFrom => "NOT_DESCENDED_FROM",
            ErrorKind::CannotComputeAvailableRange => "CANNOT_COMPUTE_AVAILABLE_RANGE",
            ErrorKind::InvalidTimeRange => "INVALID_TIME_RANGE",
            ErrorKind::ObjectWithoutDuration => "OBJECT_WITHOUT_DURATION",
            ErrorKind::CannotTrimTransition => "CANNOT_TRIM_TRANSITION",
            ErrorKind::ObjectCycle => "OBJECT_CYCLE",
            ErrorKind::CannotComputeBounds => "CANNOT_COMPUTE_BOUNDS",
            ErrorKind::MediaReferencesDoNotContainActiveKey => {
                "MEDIA_REFERENCES_DO_NOT_CONTAIN_ACTIVE_KEY"
            }
            ErrorKind::MediaReferencesContainEmptyKey => "MEDIA_REFERENCES_CONTAIN_EMPTY_KEY",
            ErrorKind::NotAClip => "NOT_A_CLIP",
            ErrorKind::InvalidRate => "INVALID_RATE",
            ErrorKind::InvalidTimecodeRate => "INVALID_TIMECODE_RATE",
            ErrorKind::InvalidTimecodeString => "INVALID_TIMECODE_STRING",
            ErrorKind::InvalidTimeString => "INVALID_TIME_STRING",
            ErrorKind::NegativeValue => "NEGATIVE_VALUE",
            ErrorKind::InvalidRateForDropFrameTimecode => "INVALID_RATE_FOR_DROP_FRAME_TIMECODE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct OtioError {
    pub kind: ErrorKind,
    pub message: String,
}

impl OtioError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn illegal_index(index: usize, len: usize) -> Self {
        Self::new(
            ErrorKind::IllegalIndex,
            format!("index {index} out of bounds for {len} children"),
        )
    }
}

impl From<OpentimeError> for OtioError {
    fn from(err: OpentimeError) -> Self {
        let kind = match &err {
            OpentimeError::InvalidTimestring { .. } => ErrorKind::InvalidTimeString,
            OpentimeError::InvalidTimecodeRate(_) => ErrorKind::InvalidTimecodeRate,
            OpentimeError::InvalidTimecodeString { .. } => ErrorKind::InvalidTimecodeString,
            OpentimeError::NegativeValue(_) => ErrorKind::NegativeValue,
            OpentimeError::DropFrameUnsupported(_) => ErrorKind::InvalidRateForDropFrameTimecode,
            OpentimeError::InvalidRate(_) => ErrorKind::InvalidRate,
        };
        OtioError::new(kind, err.to_string())
    }
}

impl From<serde_json::Error> for OtioError {
    fn from(err: serde_json::Error) -> Self {
        let kind = if err.is_syntax() || err.is_eof() {
            ErrorKind::JsonParseError
        } else {
            ErrorKind::MalformedSchema
        };
        OtioError::new(kind, err.to_string())
    }
}

/// Out-parameter record: an outcome kind plus a human-readable detail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorStatus {
    pub outcome: ErrorKind,
    pub details: String,
}

impl ErrorStatus {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.outcome == ErrorKind::Ok
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set(&mut self, err: &OtioError) {
        self.outcome = err.kind;
        self.details = err.message.clone();
    }

    /// Record the outcome of `result`, returning the success value if any.
    /// A success resets a previously set error.
    pub fn capture<T>(&mut self, result: Result<T, OtioError>) -> Option<T> {
        match result {
            Ok(v) => {
                self.clear();
                Some(v)
            }
            Err(e) => {
                self.set(&e);
                None
            }
        }
    }
}

impl From<&OtioError> for ErrorStatus {
    fn from(err: &OtioError) -> Self {
        Self {
            outcome: err.kind,
            details: err.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_sets_and_clears() {
        let mut status = ErrorStatus::new();
        let r: Result<u32, OtioError> = Err(OtioError::illegal_index(3, 2));
        assert_eq!(status.capture(r), None);
        assert_eq!(status.outcome, ErrorKind::IllegalIndex);
        assert!(status.details.contains("index 3"));

        assert_eq!(status.capture(Ok::<_, OtioError>(7)), Some(7));
        assert!(status.is_ok());
        assert!(status.details.is_empty());
    }

    #[test]
    fn kind_names_match_serde() {
        let json = serde_json::to_string(&ErrorKind::CannotComputeAvailableRange).unwrap();
        assert_eq!(json, "\"CANNOT_COMPUTE_AVAILABLE_RANGE\"");
        assert_eq!(
            ErrorKind::MediaReferencesDoNotContainActiveKey.as_str(),
            "MEDIA_REFERENCES_DO_NOT_CONTAIN_ACTIVE_KEY"
        );
    }

    #[test]
    fn opentime_errors_map_to_kinds() {
        let e: OtioError = OpentimeError::InvalidTimecodeRate(27.0).into();
        assert_eq!(e.kind, ErrorKind::InvalidTimecodeRate);
    }
}
