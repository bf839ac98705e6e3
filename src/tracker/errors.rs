//! Tracker error types

use thiserror::Error;

use crate::codec::CodecError;

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Tracker errors
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Exercise with given name already exists: {0}")]
    DuplicateExercise(String),

    #[error("No exercise with given name: {0}")]
    UnknownExercise(String),

    #[error("No sets to delete")]
    NoSets,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl TrackerError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TrackerError::DuplicateExercise(_) => "GYM_DUPLICATE_EXERCISE",
            TrackerError::UnknownExercise(_) => "GYM_UNKNOWN_EXERCISE",
            TrackerError::NoSets => "GYM_NO_SETS",
            TrackerError::Codec(e) => e.code(),
        }
    }

    /// Business-rule rejections leave both memory and files untouched.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TrackerError::Codec(_))
    }
}
