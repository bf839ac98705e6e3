//! Codec error types
//!
//! Error codes:
//! - GYM_CODEC_NOT_FOUND (INFO) - no data file yet, decodes as empty
//! - GYM_CODEC_READ_FAILURE (ERROR)
//! - GYM_CODEC_MALFORMED_LINE (ERROR) - aborts the whole decode
//! - GYM_CODEC_WRITE_FAILURE (ERROR)
//! - GYM_CODEC_MISSING_VALUE (ERROR) - record type does not expose a schema field
//! - GYM_CODEC_PARTIAL_REWRITE (WARN) - rewrite proceeded, some records lost

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::schema::{Multiplicity, ScalarKind};

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Why a single line of a data file could not be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineFault {
    #[error("missing ':' separator")]
    MissingSeparator,

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("expected field '{expected}', found '{found}'")]
    UnexpectedField { expected: String, found: String },

    #[error("field '{field}' declared {declared}, encoded as {found}")]
    MultiplicityMismatch {
        field: String,
        declared: Multiplicity,
        found: Multiplicity,
    },

    #[error("invalid {kind} value '{raw}'")]
    InvalidScalar { kind: ScalarKind, raw: String },

    #[error("block ended before field '{0}'")]
    MissingField(String),

    #[error("record rejected value for field '{0}'")]
    Rejected(String),
}

/// Codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("no data file at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed line {line_number} ({fault}): {line}")]
    MalformedLine {
        line_number: usize,
        line: String,
        fault: LineFault,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{record} record has no value for field '{field}'")]
    MissingValue {
        record: &'static str,
        field: &'static str,
    },

    #[error("{lost} of {total} records lost while rewriting")]
    PartialRewrite { lost: usize, total: usize },
}

impl CodecError {
    pub(crate) fn read_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CodecError::ReadFailure {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CodecError::WriteFailure {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(line_number: usize, line: &str, fault: LineFault) -> Self {
        CodecError::MalformedLine {
            line_number,
            line: line.to_string(),
            fault,
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::NotFound { .. } => "GYM_CODEC_NOT_FOUND",
            CodecError::ReadFailure { .. } => "GYM_CODEC_READ_FAILURE",
            CodecError::MalformedLine { .. } => "GYM_CODEC_MALFORMED_LINE",
            CodecError::WriteFailure { .. } => "GYM_CODEC_WRITE_FAILURE",
            CodecError::MissingValue { .. } => "GYM_CODEC_MISSING_VALUE",
            CodecError::PartialRewrite { .. } => "GYM_CODEC_PARTIAL_REWRITE",
        }
    }

    /// An absent file only means nothing was saved yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CodecError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = CodecError::NotFound {
            path: PathBuf::from("sets.txt"),
        };
        assert_eq!(err.code(), "GYM_CODEC_NOT_FOUND");
        assert!(err.is_not_found());

        let err = CodecError::PartialRewrite { lost: 2, total: 5 };
        assert_eq!(err.code(), "GYM_CODEC_PARTIAL_REWRITE");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_malformed_display_contains_context() {
        let err = CodecError::malformed(7, "reps:five", LineFault::InvalidScalar {
            kind: ScalarKind::Integer,
            raw: "five".into(),
        });
        let display = err.to_string();
        assert!(display.contains("line 7"));
        assert!(display.contains("integer"));
        assert!(display.contains("reps:five"));
    }

    #[test]
    fn test_write_failure_keeps_source() {
        use std::error::Error as _;

        let err = CodecError::write_failure(
            "exercises.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("exercises.txt"));
    }
}
