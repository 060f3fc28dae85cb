//! Error type for song recognition.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Everything that can go wrong between receiving a path and having a
/// [`crate::Metadata`] record.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The recognizer answered, but without a matched track.
    #[error("No song recognized")]
    NoMatch,

    /// The recognizer binary could not be found.
    #[error("recognizer binary not found: {0}")]
    BinaryNotFound(String),

    /// The recognizer process could not be started or waited on.
    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The recognizer ran but reported failure.
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The response was not JSON, or a field had an unexpected type.
    #[error("invalid recognition response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Failure reported by a recognition backend in its own words.
    #[error("{0}")]
    Service(String),
}

impl RecognitionError {
    /// True when the recognizer worked and simply found nothing.
    pub fn is_no_match(&self) -> bool {
        matches!(self, RecognitionError::NoMatch)
    }
}
