//! Per-URL results of the fetch-and-store pipeline.

use std::fmt;
use std::path::PathBuf;

use crate::fetch::FetchError;

/// An image that was accepted and written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// Derived filename inside the output directory.
    pub filename: String,
    /// Full path the bytes were written to.
    pub path: PathBuf,
    /// SHA-256 of the saved bytes, now recorded in the run's checksum set.
    pub checksum: String,
    pub bytes: usize,
}

/// Why a URL did not produce a saved image. None of these stop the batch.
#[derive(Debug, thiserror::Error)]
pub enum FetchImageError {
    /// Network or transport failure, including timeouts and non-2xx statuses.
    #[error("connection error: {0}")]
    Connection(#[from] FetchError),
    /// `Content-Type` missing or not `image/*`.
    #[error("not an image (content type: {})", .content_type.as_deref().unwrap_or("none"))]
    NotImage { content_type: Option<String> },
    /// Identical content was already saved earlier in this run.
    #[error("duplicate image (sha256 {checksum})")]
    Duplicate { checksum: String },
    /// Anything else that went wrong while saving, e.g. a filesystem error.
    #[error("could not save {}: {source}", .path.display())]
    Unexpected {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome category, for tallying and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Saved,
    ConnectionError,
    SkippedNotImage,
    SkippedDuplicate,
    UnexpectedError,
}

impl FetchImageError {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            FetchImageError::Connection(_) => OutcomeKind::ConnectionError,
            FetchImageError::NotImage { .. } => OutcomeKind::SkippedNotImage,
            FetchImageError::Duplicate { .. } => OutcomeKind::SkippedDuplicate,
            FetchImageError::Unexpected { .. } => OutcomeKind::UnexpectedError,
        }
    }
}

/// Kind of a pipeline result, successful or not.
pub fn outcome_kind(result: &Result<SavedImage, FetchImageError>) -> OutcomeKind {
    match result {
        Ok(_) => OutcomeKind::Saved,
        Err(e) => e.kind(),
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeKind::Saved => "saved",
            OutcomeKind::ConnectionError => "connection error",
            OutcomeKind::SkippedNotImage => "skipped (not an image)",
            OutcomeKind::SkippedDuplicate => "skipped (duplicate)",
            OutcomeKind::UnexpectedError => "unexpected error",
        };
        f.write_str(s)
    }
}
