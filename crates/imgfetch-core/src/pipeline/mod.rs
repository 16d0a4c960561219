//! Fetch-and-store pipeline for one URL.
//!
//! Steps: GET with timeout, require an `image/*` content type, reject content
//! whose checksum is already in the run's set, derive the filename from the
//! URL, write the bytes, then record the checksum.
//!
//! Duplicate polarity: the tool this replaces skipped content whose checksum
//! was *absent* from the set, so every first download was dropped and only
//! repeats were saved. Here content is rejected when its checksum is already
//! present and accepted (then recorded) when it is new.

mod batch;
mod outcome;

pub use batch::{fetch_all, BatchSummary};
pub use outcome::{outcome_kind, FetchImageError, OutcomeKind, SavedImage};

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::checksum::{sha256_bytes, ChecksumSet};
use crate::fetch::{self, FetchedContent};
use crate::url_model::{derive_filename, DEFAULT_FILENAME};

/// Per-request settings shared by every URL in a batch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Bound on connect and on the whole transfer.
    pub timeout: Duration,
    pub max_redirects: u32,
    /// Used when the URL has no usable last path segment.
    pub fallback_filename: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 10,
            fallback_filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

/// Fetches `url` and, if it is a new image, saves it into `dir` and records
/// its checksum in `checksums`.
///
/// The set is only mutated when the file was written. Rejected URLs and
/// failed saves leave it untouched.
pub fn fetch_image(
    url: &str,
    dir: &Path,
    checksums: &mut ChecksumSet,
    opts: &FetchOptions,
) -> Result<SavedImage, FetchImageError> {
    tracing::debug!(url, "fetching");
    let content = fetch::get(url, opts.timeout, opts.max_redirects)?;
    store_content(url, content, dir, checksums, opts)
}

/// Validate, dedupe, and persist already retrieved content.
pub fn store_content(
    url: &str,
    content: FetchedContent,
    dir: &Path,
    checksums: &mut ChecksumSet,
    opts: &FetchOptions,
) -> Result<SavedImage, FetchImageError> {
    if !content.is_image() {
        return Err(FetchImageError::NotImage {
            content_type: content.content_type,
        });
    }

    let checksum = sha256_bytes(&content.body);
    if checksums.contains(&checksum) {
        return Err(FetchImageError::Duplicate { checksum });
    }

    let filename = derive_filename(url, &opts.fallback_filename);
    let path = dir.join(&filename);
    if path.exists() {
        tracing::debug!(path = %path.display(), "overwriting existing file");
    }
    fs::write(&path, &content.body).map_err(|source| FetchImageError::Unexpected {
        path: path.clone(),
        source,
    })?;

    checksums.insert(checksum.clone());

    Ok(SavedImage {
        filename,
        path,
        checksum,
        bytes: content.body.len(),
    })
}
