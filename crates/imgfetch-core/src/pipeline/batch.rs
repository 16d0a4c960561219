//! Sequential batch over a list of URLs sharing one checksum set.

use std::path::Path;

use super::{fetch_image, outcome_kind, FetchImageError, FetchOptions, OutcomeKind, SavedImage};
use crate::checksum::ChecksumSet;

/// Counts per outcome for one batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub connection_errors: usize,
    pub not_images: usize,
    pub duplicates: usize,
    pub unexpected_errors: usize,
}

impl BatchSummary {
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Saved => self.saved += 1,
            OutcomeKind::ConnectionError => self.connection_errors += 1,
            OutcomeKind::SkippedNotImage => self.not_images += 1,
            OutcomeKind::SkippedDuplicate => self.duplicates += 1,
            OutcomeKind::UnexpectedError => self.unexpected_errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.saved
            + self.connection_errors
            + self.not_images
            + self.duplicates
            + self.unexpected_errors
    }

    pub fn skipped(&self) -> usize {
        self.not_images + self.duplicates
    }

    pub fn failed(&self) -> usize {
        self.connection_errors + self.unexpected_errors
    }
}

/// Runs [`fetch_image`] for each URL in order. Every URL is attempted no
/// matter how earlier ones ended; `on_result` sees each result as it happens.
pub fn fetch_all<I, S, F>(
    urls: I,
    dir: &Path,
    checksums: &mut ChecksumSet,
    opts: &FetchOptions,
    mut on_result: F,
) -> BatchSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str, &Result<SavedImage, FetchImageError>),
{
    let mut summary = BatchSummary::default();
    for url in urls {
        let url = url.as_ref();
        let result = fetch_image(url, dir, checksums, opts);
        match &result {
            Ok(saved) => tracing::info!(
                url,
                checksum = %saved.checksum,
                path = %saved.path.display(),
                bytes = saved.bytes,
                "image saved"
            ),
            Err(e @ FetchImageError::NotImage { .. })
            | Err(e @ FetchImageError::Duplicate { .. }) => {
                tracing::info!(url, "skipped: {}", e)
            }
            Err(e) => tracing::warn!(url, "failed: {}", e),
        }
        summary.record(outcome_kind(&result));
        on_result(url, &result);
    }
    tracing::info!(?summary, "batch finished");
    summary
}
