//! Content checksums and the per-run set used for deduplication.
//!
//! Checksums are lowercase hex SHA-256 digests. The set lives only for one
//! run; nothing is persisted between runs.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of `content` and return the digest as lowercase hex.
pub fn sha256_bytes(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Compute SHA-256 of a file on disk, same format as [`sha256_bytes`].
/// Reads in chunks so saved images can be compared without loading them whole.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Checksums of content accepted and saved during the current run.
#[derive(Debug, Default, Clone)]
pub struct ChecksumSet {
    seen: HashSet<String>,
}

impl ChecksumSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, checksum: &str) -> bool {
        self.seen.contains(checksum)
    }

    /// Records a checksum. Returns false if it was already present.
    pub fn insert(&mut self, checksum: impl Into<String>) -> bool {
        self.seen.insert(checksum.into())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
