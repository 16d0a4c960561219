//! `imgfetch checksum <path>` – print the digest used for duplicate detection.

use anyhow::Result;
use imgfetch_core::checksum;
use std::path::Path;

pub fn run_checksum(path: &Path) -> Result<()> {
    let digest = checksum::sha256_path(path)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
