//! CLI for the imgfetch image collector.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgfetch_core::config;
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_fetch, FetchArgs};

/// Top-level CLI for imgfetch.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "imgfetch: collect images from the web, skipping duplicates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download images from URLs into a directory. Prompts for URLs if none are given.
    Fetch {
        /// Image URLs, processed in order.
        urls: Vec<String>,
        /// Output directory (default from config, usually `fetched_images`).
        #[arg(long, short = 'd', value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Per-request timeout in seconds, at least 1 (default from config).
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
    },

    /// Compute SHA-256 of a file, as used for duplicate detection.
    Checksum {
        /// Path to the file.
        path: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch { urls, dir, timeout } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg, FetchArgs { urls, dir, timeout })?;
            }
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
        }

        Ok(())
    }
}
