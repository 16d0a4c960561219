//! `imgfetch fetch [URL]...` – download images into a directory.

use anyhow::{Context, Result};
use imgfetch_core::checksum::ChecksumSet;
use imgfetch_core::config::ImgfetchConfig;
use imgfetch_core::pipeline::{self, BatchSummary, FetchImageError, SavedImage};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments of the `fetch` subcommand; `None` means "use the config value".
#[derive(Debug, Default)]
pub struct FetchArgs {
    pub urls: Vec<String>,
    pub dir: Option<PathBuf>,
    pub timeout: Option<u64>,
}

pub fn run_fetch(cfg: &ImgfetchConfig, args: FetchArgs) -> Result<()> {
    run_fetch_with_input(cfg, args, &mut io::stdin().lock(), &mut io::stdout())
}

/// `run_fetch` with the prompt's input and output supplied by the caller.
fn run_fetch_with_input<R: BufRead, W: Write>(
    cfg: &ImgfetchConfig,
    args: FetchArgs,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let mut opts = cfg.fetch_options();
    if let Some(secs) = args.timeout {
        opts.timeout = Duration::from_secs(secs);
    }
    let dir = args.dir.unwrap_or_else(|| cfg.output_dir.clone());

    let urls = if args.urls.is_empty() {
        print_banner(out)?;
        prompt_urls(input, out)?
    } else {
        args.urls
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("create output directory {}", dir.display()))?;
    if urls.is_empty() {
        writeln!(out, "No URLs provided.")?;
        return Ok(());
    }
    tracing::info!(dir = %dir.display(), count = urls.len(), "fetching images");

    let mut checksums = ChecksumSet::new();
    let summary = pipeline::fetch_all(&urls, &dir, &mut checksums, &opts, |url, result| {
        for line in report_lines(url, result) {
            println!("{line}");
        }
    });
    println!("{}", summary_line(&summary));
    Ok(())
}

fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Welcome to the Ubuntu Image Fetcher!")?;
    writeln!(out, "A tool for mindfully collecting images from the web")?;
    writeln!(out)
}

/// Prompts once and splits the answer on whitespace.
fn prompt_urls<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Vec<String>> {
    write!(out, "Please enter the image URLs (separated by spaces): ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("read URLs from stdin")?;
    Ok(line.split_whitespace().map(str::to_string).collect())
}

/// Console lines for one URL's result.
fn report_lines(url: &str, result: &Result<SavedImage, FetchImageError>) -> Vec<String> {
    match result {
        Ok(saved) => vec![
            format!(" Successfully fetched: {}", saved.filename),
            format!(" Image saved to: {}", saved.path.display()),
        ],
        Err(FetchImageError::NotImage { .. }) => vec![format!("Skipping {url}: Not an image")],
        Err(FetchImageError::Duplicate { .. }) => vec![format!("Skipping {url}: Duplicate image")],
        Err(FetchImageError::Connection(e)) if e.is_timeout() => {
            vec![format!("Connection error for {url}: request timed out ({e})")]
        }
        Err(FetchImageError::Connection(e)) => vec![format!("Connection error for {url}: {e}")],
        Err(e @ FetchImageError::Unexpected { .. }) => {
            vec![format!("An error occurred while processing {url}: {e}")]
        }
    }
}

fn summary_line(summary: &BatchSummary) -> String {
    format!(
        "Done: {} saved, {} skipped, {} failed ({} URLs)",
        summary.saved,
        summary.skipped(),
        summary.failed(),
        summary.total()
    )
}
