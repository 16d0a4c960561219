use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::FetchOptions;

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImgfetchConfig {
    /// Directory images are saved into; created (with parents) before fetching.
    pub output_dir: PathBuf,
    /// Per-request timeout in seconds, applied to connect and the whole transfer.
    pub timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirects: u32,
    /// Name used when the URL has no usable last path segment.
    pub fallback_filename: String,
}

impl Default for ImgfetchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("fetched_images"),
            timeout_secs: 10,
            max_redirects: 10,
            fallback_filename: crate::url_model::DEFAULT_FILENAME.to_string(),
        }
    }
}

impl ImgfetchConfig {
    /// Rejects values that would leave a request unbounded.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            max_redirects: self.max_redirects,
            fallback_filename: self.fallback_filename.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImgfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ImgfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ImgfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ImgfetchConfig::default();
        assert_eq!(cfg.output_dir, PathBuf::from("fetched_images"));
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.max_redirects, 10);
        assert_eq!(cfg.fallback_filename, "downloaded_image.jpg");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ImgfetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ImgfetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.output_dir, cfg.output_dir);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.fallback_filename, cfg.fallback_filename);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            output_dir = "/tmp/pics"
            timeout_secs = 3
        "#;
        let cfg: ImgfetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/pics"));
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.max_redirects, 10);
        assert_eq!(cfg.fallback_filename, "downloaded_image.jpg");
    }

    #[test]
    fn zero_timeout_rejected() {
        let cfg: ImgfetchConfig = toml::from_str("timeout_secs = 0").unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
        assert!(ImgfetchConfig::default().validate().is_ok());
    }

    #[test]
    fn fetch_options_from_config() {
        let cfg = ImgfetchConfig {
            timeout_secs: 4,
            max_redirects: 2,
            fallback_filename: "x.png".into(),
            ..ImgfetchConfig::default()
        };
        let opts = cfg.fetch_options();
        assert_eq!(opts.timeout, Duration::from_secs(4));
        assert_eq!(opts.max_redirects, 2);
        assert_eq!(opts.fallback_filename, "x.png");
    }
}
