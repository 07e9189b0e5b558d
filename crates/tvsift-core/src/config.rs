use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::RequestOptions;
use crate::playlist::{Denylists, DEFAULT_DOMAIN_DENYLIST, DEFAULT_GROUP_DENYLIST};
use crate::validator::ValidatorOptions;

/// Playlists processed when no sources are configured.
pub const DEFAULT_SOURCES: [&str; 3] = [
    "https://iptv-org.github.io/iptv/index.country.m3u",
    "https://raw.githubusercontent.com/luongz/Japan-IPTV/main/jp.m3u",
    "https://raw.githubusercontent.com/akkradet/IPTV-THAI/refs/heads/master/FREETV.m3u",
];

/// Run configuration loaded from `~/.config/tvsift/config.toml`.
///
/// Immutable once loaded; the parser and dispatcher receive the pieces they
/// need (`denylists`, `validator_options`, `workers`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Maximum accepted response time in seconds (inclusive).
    pub latency_threshold_secs: f64,
    /// Maximum redirect hops followed per link.
    pub max_redirects: u32,
    /// Timeout for each HTTP request in seconds.
    pub request_timeout_secs: u64,
    /// Concurrent validations per document.
    pub workers: usize,
    /// Groups whose entries are dropped before validation.
    pub group_denylist: Vec<String>,
    /// Link hosts that are never validated.
    pub domain_denylist: Vec<String>,
    /// Playlist documents to process, in order.
    pub sources: Vec<String>,
    /// Output playlist, truncated at start of each run.
    pub output_path: PathBuf,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            latency_threshold_secs: 5.0,
            max_redirects: 10,
            request_timeout_secs: 10,
            workers: 10,
            group_denylist: DEFAULT_GROUP_DENYLIST.iter().map(|s| s.to_string()).collect(),
            domain_denylist: DEFAULT_DOMAIN_DENYLIST.iter().map(|s| s.to_string()).collect(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            output_path: PathBuf::from("new.m3u"),
        }
    }
}

impl SiftConfig {
    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.latency_threshold_secs.is_finite() || self.latency_threshold_secs < 0.0 {
            anyhow::bail!(
                "latency_threshold_secs must be a non-negative number, got {}",
                self.latency_threshold_secs
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Worker pool size (at least 1).
    pub fn workers(&self) -> usize {
        self.workers.max(1)
    }

    pub fn denylists(&self) -> Denylists {
        Denylists::new(self.group_denylist.iter().cloned(), self.domain_denylist.iter().cloned())
    }

    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            request: RequestOptions {
                timeout: Duration::from_secs(self.request_timeout_secs),
                max_redirects: self.max_redirects,
            },
            latency_threshold_secs: self.latency_threshold_secs,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tvsift")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SiftConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SiftConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<SiftConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SiftConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
