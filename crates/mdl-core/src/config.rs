use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Hosts whose URLs the resolution service knows how to turn into archives.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "tidal.com",
    "www.tidal.com",
    "listen.tidal.com",
    "www.qobuz.com",
    "open.qobuz.com",
    "play.qobuz.com",
    "soundcloud.com",
    "www.soundcloud.com",
    "deezer.com",
    "www.deezer.com",
    "open.spotify.com",
    "youtube.com",
    "www.youtube.com",
    "music.youtube.com",
    "youtu.be",
    "www.jiosaavn.com",
];

/// Floor applied to `poll_interval_ms`; smaller values would hammer the service.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Global configuration loaded from `~/.config/mdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdlConfig {
    /// Resolution service endpoint. Downloads refuse to start while unset.
    #[serde(default)]
    pub service_url: Option<String>,
    /// Optional session token, sent as `Authorization: Bearer <token>`.
    #[serde(default)]
    pub session_token: Option<String>,
    /// Delay between status queries while the job is pending (at least 100 ms).
    pub poll_interval_ms: u64,
    /// Connect timeout for both status queries and the archive download.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for a single status query.
    pub request_timeout_secs: u64,
    /// Source URL hosts accepted by `download` (exact match).
    pub allowed_hosts: Vec<String>,
    /// Directory for the temporary archive (None = system temp dir).
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl Default for MdlConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            session_token: None,
            poll_interval_ms: 1500,
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
            temp_dir: None,
        }
    }
}

impl MdlConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms).max(MIN_POLL_INTERVAL)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
