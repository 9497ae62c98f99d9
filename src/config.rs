use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::filter::{CategoryTab, TimeWindow, TokenFilters};
use crate::ticker::WalkBounds;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub interval_ms: u64,
    pub max_swing: f64,
    pub liquidity_swing: f64,
    pub max_volume_step: u64,
    pub floor: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            max_swing: 0.03,
            liquidity_swing: 0.01,
            max_volume_step: 1_000,
            floor: 1_000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub latency_ms: u64,
    /// Run the listing API inside the dashboard process.
    pub embedded: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            latency_ms: 1_000,
            embedded: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Mock,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub base_url: String,
    /// Artificial delay of the in-process mock source.
    pub latency_ms: u64,
    /// Whole-request timeout of the HTTP source.
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            base_url: "http://127.0.0.1:3000".to_string(),
            latency_ms: 1_500,
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    pub flash_dwell_ms: u64,
    pub default_tab: String,
    pub default_time: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 100,
            flash_dwell_ms: 300,
            default_tab: "surge".to_string(),
            default_time: "5m".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "token-pulse.log".to_string(),
        }
    }
}

impl FeedConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn walk_bounds(&self) -> WalkBounds {
        WalkBounds {
            max_swing: self.max_swing,
            liquidity_swing: self.liquidity_swing,
            max_volume_step: self.max_volume_step,
            floor: self.floor,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl UiConfig {
    pub fn flash_dwell(&self) -> Duration {
        Duration::from_millis(self.flash_dwell_ms)
    }

    pub fn default_filters(&self) -> Result<TokenFilters> {
        let tab: CategoryTab = self
            .default_tab
            .parse()
            .with_context(|| format!("ui.default_tab '{}' is invalid", self.default_tab))?;
        let time: TimeWindow = self
            .default_time
            .parse()
            .with_context(|| format!("ui.default_time '{}' is invalid", self.default_time))?;
        Ok(TokenFilters { tab, time })
    }
}

fn config_path() -> PathBuf {
    std::env::var("TOKEN_PULSE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config/default.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_from_path(&config_path())?;
        if let Ok(url) = std::env::var("TOKEN_PULSE_SOURCE_URL") {
            if !url.trim().is_empty() {
                config.source.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed.interval_ms == 0 {
            bail!("feed.interval_ms must be > 0");
        }
        for (name, v) in [
            ("feed.max_swing", self.feed.max_swing),
            ("feed.liquidity_swing", self.feed.liquidity_swing),
        ] {
            if !(0.0..1.0).contains(&v) {
                bail!("{} must be in [0, 1), got {}", name, v);
            }
        }
        if self.feed.floor.is_nan() || self.feed.floor < 0.0 {
            bail!("feed.floor must be >= 0");
        }
        if self.source.timeout_ms == 0 {
            bail!("source.timeout_ms must be > 0");
        }
        if self.ui.flash_dwell_ms == 0 {
            bail!("ui.flash_dwell_ms must be > 0");
        }
        if self.ui.refresh_rate_ms == 0 {
            bail!("ui.refresh_rate_ms must be > 0");
        }
        if self.source.kind == SourceKind::Http && self.source.base_url.trim().is_empty() {
            bail!("source.base_url is required when source.kind = \"http\"");
        }
        self.ui.default_filters()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.feed.interval_ms, 1_000);
        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.ui.flash_dwell(), Duration::from_millis(300));
        assert_eq!(config.ui.default_filters().unwrap(), TokenFilters::default());
    }

    #[test]
    fn rejects_zero_interval() {
        assert!(Config::from_toml_str("[feed]\ninterval_ms = 0\n").is_err());
    }

    #[test]
    fn rejects_unknown_source_kind() {
        assert!(Config::from_toml_str("[source]\nkind = \"grpc\"\n").is_err());
    }
}
