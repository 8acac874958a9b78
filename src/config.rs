use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_FALLBACK_REGION: &str = "West Bengal";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Base URL of the optional news backend (`GET/POST {base}/news`).
    pub news_api_url: Option<String>,

    #[serde(default = "default_remote_timeout_ms")]
    pub remote_timeout_ms: u64,

    pub claude_api_key: Option<String>,

    #[serde(default = "default_claude_model")]
    pub claude_model: String,

    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Location resolved for the "My Area" feed. Falls back to `fallback_region`.
    pub home_location: Option<String>,

    #[serde(default = "default_fallback_region")]
    pub fallback_region: String,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bongo-news");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("news.db").to_string_lossy().to_string()
}

fn default_remote_timeout_ms() -> u64 {
    2000
}

fn default_claude_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_fallback_region() -> String {
    DEFAULT_FALLBACK_REGION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            news_api_url: None,
            remote_timeout_ms: default_remote_timeout_ms(),
            claude_api_key: None,
            claude_model: default_claude_model(),
            admin_password: default_admin_password(),
            home_location: None,
            fallback_region: default_fallback_region(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bongo-news")
            .join("config.toml")
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }

    /// Location used by the "My Area" feed.
    pub fn resolved_location(&self) -> &str {
        self.home_location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(&self.fallback_region)
    }
}
