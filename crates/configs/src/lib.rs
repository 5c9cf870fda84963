//! # configs
//!
//! Layered settings for feedboard: built-in defaults, then an optional TOML
//! file, then `FEEDBOARD__SECTION__KEY` environment variables (a `.env` file
//! is loaded first if present).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const ENV_PREFIX: &str = "FEEDBOARD";
pub const DEFAULT_CONFIG_FILE: &str = "feedboard.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Invalid(format!("unknown log format `{other}`"))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    pub page_size: usize,
    pub load_more_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSettings {
    pub post_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Where local storage is persisted. Empty keeps it in memory.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub format: LogFormat,
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub feed: FeedSettings,
    pub comments: CommentSettings,
    pub search: SearchSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Loads settings from `file` (or `feedboard.toml` in the working
    /// directory, if it exists) and the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), ".env loaded");
        }
        Self::build(file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`Settings::load`], but reads variables from `vars` instead of
    /// the process environment.
    pub fn load_with_env(file: Option<&Path>, vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(file, Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn build(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match file {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("api.base_url", "https://jsonplaceholder.typicode.com")?
            .set_default("api.timeout_secs", 30_i64)?
            .set_default("feed.page_size", 10_i64)?
            .set_default("feed.load_more_delay_ms", 300_i64)?
            .set_default("comments.post_delay_ms", 500_i64)?
            .set_default("search.debounce_ms", 300_i64)?
            .set_default("storage.path", ".feedboard/local_storage.json")?
            .set_default("log.format", "pretty")?
            .set_default("log.filter", "info")?
            .add_source(file)
            .add_source(env.prefix_separator("__").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got `{}`",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".into()));
        }
        if self.feed.page_size == 0 {
            return Err(ConfigError::Invalid("feed.page_size must be at least 1".into()));
        }
        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn load_more_delay(&self) -> Duration {
        Duration::from_millis(self.feed.load_more_delay_ms)
    }

    pub fn comment_delay(&self) -> Duration {
        Duration::from_millis(self.comments.post_delay_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn storage_path(&self) -> Option<&Path> {
        let path = self.storage.path.trim();
        (!path.is_empty()).then(|| Path::new(path))
    }
}
