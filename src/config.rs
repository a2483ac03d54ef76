//! Configuration loading from TOML.
//!
//! Reads an optional `config.toml` and deserializes into strongly-typed
//! structs. Every field has a default, so a missing file is not an error.
//! The target URL may be overridden by `DAYCAST_URL`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::engine::BadRecordPolicy;
use crate::source::metcheck::DEFAULT_URL;

/// Environment variable that overrides `source.url`.
pub const URL_ENV: &str = "DAYCAST_URL";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub server: ServerConfig,
    pub refresh: RefreshConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub on_bad_record: BadRecordPolicy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: 15,
            on_bad_record: BadRecordPolicy::Abort,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between automatic refreshes when serving. 0 disables the timer.
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 1800 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "daycast=info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply the URL override chain: explicit argument, then `DAYCAST_URL`.
    pub fn with_url_override(self, cli_url: Option<String>) -> Self {
        self.apply_url_override(cli_url, std::env::var(URL_ENV).ok())
    }

    /// `cli_url` beats `env_url`, which beats the loaded value. Empty strings
    /// count as unset.
    pub fn apply_url_override(mut self, cli_url: Option<String>, env_url: Option<String>) -> Self {
        let set = |u: &String| !u.is_empty();
        if let Some(url) = cli_url.filter(set).or(env_url.filter(set)) {
            self.source.url = url;
        }
        self
    }
}
