//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;
use crate::Result;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const ENV_API_URL: &str = "NEWSDESK_API_URL";
const ENV_DATA_DIR: &str = "NEWSDESK_DATA_DIR";
const ENV_TIMEOUT_SECS: &str = "NEWSDESK_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the news backend
    pub api_base_url: String,
    /// Path to the database holding the persisted session
    pub database_path: PathBuf,
    /// Per-request timeout; `None` leaves the transport default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            database_path: data_dir.join("newsdesk.db"),
            request_timeout_secs: None,
        }
    }

    /// Defaults overridden by `NEWSDESK_API_URL`, `NEWSDESK_DATA_DIR` and
    /// `NEWSDESK_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(Self::data_dir);
        let mut config = Self::new(data_dir);

        if let Some(url) = non_empty(ENV_API_URL) {
            config.api_base_url = url;
        }
        config.request_timeout_secs = non_empty(ENV_TIMEOUT_SECS).and_then(|v| {
            v.trim()
                .parse()
                .map_err(|_| tracing::warn!(value = %v, "Ignoring invalid {ENV_TIMEOUT_SECS}"))
                .ok()
        });

        config
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("NewsDesk"))
            .unwrap_or_else(|| PathBuf::from(".newsdesk"))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_base_url)
            .map_err(|e| CoreError::Config(format!("api_base_url {}: {e}", self.api_base_url)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CoreError::Config(format!(
                "api_base_url must be http(s), got {}",
                url.scheme()
            )));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(CoreError::Config("database_path is empty".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
