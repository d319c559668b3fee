use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: &str = "10s";
pub const DEFAULT_AUTH_DELAY: &str = "1500ms";

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// api:
///   base_url: "http://localhost:8000"
///   timeout: "10s"
/// auth_delay: "1500ms"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    /// Simulated latency of the login and signup flows (humantime format)
    #[serde(default = "default_auth_delay")]
    pub auth_delay: String,

    /// Where the profile and session are kept (default: ~/.config/credit-score/state.json)
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth_delay: default_auth_delay(),
            state_path: None,
        }
    }
}

impl Config {
    pub fn auth_delay(&self) -> Result<Duration> {
        humantime::parse_duration(self.auth_delay.trim())
            .with_context(|| format!("Invalid auth_delay '{}'", self.auth_delay))
    }
}

/// Prediction API connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (humantime format, e.g. "10s")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Result<Duration> {
        humantime::parse_duration(self.timeout.trim())
            .with_context(|| format!("Invalid api.timeout '{}'", self.timeout))
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_string()
}

fn default_auth_delay() -> String {
    DEFAULT_AUTH_DELAY.to_string()
}
