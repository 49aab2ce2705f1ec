//! Remote simplifier configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use plainly_core::{Error, Result};

/// Configuration for the HTTP simplification service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl RemoteConfig {
    pub const DEFAULT_API_URL: &'static str = "http://127.0.0.1:5000/simplify";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = env::var("PLAINLY_API_URL")
            .unwrap_or_else(|_| Self::DEFAULT_API_URL.to_string());

        let timeout_secs = match env::var("PLAINLY_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!(
                    "PLAINLY_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => Self::DEFAULT_TIMEOUT_SECS,
        };

        Self::new(api_url).with_timeout_secs(timeout_secs).validated()
    }

    /// Create configuration with an explicit endpoint
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject endpoints that are not http(s) and zero timeouts
    pub fn validated(self) -> Result<Self> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(Error::Configuration(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Configuration(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(self)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_API_URL)
    }
}
