use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Remote model-search service configuration
    pub service: ServiceConfig,
    /// Progress polling cadence in milliseconds
    pub poll_interval_ms: u64,
    /// Number of transcript turns forwarded with each search
    pub max_history_turns: usize,
}

/// Where and how to reach the model-search/training service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Primary search request timeout in seconds
    pub request_timeout_secs: u64,
    /// Per-poll timeout in seconds
    pub poll_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 300,
            poll_timeout_secs: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9100".to_string(),
            service: ServiceConfig::default(),
            poll_interval_ms: 500,
            max_history_turns: 10,
        }
    }
}

const MIN_POLL_INTERVAL_MS: u64 = 50;

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("PGS_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("PGS_SERVICE_URL") {
            config.service.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(val) = std::env::var("PGS_POLL_INTERVAL_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.poll_interval_ms = v.max(MIN_POLL_INTERVAL_MS);
            }
        }
        if let Ok(val) = std::env::var("PGS_REQUEST_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.service.request_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("PGS_MAX_HISTORY_TURNS") {
            if let Ok(v) = val.parse() {
                config.max_history_turns = v;
            }
        }

        config
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}
