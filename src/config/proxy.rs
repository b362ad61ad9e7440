//! Origin proxy configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{DEFAULT_MAX_REQUESTS, DEFAULT_PROXY_TIMEOUT_MS};

fn default_timeout() -> u64 {
    DEFAULT_PROXY_TIMEOUT_MS
}

fn default_max_requests() -> usize {
    DEFAULT_MAX_REQUESTS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Origin base URL, e.g. `http://images.internal:8080/media`
    pub url: String,
    /// Fetch timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Concurrency hint. Reported at startup, not enforced.
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
}

impl ProxyConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(format!(
                "proxy.url '{}' must start with http:// or https://",
                self.url
            ));
        }
        if self.timeout == 0 {
            return Err("proxy.timeout must be greater than 0".to_string());
        }
        if self.max_requests == 0 {
            return Err("proxy.max_requests must be greater than 0".to_string());
        }
        Ok(())
    }
}
