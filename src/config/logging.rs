//! Logging and statistics configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_STAT_PERIOD_SECS};

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_period() -> usize {
    DEFAULT_STAT_PERIOD_SECS
}

/// Output encoding of the stdout log layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LoggingFormat,
    /// OTLP collector address (e.g. "http://localhost:4317")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_endpoint: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LoggingFormat::default(),
            remote_endpoint: None,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(endpoint) = &self.remote_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "logging.remote_endpoint '{}' must start with http:// or https://",
                    endpoint
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Sliding window length in seconds
    #[serde(default = "default_period")]
    pub period: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
        }
    }
}

impl StatsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.period == 0 {
            return Err("stats.period must be greater than 0".to_string());
        }
        Ok(())
    }
}
