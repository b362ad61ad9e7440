//! Origin client
//!
//! The `Origin` trait is the seam between the request pipeline and the
//! network: `HttpOrigin` fetches over HTTP with `reqwest`, tests substitute
//! a mock.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::error::{status_line, GatewayError};

/// Response from the origin, reduced to what the pipeline needs.
#[derive(Debug, Clone)]
pub struct OriginResponse {
    pub status: u16,
    /// Status line, e.g. `404 Not Found`.
    ///
    /// reqwest drops the origin's reason phrase, so this is always the
    /// canonical phrase for `status`.
    pub reason: String,
    /// Header names are lowercase
    pub headers: Vec<(String, String)>,
    /// Empty unless status is 200
    pub body: Bytes,
}

impl OriginResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Headers whose lowercase name starts with `prefix`.
    pub fn headers_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a (String, String)> + 'a {
        self.headers
            .iter()
            .filter(move |(name, _)| name.starts_with(prefix))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Origin: Send + Sync {
    /// GET `path` from the origin. Only transport failures are errors;
    /// non-200 statuses come back as a response.
    async fn fetch(&self, path: &str) -> Result<OriginResponse, GatewayError>;
}

/// HTTP origin rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpOrigin {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOrigin {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Join base URL and request path with exactly one slash.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Origin for HttpOrigin {
    async fn fetch(&self, path: &str) -> Result<OriginResponse, GatewayError> {
        let url = self.url_for(path);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, timeout = e.is_timeout(), "Origin fetch failed");
            GatewayError::upstream_timeout(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        if status != 200 {
            return Ok(OriginResponse {
                status,
                reason: status_line(status),
                headers,
                body: Bytes::new(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::upstream_timeout(e.to_string())
            } else {
                GatewayError::decode(format!("Failed to read origin body: {}", e))
            }
        })?;

        Ok(OriginResponse {
            status,
            reason: status_line(status),
            headers,
            body,
        })
    }
}
