//! Special endpoint handlers for the gateway.
//!
//! This module provides response generators for built-in endpoints:
//! - `/_status` - Request counters and their sliding-window rates
//! - `/_version` - Crate version
//!
//! # Design
//!
//! Functions return `EndpointResponse` instead of writing directly to session.
//! The caller turns it into an HTTP response.

use http::{header, Response, StatusCode};

use crate::stats::StatsCounter;

/// Response from a special endpoint handler.
#[derive(Debug, Clone)]
pub struct EndpointResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value
    pub content_type: &'static str,
    /// Response body
    pub body: String,
}

impl EndpointResponse {
    pub fn plain_text(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body,
        }
    }

    pub fn into_response(self) -> Response<Vec<u8>> {
        let body = self.body.into_bytes();
        let mut response = Response::new(body);
        *response.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let length = response.body().len();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static(self.content_type),
        );
        headers.insert(header::CONTENT_LENGTH, header::HeaderValue::from(length));
        response
    }
}

/// Generate response for /_status endpoint.
///
/// ```text
/// nb_requests: 12
/// nb_failures: 1
/// nb_success: 11
///
/// nb_requests_300s: 4
/// nb_failures_300s: 0
/// nb_success_300s: 4
/// ```
pub fn handle_status(stats: &StatsCounter) -> EndpointResponse {
    EndpointResponse::plain_text(200, stats.report().to_string())
}

/// Generate response for /_version endpoint.
pub fn handle_version() -> EndpointResponse {
    EndpointResponse::plain_text(200, format!("{}\n", env!("CARGO_PKG_VERSION")))
}
