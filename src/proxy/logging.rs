//! Access log records.
//!
//! The record is built from plain values so it can be tested without a
//! session; `emit` writes it as one structured event.

use std::time::Duration;

/// One access log line per handled request.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessLogRecord {
    pub remote_addr: String,
    pub method: String,
    pub request_url: String,
    pub status: u16,
    pub response_time: Duration,
}

impl AccessLogRecord {
    /// Response time in fractional milliseconds.
    pub fn response_time_ms(&self) -> f64 {
        self.response_time.as_secs_f64() * 1000.0
    }

    pub fn emit(&self) {
        tracing::info!(
            remote_addr = %self.remote_addr,
            method = %self.method,
            request_url = %self.request_url,
            status = self.status,
            response_time = self.response_time_ms(),
            "Request processed"
        );
    }
}
