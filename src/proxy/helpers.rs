//! Gateway utility functions.
//!
//! This module contains helper functions for request processing:
//! - Query parameter parsing
//! - Client IP detection (X-Real-IP / X-Forwarded-For aware)

use http::{HeaderMap, Uri};
use std::collections::HashMap;

/// Extract query parameters from URI.
///
/// Values are URL-decoded. A key given more than once keeps its first value;
/// a key without `=` maps to an empty string.
pub fn extract_query_params(uri: &Uri) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Some(query) = uri.query() {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(key)
                .map(|k| k.into_owned())
                .unwrap_or_else(|_| key.to_string());
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_default();
            params.entry(key).or_insert(value);
        }
    }
    params
}

/// Client address for access logs.
///
/// Prefers `X-Real-IP`, then the first entry of `X-Forwarded-For`, then the
/// peer address of the connection.
pub fn client_ip(headers: &HeaderMap, peer: Option<&str>) -> String {
    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    // "client, proxy1, proxy2": the first IP is the original client
    if let Some(forwarded_for) = header_str(headers, "x-forwarded-for") {
        if let Some(ip) = forwarded_for.split(',').next().map(str::trim) {
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    peer.map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
