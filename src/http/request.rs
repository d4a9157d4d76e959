//! Per-request context extraction.
//!
//! # Responsibilities
//! - Determine the request hostname (proxy-aware, port stripped)
//! - Determine the originating client address (forwarded or socket peer)
//! - Capture the headers the analytics reporter forwards
//!
//! # Design Decisions
//! - Forwarded headers are honored unconditionally (the process is meant
//!   to run behind a trusted proxy); the socket peer is the fallback
//! - No case normalization of the hostname here: site directory names are
//!   matched exactly as the transport presents the host

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request};

/// Immutable per-request data consumed by the pipeline stages.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Hostname with any port stripped.
    pub hostname: String,
    /// URL path as requested (no query string).
    pub path: String,
    /// Originating client address.
    pub client_addr: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl RequestContext {
    /// Extract the context from an incoming request and its socket peer.
    pub fn from_request(request: &Request<Body>, peer: SocketAddr) -> Self {
        let headers = request.headers();
        Self {
            hostname: extract_hostname(headers, request).to_string(),
            path: request.uri().path().to_string(),
            client_addr: extract_client_addr(headers, peer),
            user_agent: header_string(headers, header::USER_AGENT),
            referrer: header_string(headers, header::REFERER),
        }
    }
}

/// Hostname precedence: first `X-Forwarded-Host` hop (proxies append to
/// the list), then `Host`, then the URI authority (HTTP/2 requests carry
/// the host there). Ports are stripped.
fn extract_hostname<'a>(headers: &'a HeaderMap, request: &'a Request<Body>) -> &'a str {
    let forwarded = headers
        .get("x-forwarded-host")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|host| !host.is_empty());
    let raw = forwarded
        .or_else(|| headers.get(header::HOST).and_then(|value| value.to_str().ok()))
        .or_else(|| request.uri().host())
        .unwrap_or("");
    strip_port(raw)
}

/// Client address precedence: first `X-Forwarded-For` hop, then the
/// socket peer.
fn extract_client_addr(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|hop| hop.trim().to_string())
        .filter(|hop| !hop.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Strip a trailing `:port`, keeping bracketed IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    }
}
