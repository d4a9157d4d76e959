//! Multi-tenant static web host.
//!
//! One process serves many independent websites. The request's hostname
//! selects a site directory under the sites root; the request path is then
//! resolved against that directory with extension and index fallback, and
//! finally against the site's `_redirects` subtree. Page hits are reported
//! to an external analytics endpoint without ever touching response latency.
//!
//! ```text
//! Client Request
//!     → http/server.rs (Axum handler, one invocation per request)
//!     → registry (hostname → site root, or unknown-site 404)
//!     → serve/static_files.rs (exact / .html / .txt / index fallback)
//!     → serve/redirect.rs (_redirects lookup)
//!     → terminal 404
//!
//! Background:
//!     registry refresh task (15s interval, atomic snapshot swap)
//!     analytics dispatch tasks (fire-and-forget, per page hit)
//! ```

pub mod analytics;
pub mod config;
pub mod http;
pub mod registry;
pub mod serve;

pub use analytics::AnalyticsReporter;
pub use config::HostConfig;
pub use http::HttpServer;
pub use registry::SiteRegistry;
