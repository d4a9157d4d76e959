//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, per-request handler)
//!     → request.rs (extract hostname, path, client address, headers)
//!     → registry (host check)
//!     → serve (static lookup, then redirect lookup)
//!     → response (200 / 302 / one of the two 404 shapes)
//! ```

pub mod request;
pub mod server;

pub use request::RequestContext;
pub use server::HttpServer;
