//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (WEB_HOST, WEB_PORT, SITES_ROOT, PLAUSIBLE_URL)
//!     → loader.rs (read & parse, defaults for anything unset)
//!     → HostConfig (immutable for the process lifetime)
//!     → shared with the server, registry, and analytics reporter
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload (the site list is
//!   the only live-updating state, and it refreshes from the filesystem)
//! - All fields have defaults so the process runs with an empty environment
//! - A malformed WEB_PORT falls back to the default with a logged warning;
//!   a bind address that cannot be bound is fatal at startup

pub mod loader;
pub mod schema;

pub use loader::from_env;
pub use schema::{AnalyticsConfig, HostConfig, ListenerConfig, SitesConfig, TimeoutConfig};
