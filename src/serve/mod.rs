//! Per-site content resolution.
//!
//! # Data Flow
//! ```text
//! request path
//!     → path.rs (sanitize, reject traversal)
//!     → static_files.rs (exact / .html / .txt / index fallback)
//!     → redirect.rs (_redirects lookup, only when no file matched)
//! ```
//!
//! # Design Decisions
//! - Both resolvers take an already-sanitized relative path, so neither
//!   can be steered outside the site root
//! - Filesystem races (a file vanishing between the existence check and
//!   the read) are treated as misses, never surfaced as server errors

pub mod path;
pub mod redirect;
pub mod static_files;

pub use path::sanitize_request_path;
pub use redirect::resolve_redirect;
pub use static_files::{serve_static, StaticFile};
