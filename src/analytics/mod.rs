//! Analytics reporting subsystem.
//!
//! # Data Flow
//! ```text
//! request handler (page hit)
//!     → reporter.rs (build pageview event, spawn detached task)
//!     → outbound POST <endpoint>/api/event
//!     → success: trace log / failure: warn log, event dropped
//! ```
//!
//! # Design Decisions
//! - Fire-and-forget: the handler never awaits the dispatch, so analytics
//!   adds no latency to any response
//! - At-most-once: failures are logged and dropped, never retried or
//!   queued; losing events under transient failure is acceptable
//! - The outbound call carries its own timeout so a hung endpoint cannot
//!   accumulate unbounded background tasks

pub mod reporter;

pub use reporter::{AnalyticsEvent, AnalyticsReporter};
