//! Configuration schema definitions.
//!
//! All types derive Serde traits so the config can also be snapshotted or
//! logged as structured data.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the static host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Sites root and registry refresh settings.
    pub sites: SitesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Analytics reporting settings.
    pub analytics: AnalyticsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Site registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SitesConfig {
    /// Directory containing one subdirectory per hostname.
    pub root: PathBuf,

    /// Registry refresh interval in seconds.
    pub refresh_secs: u64,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("sites"),
            refresh_secs: 15,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Analytics reporting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Base URL of the analytics endpoint (POST `<endpoint>/api/event`).
    /// Reporting is disabled when unset.
    pub endpoint: Option<String>,

    /// Timeout for one outbound analytics call in seconds.
    pub timeout_secs: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 5,
        }
    }
}
