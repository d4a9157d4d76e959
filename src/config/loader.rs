//! Configuration loading from the process environment.

use std::env;

use crate::config::schema::HostConfig;

const DEFAULT_PORT: u16 = 8080;

/// Build a [`HostConfig`] from the process environment.
///
/// Recognized variables:
/// - `WEB_HOST` / `WEB_PORT` — listener bind address
/// - `SITES_ROOT` — directory holding one subdirectory per hostname
/// - `PLAUSIBLE_URL` — analytics endpoint base URL (reporting is disabled
///   when unset or empty)
///
/// Anything unset keeps its default. A `WEB_PORT` that is not a valid port
/// number falls back to the default with a logged warning; whether the
/// resulting bind address is usable is decided at bind time.
pub fn from_env() -> HostConfig {
    let mut config = HostConfig::default();

    if let Ok(root) = env::var("SITES_ROOT") {
        if !root.is_empty() {
            config.sites.root = root.into();
        }
    }

    let host = env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match env::var("WEB_PORT") {
        Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, default = DEFAULT_PORT, "WEB_PORT is not a valid port, using default");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    };
    config.listener.bind_address = format!("{host}:{port}");

    if let Ok(endpoint) = env::var("PLAUSIBLE_URL") {
        if !endpoint.is_empty() {
            config.analytics.endpoint = Some(endpoint);
        }
    }

    config
}
