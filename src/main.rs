//! Multi-tenant static host entry point.
//!
//! Startup order matters: the site registry completes one synchronous
//! scan before the listener starts accepting, so the first request is
//! never checked against an empty registry. Failure to bind is fatal;
//! everything after that degrades locally (see the error taxonomy in the
//! subsystem docs).

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitehost::{AnalyticsReporter, HttpServer, SiteRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitehost=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = sitehost::config::from_env();
    tracing::info!(
        bind_address = %config.listener.bind_address,
        sites_root = %config.sites.root.display(),
        refresh_secs = config.sites.refresh_secs,
        "configuration loaded"
    );

    let registry = Arc::new(SiteRegistry::new(&config.sites.root));
    match registry.refresh().await {
        Ok(count) => tracing::info!(sites = count, "site registry initialized"),
        Err(err) => tracing::error!(
            error = %err,
            "initial site scan failed, starting with an empty registry"
        ),
    }
    tokio::spawn(
        registry
            .clone()
            .run(Duration::from_secs(config.sites.refresh_secs)),
    );

    let analytics = Arc::new(AnalyticsReporter::new(&config.analytics)?);
    if !analytics.enabled() {
        tracing::info!("analytics reporting disabled (PLAUSIBLE_URL not set)");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "web server is listening");

    let server = HttpServer::new(&config, registry, analytics);
    server.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
