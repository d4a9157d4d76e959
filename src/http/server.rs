//! HTTP server setup and the request pipeline.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (tracing, timeout)
//! - Run one handler invocation per request through the pipeline:
//!   host check → static lookup → redirect lookup → terminal 404
//! - Fire analytics as a detached side effect on page and redirect hits
//!
//! # Design Decisions
//! - Every stage either produces a terminal response or passes to the
//!   next; no stage is revisited
//! - Only the two 404 shapes are user-visible failures; anything
//!   unexpected mid-pipeline degrades to the generic 404 instead of a 5xx
//! - No implementation-identifying response header is emitted

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::analytics::AnalyticsReporter;
use crate::config::HostConfig;
use crate::http::request::RequestContext;
use crate::registry::SiteRegistry;
use crate::serve::static_files::StaticFile;
use crate::serve::{resolve_redirect, sanitize_request_path, serve_static};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SiteRegistry>,
    pub analytics: Arc<AnalyticsReporter>,
}

/// HTTP server for the static host.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an already-initialized registry and
    /// analytics reporter.
    pub fn new(
        config: &HostConfig,
        registry: Arc<SiteRegistry>,
        analytics: Arc<AnalyticsReporter>,
    ) -> Self {
        let state = AppState {
            registry,
            analytics,
        };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &HostConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(site_handler))
            .route("/", any(site_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main request handler: the four-stage pipeline. Short-circuits on the
/// first terminal response; each request passes through exactly once.
async fn site_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let ctx = RequestContext::from_request(&request, peer);

    // Stage 1: host check.
    let Some(site_root) = state.registry.resolve(&ctx.hostname) else {
        tracing::debug!(host = %ctx.hostname, path = %ctx.path, "unknown site");
        return unknown_site_response(&ctx.hostname);
    };

    // A path that cannot be made safe never touches the filesystem.
    let Some(rel) = sanitize_request_path(&ctx.path) else {
        tracing::debug!(host = %ctx.hostname, path = %ctx.path, "unsafe request path");
        return not_found_response();
    };

    // Stage 2: static lookup.
    if let Some(file) = serve_static(&site_root, &rel).await {
        if file.is_page {
            state.analytics.report(&ctx);
        }
        return static_response(file);
    }

    // Stage 3: redirect lookup.
    if let Some(target) = resolve_redirect(&site_root, &rel).await {
        match HeaderValue::from_str(&target) {
            Ok(location) => {
                state.analytics.report(&ctx);
                return redirect_response(location);
            }
            Err(_) => {
                tracing::warn!(
                    host = %ctx.hostname,
                    path = %ctx.path,
                    "redirect target is not a valid Location value"
                );
            }
        }
    }

    // Stage 4: terminal 404.
    not_found_response()
}

fn static_response(file: StaticFile) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, file.content_type.to_string())],
        file.bytes,
    )
        .into_response()
}

fn redirect_response(location: HeaderValue) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    response.headers_mut().insert(header::LOCATION, location);
    response
}

fn unknown_site_response(hostname: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        format!("404: Not Found - unknown site: {hostname}"),
    )
        .into_response()
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, "404: Not Found").into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
