//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use sitehost::{AnalyticsReporter, HostConfig, HttpServer, SiteRegistry};

/// Write one file into a site tree, creating parent directories.
pub fn write_site_file(sites_root: &Path, host: &str, rel: &str, contents: &str) {
    let path = sites_root.join(host).join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Start a host process over `sites_root` on an ephemeral port.
///
/// Performs the startup registry scan and spawns the refresh loop, same
/// as the real entry point.
pub async fn start_server(sites_root: &Path, analytics_endpoint: Option<String>) -> SocketAddr {
    let mut config = HostConfig::default();
    config.sites.root = sites_root.to_path_buf();
    config.analytics.endpoint = analytics_endpoint;
    start_server_with(config).await
}

/// Start a host process with full control over the config.
pub async fn start_server_with(config: HostConfig) -> SocketAddr {
    let registry = Arc::new(SiteRegistry::new(&config.sites.root));
    registry.refresh().await.unwrap();
    tokio::spawn(
        registry
            .clone()
            .run(Duration::from_secs(config.sites.refresh_secs)),
    );

    let analytics = Arc::new(AnalyticsReporter::new(&config.analytics).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(&config, registry, analytics);
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });
    addr
}

/// Start a mock analytics endpoint that captures every request it
/// receives and answers 202.
///
/// Returns the endpoint base URL and a receiver yielding each captured
/// raw HTTP request.
pub async fn start_analytics_sink() -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 4096];
                        loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if request_complete(&buf) {
                                        break;
                                    }
                                }
                                Err(_) => break,
                            }
                        }
                        let _ = socket
                            .write_all(
                                b"HTTP/1.1 202 Accepted\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            )
                            .await;
                        let _ = socket.shutdown().await;
                        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
                    });
                }
                Err(_) => break,
            }
        }
    });

    (format!("http://{addr}"), rx)
}

/// True once `buf` holds a complete request (headers plus the announced
/// content length).
fn request_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

/// Extract the JSON body from a captured raw request.
pub fn request_body(raw: &str) -> serde_json::Value {
    let body = raw.split("\r\n\r\n").nth(1).unwrap_or("");
    serde_json::from_str(body).unwrap()
}

/// Send a raw HTTP/1.1 GET, bypassing any client-side URL normalization.
/// Returns the entire raw response.
pub async fn raw_get(addr: SocketAddr, host: &str, target: &str) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {target} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n");
    socket.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    socket.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}
