//! Static file resolution within a single site root.
//!
//! # Responsibilities
//! - Probe the five candidate forms for a request path, in order:
//!   exact file, `<path>.html`, `<path>.txt`, `<path>/index.html`,
//!   `<path>/index.txt`
//! - Read the first existing regular file and infer its content type
//! - Flag page hits (`.html` / `.txt`) so the caller can report analytics
//!   for pages but not for arbitrary assets

use std::path::{Path, PathBuf};

use mime_guess::Mime;

/// Extensions whose hits count as page views.
const PAGE_EXTENSIONS: [&str; 2] = ["html", "txt"];

/// A resolved static file ready to be sent as a 200 response.
pub struct StaticFile {
    pub bytes: Vec<u8>,
    pub content_type: Mime,
    /// True when the resolved file is a page (`.html` / `.txt`) rather
    /// than an arbitrary asset.
    pub is_page: bool,
}

/// Resolve `rel` against `site_root`, applying extension and index
/// fallback. Returns `None` when no candidate is an existing, readable
/// regular file.
pub async fn serve_static(site_root: &Path, rel: &Path) -> Option<StaticFile> {
    for candidate in candidates(site_root, rel) {
        if !is_regular_file(&candidate).await {
            continue;
        }
        match tokio::fs::read(&candidate).await {
            Ok(bytes) => {
                let content_type = mime_guess::from_path(&candidate).first_or_octet_stream();
                return Some(StaticFile {
                    bytes,
                    content_type,
                    is_page: is_page(&candidate),
                });
            }
            Err(err) => {
                // The file vanished between the metadata check and the
                // read; keep probing the remaining candidates.
                tracing::debug!(path = %candidate.display(), error = %err, "static candidate unreadable");
            }
        }
    }
    None
}

/// The five candidate paths for `rel`, most specific first.
///
/// Extension fallback only applies when `rel` names something (the site
/// root itself gets index fallback only, so `/` can never resolve to a
/// sibling of the site directory).
fn candidates(site_root: &Path, rel: &Path) -> Vec<PathBuf> {
    let exact = site_root.join(rel);
    let mut out = Vec::with_capacity(5);
    out.push(exact.clone());
    if rel.file_name().is_some() {
        out.push(with_appended_extension(&exact, "html"));
        out.push(with_appended_extension(&exact, "txt"));
    }
    out.push(exact.join("index.html"));
    out.push(exact.join("index.txt"));
    out
}

/// Append (not replace) an extension: `guide` → `guide.html`,
/// `notes.v2` → `notes.v2.html`.
fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            PAGE_EXTENSIONS
                .iter()
                .any(|page| ext.eq_ignore_ascii_case(page))
        })
        .unwrap_or(false)
}
