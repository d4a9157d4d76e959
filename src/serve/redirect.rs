//! Redirect rule resolution.
//!
//! A site's `_redirects/` subtree mirrors request paths: a regular file at
//! `_redirects/<path>` means requests for `<path>` redirect to the file's
//! trimmed text content. Rules are read on demand and never cached, so
//! edits take effect immediately.

use std::path::Path;

/// Reserved subtree holding redirect rules.
pub const REDIRECTS_DIR: &str = "_redirects";

/// Look up a redirect rule for `rel` under `site_root`.
///
/// Only regular files count as rules; a directory at the mirrored path is
/// ignored. Unreadable rule files are misses.
pub async fn resolve_redirect(site_root: &Path, rel: &Path) -> Option<String> {
    let rule_path = site_root.join(REDIRECTS_DIR).join(rel);

    let meta = tokio::fs::metadata(&rule_path).await.ok()?;
    if !meta.is_file() {
        return None;
    }

    match tokio::fs::read_to_string(&rule_path).await {
        Ok(contents) => Some(contents.trim().to_string()),
        Err(err) => {
            tracing::debug!(path = %rule_path.display(), error = %err, "redirect rule unreadable");
            None
        }
    }
}
