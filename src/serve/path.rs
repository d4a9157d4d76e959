//! Request-path sanitization.

use std::path::PathBuf;

use percent_encoding::percent_decode_str;

/// Convert a URL path into a relative filesystem path safe to join onto a
/// site root.
///
/// Segments are percent-decoded individually, so an encoded name like
/// `my%20page` reaches the file `my page` while a decoded `..` or a
/// decoded separator (`%2e%2e`, `%2f`) still rejects the whole path.
/// Empty and `.` segments are dropped; invalid UTF-8 after decoding
/// rejects the path. The root path `/` maps to an empty relative path
/// (the site root itself), which the static responder then resolves
/// through its index fallback.
pub fn sanitize_request_path(path: &str) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for raw in path.split('/') {
        let segment = percent_decode_str(raw).decode_utf8().ok()?;
        match segment.as_ref() {
            "" | "." => continue,
            ".." => return None,
            s if s.contains(['/', '\\']) => return None,
            s => out.push(s),
        }
    }
    Some(out)
}
