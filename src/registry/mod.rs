//! Site registry: the set of hostnames this process serves.
//!
//! # Responsibilities
//! - Scan the sites root and publish the set of site directory names
//! - Swap the set atomically so request handlers never lock
//! - Resolve a request hostname to its site root directory
//!
//! # Design Decisions
//! - The snapshot is an immutable `HashSet` behind an `ArcSwap`; a refresh
//!   builds a complete new set and stores it wholesale, so concurrent
//!   readers see either the old or the new set, never a mix
//! - A failed scan keeps the previous snapshot in place; in-flight and
//!   future requests are unaffected
//! - Hostname-to-path resolution re-checks the hostname for traversal
//!   characters even though snapshot membership already implies a plain
//!   directory name (the hostname is attacker-influenced input)

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use thiserror::Error;

/// Error type for registry refresh.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The sites root (or one of its entries) could not be read.
    #[error("failed to scan sites root {root:?}: {source}")]
    Scan {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Registry of known sites, refreshed periodically from the filesystem.
pub struct SiteRegistry {
    sites_root: PathBuf,
    snapshot: ArcSwap<HashSet<String>>,
}

impl SiteRegistry {
    /// Create a registry for the given sites root. The initial snapshot is
    /// empty; call [`refresh`](Self::refresh) before serving traffic.
    pub fn new(sites_root: impl Into<PathBuf>) -> Self {
        Self {
            sites_root: sites_root.into(),
            snapshot: ArcSwap::from_pointee(HashSet::new()),
        }
    }

    /// The directory holding one subdirectory per hostname.
    pub fn sites_root(&self) -> &Path {
        &self.sites_root
    }

    /// Rescan the sites root and atomically replace the snapshot.
    ///
    /// Only immediate subdirectories count as sites; plain files are
    /// ignored. On error the previous snapshot stays in place and the
    /// error is returned for the caller to log.
    pub async fn refresh(&self) -> Result<usize, RegistryError> {
        let mut entries = tokio::fs::read_dir(&self.sites_root)
            .await
            .map_err(|source| RegistryError::Scan {
                root: self.sites_root.clone(),
                source,
            })?;
        let mut sites = HashSet::new();
        while let Some(entry) = entries.next_entry().await.map_err(|source| {
            RegistryError::Scan {
                root: self.sites_root.clone(),
                source,
            }
        })? {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                sites.insert(name);
            }
        }

        let count = sites.len();
        self.snapshot.store(Arc::new(sites));
        Ok(count)
    }

    /// Lock-free membership check against the latest snapshot.
    pub fn contains(&self, hostname: &str) -> bool {
        self.snapshot.load().contains(hostname)
    }

    /// Resolve a hostname to its site root directory.
    ///
    /// Returns `None` for hostnames outside the current snapshot, and for
    /// anything that could escape the sites root when joined.
    pub fn resolve(&self, hostname: &str) -> Option<PathBuf> {
        if hostname.is_empty()
            || hostname.contains(['/', '\\'])
            || hostname.contains("..")
        {
            return None;
        }
        if !self.contains(hostname) {
            return None;
        }
        Some(self.sites_root.join(hostname))
    }

    /// Periodic refresh loop; runs for the life of the process.
    ///
    /// The first tick is consumed immediately so the loop waits one full
    /// interval after the startup refresh the caller already performed.
    pub async fn run(self: Arc<Self>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match self.refresh().await {
                Ok(count) => {
                    tracing::debug!(sites = count, "site registry refreshed");
                }
                Err(err) => {
                    tracing::error!(
                        error = %err,
                        "site registry refresh failed, keeping previous snapshot"
                    );
                }
            }
        }
    }
}
