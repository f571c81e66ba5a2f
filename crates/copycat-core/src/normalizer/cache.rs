use super::canonical::{read_canonical, CanonicalContent};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{error, trace};

/// Per-run memo of canonical content keyed by path.
///
/// Each path maps to its own `OnceLock` cell. The map's shard lock is held only long
/// enough to fetch or insert that cell. The file read happens outside it, so loads of
/// different paths in the same shard do not wait on each other. Concurrent lookups of
/// the same path wait on the cell and the file is still read at most once. A file that
/// cannot be read is cached as empty content.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: DashMap<PathBuf, Arc<OnceLock<Arc<CanonicalContent>>>>,
    loads: AtomicUsize,
    failures: AtomicUsize,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, path: &Path) -> Arc<CanonicalContent> {
        if let Some(content) = self.get(path) {
            trace!("Found content for {} in cache", path.display());
            return content;
        }

        // Clone the cell out so the shard guard is released before the read.
        let cell = Arc::clone(self.entries.entry(path.to_path_buf()).or_default().value());
        Arc::clone(cell.get_or_init(|| Arc::new(self.load(path))))
    }

    /// Cached content without touching the filesystem. A path whose load is still in
    /// progress reports `None`.
    pub fn get(&self, path: &Path) -> Option<Arc<CanonicalContent>> {
        let cell = self.entries.get(path).map(|c| Arc::clone(c.value()))?;
        cell.get().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of filesystem reads performed so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of files that could not be read and were cached as empty.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    fn load(&self, path: &Path) -> CanonicalContent {
        self.loads.fetch_add(1, Ordering::Relaxed);
        match read_canonical(path) {
            Ok(content) => {
                trace!("Loaded {} distinct lines from {}", content.len(), path.display());
                content
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                error!("Error reading file {}: {}", path.display(), e);
                CanonicalContent::default()
            }
        }
    }
}
