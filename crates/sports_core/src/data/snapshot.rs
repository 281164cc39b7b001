//! Immutable, shareable snapshot of the loaded table.
//!
//! A `SnapshotCache` is owned by whatever serves the views and handed
//! around explicitly. It reloads only when the source file's identity
//! (canonical path, length, modification time) changes.

use crate::data::loader::{load_from_bytes, read_source, Enrichment, ParseStats};
use crate::data::popularity::{builtin_reference, PopularityReference};
use crate::error::{DashboardError, Result};
use crate::models::EnrichedTable;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

/// Provenance of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub source_path: String,
    /// SHA256 of the source bytes (hex)
    pub checksum: String,
    /// RFC3339
    pub loaded_at: String,
    pub stats: ParseStats,
    pub enrichment: Enrichment,
}

/// The enriched table plus where it came from. Read-only after construction.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub table: EnrichedTable,
    pub metadata: SnapshotMetadata,
}

impl TableSnapshot {
    /// Build a snapshot from source bytes without touching the filesystem.
    pub fn from_bytes(
        bytes: &[u8],
        delimiter: u8,
        origin: &Path,
        reference: &PopularityReference,
    ) -> Result<Self> {
        let loaded = load_from_bytes(bytes, delimiter, origin, reference)?;

        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let checksum = format!("{:x}", hasher.finalize());

        Ok(Self {
            table: loaded.table,
            metadata: SnapshotMetadata {
                source_path: origin.display().to_string(),
                checksum,
                loaded_at: chrono::Utc::now().to_rfc3339(),
                stats: loaded.stats,
                enrichment: loaded.enrichment,
            },
        })
    }

    pub fn load(path: &Path, delimiter: u8, reference: &PopularityReference) -> Result<Self> {
        let bytes = read_source(path)?;
        Self::from_bytes(&bytes, delimiter, path, reference)
    }
}

/// File identity used as the cache key
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceKey {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceKey {
    fn probe(path: &Path) -> Result<Self> {
        let not_found = |source| DashboardError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        };
        let canonical = fs::canonicalize(path).map_err(not_found)?;
        let meta = fs::metadata(&canonical).map_err(not_found)?;
        Ok(Self {
            path: canonical,
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

#[derive(Debug)]
struct CacheEntry {
    key: SourceKey,
    snapshot: Arc<TableSnapshot>,
}

/// Single-flight cache of the most recently loaded snapshot.
///
/// The lock is held across a load so concurrent callers wait for the one
/// in flight instead of loading the same file again.
#[derive(Debug)]
pub struct SnapshotCache {
    delimiter: u8,
    reference: PopularityReference,
    entry: Mutex<Option<CacheEntry>>,
    loads: AtomicU64,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(b',', builtin_reference().clone())
    }
}

impl SnapshotCache {
    pub fn new(delimiter: u8, reference: PopularityReference) -> Self {
        Self {
            delimiter,
            reference,
            entry: Mutex::new(None),
            loads: AtomicU64::new(0),
        }
    }

    fn lock_entry(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        // A panic mid-load leaves either the old entry or None; both are valid.
        self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached snapshot for `path`, loading it if absent or stale.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<TableSnapshot>> {
        let mut guard = self.lock_entry();
        let key = SourceKey::probe(path)?;

        if let Some(entry) = guard.as_ref() {
            if entry.key == key {
                log::debug!("Snapshot cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.snapshot));
            }
            log::info!("Source {} changed, reloading", path.display());
        }

        let snapshot = Arc::new(TableSnapshot::load(path, self.delimiter, &self.reference)?);
        self.loads.fetch_add(1, Ordering::Relaxed);
        *guard = Some(CacheEntry {
            key,
            snapshot: Arc::clone(&snapshot),
        });
        Ok(snapshot)
    }

    /// Currently cached snapshot, if any, without touching the filesystem.
    pub fn current(&self) -> Option<Arc<TableSnapshot>> {
        self.lock_entry()
            .as_ref()
            .map(|entry| Arc::clone(&entry.snapshot))
    }

    pub fn invalidate(&self) {
        *self.lock_entry() = None;
    }

    /// Number of loads performed (cache misses)
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }
}
