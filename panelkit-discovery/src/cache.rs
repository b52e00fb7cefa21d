//! TTL memoization of discovery scans.
//!
//! The in-memory copy serves repeated scans within one process. When a cache
//! directory is configured the scan is also written to
//! `discovery-<sha256(root)>.json` so a fresh process can reuse it until the
//! TTL runs out. Concurrent expiry at worst causes a redundant re-scan.

use crate::{CacheConfig, DiscoveredClass};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    /// Milliseconds since the Unix epoch.
    stored_at: i64,
    classes: Vec<DiscoveredClass>,
}

#[derive(Debug)]
pub struct DiscoveryCache {
    ttl_ms: i64,
    file: Option<PathBuf>,
    memory: Mutex<Option<CacheEntry>>,
}

impl DiscoveryCache {
    /// Creates a cache for scans of `root`.
    pub fn new(config: &CacheConfig, root: &Path) -> Self {
        let file = config
            .dir
            .as_ref()
            .map(|dir| dir.join(format!("discovery-{}.json", cache_key(root))));
        Self {
            ttl_ms: i64::try_from(config.ttl().as_millis()).unwrap_or(i64::MAX),
            file,
            memory: Mutex::new(None),
        }
    }

    /// Path of the on-disk copy, if persistence is configured.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Returns the memoized scan when it is younger than the TTL.
    pub fn get(&self, now_ms: i64) -> Option<Vec<DiscoveredClass>> {
        let mut memory = self.memory.lock().unwrap_or_else(PoisonError::into_inner);

        if memory.is_none() {
            *memory = self.read_file();
        }

        match memory.as_ref() {
            Some(entry) if self.is_fresh(entry, now_ms) => {
                debug!(classes = entry.classes.len(), "Discovery cache hit");
                Some(entry.classes.clone())
            }
            Some(_) => {
                debug!("Discovery cache expired");
                *memory = None;
                None
            }
            None => None,
        }
    }

    /// Stores a scan, replacing any previous one.
    pub fn put(&self, classes: Vec<DiscoveredClass>, now_ms: i64) {
        let entry = CacheEntry {
            stored_at: now_ms,
            classes,
        };
        self.write_file(&entry);
        *self.memory.lock().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }

    /// Drops both copies so the next scan hits the filesystem.
    pub fn clear(&self) {
        *self.memory.lock().unwrap_or_else(PoisonError::into_inner) = None;
        if let Some(file) = &self.file {
            match std::fs::remove_file(file) {
                Ok(()) => info!(path = %file.display(), "Discovery cache cleared"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %file.display(), error = %e, "Failed to remove discovery cache"),
            }
        }
    }

    fn is_fresh(&self, entry: &CacheEntry, now_ms: i64) -> bool {
        now_ms.saturating_sub(entry.stored_at) < self.ttl_ms
    }

    fn read_file(&self) -> Option<CacheEntry> {
        let file = self.file.as_ref()?;
        if !file.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(file) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %file.display(), error = %e, "Failed to read discovery cache");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %file.display(), error = %e, "Ignoring corrupt discovery cache");
                None
            }
        }
    }

    // Best-effort: a failed write only costs a re-scan in the next process.
    fn write_file(&self, entry: &CacheEntry) {
        let Some(file) = &self.file else {
            return;
        };
        if let Some(parent) = file.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create discovery cache directory");
                return;
            }
        }
        match serde_json::to_vec(entry) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(file, bytes) {
                    warn!(path = %file.display(), error = %e, "Failed to write discovery cache");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize discovery cache"),
        }
    }
}

/// Hex SHA-256 of the root path; keeps caches of different roots apart.
fn cache_key(root: &Path) -> String {
    hex::encode(Sha256::digest(root.to_string_lossy().as_bytes()))
}
