//! Cache housekeeping: drop duplicate downloads, then cap the entry count.
//!
//! Two phases, always in this order:
//!
//! 1. **Dedup**: files are grouped by content hash, and in each group only the
//!    most recently created file survives.
//! 2. **Capacity**: while more than `max_entries` files remain, the oldest
//!    one is deleted. The directory is re-listed after every deletion.
//!
//! Hashes are recomputed from disk on every run. A failure part-way through
//! leaves earlier deletions in place; re-running is safe.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::HousekeepingError;

use super::cache::{CacheEntry, CacheStore};
use super::hash::Hasher;

/// What a housekeeping pass deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HousekeepingReport {
    /// Byte-identical copies removed in the dedup phase
    pub duplicates_removed: usize,
    /// Oldest entries removed to get under the cap
    pub expired_removed: usize,
    /// Entries left in the cache
    pub remaining: usize,
}

impl HousekeepingReport {
    pub fn total_removed(&self) -> usize {
        self.duplicates_removed + self.expired_removed
    }
}

/// Keeps a [`CacheStore`] deduplicated and bounded.
pub struct Housekeeper {
    store: CacheStore,
    max_entries: usize,
}

impl Housekeeper {
    pub fn new(store: CacheStore, max_entries: usize) -> Self {
        Self { store, max_entries }
    }

    /// Run both phases against the current directory contents.
    pub fn run(&self) -> Result<HousekeepingReport, HousekeepingError> {
        tracing::debug!(dir = %self.store.dir().display(), "Starting housekeeping");

        let duplicates_removed = self.remove_duplicates()?;
        let (expired_removed, remaining) = self.enforce_capacity()?;

        let report = HousekeepingReport {
            duplicates_removed,
            expired_removed,
            remaining,
        };
        tracing::info!(
            duplicates = report.duplicates_removed,
            expired = report.expired_removed,
            remaining = report.remaining,
            "Housekeeping finished"
        );
        Ok(report)
    }

    fn remove_duplicates(&self) -> Result<usize, HousekeepingError> {
        let entries = self.list()?;

        // Entries arrive oldest first, so each group's last member is the newest
        let mut groups: BTreeMap<String, Vec<CacheEntry>> = BTreeMap::new();
        for entry in entries {
            let hash = Hasher::content_hash(&entry.path).map_err(|e| io_error(&entry.path, e))?;
            groups.entry(hash).or_default().push(entry);
        }

        let mut removed = 0;
        for (hash, mut group) in groups {
            if group.len() < 2 {
                continue;
            }
            if let Some(kept) = group.pop() {
                tracing::debug!(
                    hash = %hash,
                    kept = %kept.path.display(),
                    copies = group.len(),
                    "Removing duplicates"
                );
            }
            for entry in &group {
                self.delete(entry)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn enforce_capacity(&self) -> Result<(usize, usize), HousekeepingError> {
        let mut removed = 0;
        loop {
            let entries = self.list()?;
            if entries.len() <= self.max_entries {
                return Ok((removed, entries.len()));
            }
            let oldest = &entries[0];
            tracing::debug!(path = %oldest.path.display(), "Removing oldest cache entry");
            self.delete(oldest)?;
            removed += 1;
        }
    }

    fn list(&self) -> Result<Vec<CacheEntry>, HousekeepingError> {
        self.store
            .entries()
            .map_err(|e| io_error(self.store.dir(), e))
    }

    fn delete(&self, entry: &CacheEntry) -> Result<(), HousekeepingError> {
        self.store
            .remove(entry)
            .map_err(|e| io_error(&entry.path, e))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> HousekeepingError {
    HousekeepingError {
        path: path.to_path_buf(),
        source,
    }
}
