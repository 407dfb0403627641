//! Cache Store Module
//!
//! The unsynchronised map behind a `TimedCache`. Callers own the locking.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Byte payloads keyed by string, with one expiry threshold for all entries.
///
/// Lookups never check age; an entry stays visible until a sweep removes it.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and sweep counters
    stats: CacheStats,
    /// Age at which `evict_expired` removes an entry
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose sweeps evict entries aged `ttl` or more.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Add ==
    /// Inserts or overwrites `key`, stamping it with the current instant.
    ///
    /// # Arguments
    /// * `key` - The key to store under
    /// * `value` - The payload, replacing any previous one
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    /// Inserts or overwrites `key` with an explicit creation instant.
    ///
    /// Overwriting resets the entry's age.
    pub fn add_at(&mut self, key: String, value: Vec<u8>, now: Instant) {
        self.entries.insert(key, CacheEntry::new_at(value, now));
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Evict Expired ==
    /// Removes every entry aged `ttl` or more at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired_at(now, ttl));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the counters with the current entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    /// Returns the age at which sweeps evict entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
