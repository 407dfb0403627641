//! Cache Entry Module
//!
//! A stored payload together with the instant it was admitted.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry: raw bytes plus their creation time.
///
/// The timestamp comes from tokio's clock so that a paused test runtime
/// controls entry ages along with the sweep ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// When the entry was added (or last overwritten)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::new_at(value, Instant::now())
    }

    /// Creates an entry stamped with an explicit instant.
    pub fn new_at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Time elapsed between creation and `now`, zero if `now` is earlier.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is due for eviction at `now`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is expired.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }
}
