//! Cache Statistics Module
//!
//! Counters for lookups and sweeps, snapshotted by `TimedCache::stats`.

use serde::Serialize;

// == Cache Stats ==
/// Lookup and sweep counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a value
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries removed by the sweep
    pub evictions: u64,
    /// Completed sweep passes
    pub sweeps: u64,
    /// Entries currently stored
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }

    // == Record Lookup ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Sweep ==
    /// Accounts for one completed sweep pass.
    ///
    /// # Arguments
    /// * `evicted` - Number of entries the pass removed
    pub fn record_sweep(&mut self, evicted: usize) {
        self.sweeps += 1;
        self.evictions += evicted as u64;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_sweep_accumulates() {
        let mut stats = CacheStats::new();
        stats.record_sweep(3);
        stats.record_sweep(0);
        stats.record_sweep(2);
        assert_eq!(stats.sweeps, 3);
        assert_eq!(stats.evictions, 5);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.total_entries = 4;

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["misses"], 0);
        assert_eq!(json["total_entries"], 4);
    }
}
