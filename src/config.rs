//! Configuration Module
//!
//! Expiry threshold and sweep cadence for a [`TimedCache`](crate::cache::TimedCache).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Freshness window used when nothing else is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Cache timing parameters.
///
/// `ttl` is the age at which a sweep evicts an entry, `sweep_period` is how
/// often the sweep runs. [`CacheConfig::new`] keeps them equal, so an entry
/// lives between one and two intervals. Setting them apart changes when
/// entries disappear and is opt-in through the `with_*` builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Age at which an entry becomes eligible for eviction
    pub ttl: Duration,
    /// Delay between two sweeps
    pub sweep_period: Duration,
}

impl CacheConfig {
    /// Uses `interval` both as the ttl and as the sweep period.
    pub fn new(interval: Duration) -> Self {
        Self {
            ttl: interval,
            sweep_period: interval,
        }
    }

    /// Overrides the eviction threshold, leaving the sweep period untouched.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Overrides the sweep period, leaving the ttl untouched.
    pub fn with_sweep_period(mut self, sweep_period: Duration) -> Self {
        self.sweep_period = sweep_period;
        self
    }

    /// Rejects zero durations.
    ///
    /// A zero sweep period cannot drive a ticker, and a zero ttl would evict
    /// every entry on the tick that follows its insertion.
    pub fn validate(&self) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidInterval(
                "ttl must be greater than zero".to_string(),
            ));
        }
        if self.sweep_period.is_zero() {
            return Err(CacheError::InvalidInterval(
                "sweep period must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
