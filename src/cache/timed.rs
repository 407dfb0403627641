//! Timed Cache Module
//!
//! The public cache handle: a locked [`CacheStore`] plus the sweep task that
//! keeps it trimmed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::spawn_sweep_task;

// == Timed Cache ==
/// Concurrent byte cache whose entries are evicted by a background sweep.
///
/// Every operation serialises on a single lock around the store. The sweep
/// task lives exactly as long as the cache: it stops on [`TimedCache::close`]
/// or as soon as the cache is dropped. Share a cache between tasks by
/// wrapping it in an `Arc`.
#[derive(Debug)]
pub struct TimedCache {
    store: Arc<RwLock<CacheStore>>,
    config: CacheConfig,
    shutdown: mpsc::Sender<()>,
    sweeper: JoinHandle<()>,
}

impl TimedCache {
    // == Constructor ==
    /// Creates a cache that sweeps every `interval` and evicts entries at
    /// least `interval` old, so an entry lives between one and two intervals.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidInterval`](crate::error::CacheError) for a
    /// zero interval.
    pub fn new(interval: Duration) -> Result<Self> {
        Self::with_config(CacheConfig::new(interval))
    }

    /// Creates a cache with a ttl and sweep period that may differ.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(RwLock::new(CacheStore::new(config.ttl)));
        let (shutdown, shutdown_rx) = mpsc::channel(1);
        let sweeper = spawn_sweep_task(store.clone(), config.sweep_period, shutdown_rx);

        debug!(
            "Timed cache created: ttl={:?}, sweep_period={:?}",
            config.ttl, config.sweep_period
        );

        Ok(Self {
            store,
            config,
            shutdown,
            sweeper,
        })
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous value and
    /// restarting its age.
    ///
    /// # Arguments
    /// * `key` - Lookup key, typically the request URL
    /// * `value` - Raw payload bytes
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let value = value.into();
        self.store.write().await.add(key, value);
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`, if it has not been
    /// swept yet.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        // Write guard: the lookup updates hit/miss counters
        self.store.write().await.get(key)
    }

    /// Number of entries not yet swept.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of lookup and sweep counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Age at which a sweep evicts an entry.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Configured delay between sweeps.
    ///
    /// The ticker itself never waits longer than
    /// [`MAX_SWEEP_PERIOD`](crate::tasks::MAX_SWEEP_PERIOD).
    pub fn sweep_period(&self) -> Duration {
        self.config.sweep_period
    }

    // == Close ==
    /// Stops the sweep task and waits for it to exit.
    ///
    /// Entries still stored are dropped with the cache.
    pub async fn close(self) {
        // A full channel or a closed receiver both mean the task is already
        // stopping
        let _ = self.shutdown.try_send(());

        if let Err(err) = self.sweeper.await {
            warn!("Expiry sweep task ended abnormally: {}", err);
        }
    }
}
