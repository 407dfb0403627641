//! Read-Through Module
//!
//! Caller-side helper for the usual cache contract: look the key up first,
//! and only on a miss go to the network, cache the raw response bytes and
//! decode them.
//!
//! The cache itself never fetches anything. The I/O is supplied by the caller
//! through the [`Fetch`] trait, typically an HTTP client keyed by request URL.

use std::future::Future;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::TimedCache;

// == Fetch Trait ==
/// Source of fresh payloads for keys the cache does not hold.
pub trait Fetch {
    /// Retrieves the raw bytes identified by `key`.
    fn fetch(&self, key: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

// == Fetch Error ==
/// Failures surfaced by [`ReadThrough`].
#[derive(Error, Debug)]
pub enum FetchError {
    /// The fetcher failed; nothing was cached
    #[error("Fetch failed for {key}: {source}")]
    Fetch {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Freshly fetched bytes did not decode; nothing was cached
    #[error("Decode failed for {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Read Through ==
/// A [`TimedCache`] in front of a [`Fetch`] implementation.
#[derive(Debug)]
pub struct ReadThrough<F> {
    cache: TimedCache,
    fetcher: F,
}

impl<F: Fetch> ReadThrough<F> {
    pub fn new(cache: TimedCache, fetcher: F) -> Self {
        Self { cache, fetcher }
    }

    /// The underlying cache, for direct lookups and stats.
    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    // == Get Bytes ==
    /// Returns the cached bytes for `key`, fetching and caching them on a miss.
    pub async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, FetchError> {
        if let Some(bytes) = self.cache.get(key).await {
            debug!("Cache hit for {}", key);
            return Ok(bytes);
        }

        let bytes = self.fetch(key).await?;
        self.cache.add(key, bytes.clone()).await;
        Ok(bytes)
    }

    // == Get JSON ==
    /// Returns the value for `key` decoded as JSON.
    ///
    /// Cached bytes that no longer decode as `T` are treated as a miss and
    /// refetched once. Fetched bytes are cached only if they decode.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<T, FetchError> {
        if let Some(bytes) = self.cache.get(key).await {
            match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!("Cache hit for {}", key);
                    return Ok(value);
                }
                Err(err) => {
                    warn!("Cached payload for {} did not decode, refetching: {}", key, err);
                }
            }
        }

        let bytes = self.fetch(key).await?;
        let value = serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
            key: key.to_string(),
            source,
        })?;
        self.cache.add(key, bytes).await;
        Ok(value)
    }

    /// Stops the cache's sweep task.
    pub async fn close(self) {
        self.cache.close().await;
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>, FetchError> {
        debug!("Cache miss for {}, fetching", key);
        self.fetcher
            .fetch(key)
            .await
            .map_err(|source| FetchError::Fetch {
                key: key.to_string(),
                source,
            })
    }
}
