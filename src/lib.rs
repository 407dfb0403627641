//! pokecache - An in-memory byte cache with background expiry
//!
//! Holds raw response payloads keyed by string (typically a request URL) so
//! that repeated queries against a paginated REST API skip the network. A
//! background task sweeps the cache on a fixed period and evicts every entry
//! that has reached the configured age.
//!
//! ```no_run
//! use std::time::Duration;
//! use pokecache::TimedCache;
//!
//! # async fn demo() -> pokecache::error::Result<()> {
//! let cache = TimedCache::new(Duration::from_secs(5 * 60))?;
//! cache.add("https://example.test/api/location-area", b"{}".to_vec()).await;
//! assert!(cache.get("https://example.test/api/location-area").await.is_some());
//! cache.close().await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod read_through;
pub mod tasks;

pub use cache::{CacheStats, TimedCache};
pub use config::CacheConfig;
pub use error::CacheError;
pub use read_through::{Fetch, FetchError, ReadThrough};
