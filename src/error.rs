//! Error types for the cache
//!
//! The cache itself cannot fail once running; errors only come from
//! rejecting a configuration that cannot drive a sweep ticker.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building a cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A ttl or sweep period that no ticker can honour
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;
