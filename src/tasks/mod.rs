//! Background Tasks Module
//!
//! Contains the periodic work a cache runs for as long as it is alive.
//!
//! # Tasks
//! - Sweep: evicts entries older than the cache's ttl on a fixed period

mod sweep;

pub use sweep::{spawn_sweep_task, MAX_SWEEP_PERIOD};
