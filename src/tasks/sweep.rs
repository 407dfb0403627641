//! Expiry Sweep Task
//!
//! Background task that periodically evicts expired cache entries until it
//! is told to stop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Longest period the ticker is given, roughly thirty years.
///
/// Longer periods are clamped so that scheduling the first tick cannot
/// overflow the clock; `Duration::MAX` then reads as "effectively never".
pub const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Spawns the task that sweeps `store` every `period`.
///
/// The first sweep happens one full period after this call. Each sweep takes
/// the write lock once, evicts every entry whose age at the tick instant has
/// reached the store's ttl, and releases the lock.
///
/// The task exits when a message arrives on `shutdown` or when every sender
/// for it has been dropped, so dropping the owning cache is enough to stop it.
///
/// `period` is capped at [`MAX_SWEEP_PERIOD`].
///
/// # Panics
/// Panics if `period` is zero or if called outside a tokio runtime.
pub fn spawn_sweep_task(
    store: Arc<RwLock<CacheStore>>,
    period: Duration,
    mut shutdown: mpsc::Receiver<()>,
) -> JoinHandle<()> {
    let period = period.min(MAX_SWEEP_PERIOD);
    // Built before spawning so the schedule is anchored at construction time
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        info!("Starting expiry sweep task with period of {:?}", period);

        loop {
            tokio::select! {
                tick = ticker.tick() => {
                    let (removed, stats) = {
                        let mut store_guard = store.write().await;
                        let removed = store_guard.evict_expired(tick);
                        (removed, store_guard.stats())
                    };

                    if removed > 0 {
                        info!(
                            "Expiry sweep: removed {} entries, {} remaining, hit rate {:.2}",
                            removed,
                            stats.total_entries,
                            stats.hit_rate()
                        );
                    } else {
                        debug!(
                            "Expiry sweep: nothing to remove, {} entries",
                            stats.total_entries
                        );
                    }
                }
                _ = shutdown.recv() => break,
            }
        }

        info!("Expiry sweep task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout};

    const PERIOD: Duration = Duration::from_millis(100);

    fn shared_store() -> Arc<RwLock<CacheStore>> {
        Arc::new(RwLock::new(CacheStore::new(PERIOD)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_expired_entries() {
        let store = shared_store();
        store.write().await.add("expire_soon".to_string(), vec![1]);

        let (_tx, rx) = mpsc::channel(1);
        let handle = spawn_sweep_task(store.clone(), PERIOD, rx);

        sleep(Duration::from_millis(150)).await;

        assert!(
            store.read().await.is_empty(),
            "Expired entry should have been swept"
        );
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_preserves_young_entries() {
        let store = shared_store();
        let (_tx, rx) = mpsc::channel(1);
        let handle = spawn_sweep_task(store.clone(), PERIOD, rx);

        // Added at 60ms: 40ms old at the first tick, 140ms old at the second
        sleep(Duration::from_millis(60)).await;
        store.write().await.add("young".to_string(), vec![2]);

        sleep(Duration::from_millis(90)).await;
        assert_eq!(store.write().await.get("young"), Some(vec![2]));

        sleep(Duration::from_millis(100)).await;
        assert_eq!(store.write().await.get("young"), None);

        let stats = store.read().await.stats();
        assert_eq!(stats.sweeps, 2);
        assert_eq!(stats.evictions, 1);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_does_not_fire_immediately() {
        let store = shared_store();
        let (_tx, rx) = mpsc::channel(1);
        let handle = spawn_sweep_task(store.clone(), PERIOD, rx);

        sleep(Duration::from_millis(99)).await;
        assert_eq!(store.read().await.stats().sweeps, 0);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(store.read().await.stats().sweeps, 1);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_clamps_huge_period() {
        let store = shared_store();
        store.write().await.add("kept".to_string(), vec![1]);

        let (tx, rx) = mpsc::channel(1);
        let handle = spawn_sweep_task(store.clone(), Duration::MAX, rx);

        sleep(Duration::from_secs(3600)).await;
        assert_eq!(store.read().await.stats().sweeps, 0);
        assert_eq!(store.write().await.get("kept"), Some(vec![1]));

        tx.send(()).await.unwrap();
        let joined = timeout(Duration::from_secs(1), handle).await;
        assert!(matches!(joined, Ok(Ok(()))), "Task should exit cleanly");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_stops_on_shutdown_message() {
        let (tx, rx) = mpsc::channel(1);
        let handle = spawn_sweep_task(shared_store(), PERIOD, rx);

        tx.send(()).await.unwrap();

        let joined = timeout(Duration::from_secs(1), handle).await;
        assert!(matches!(joined, Ok(Ok(()))), "Task should exit cleanly");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_stops_when_sender_dropped() {
        let store = shared_store();
        let (tx, rx) = mpsc::channel(1);
        let handle = spawn_sweep_task(store.clone(), PERIOD, rx);

        drop(tx);

        let joined = timeout(Duration::from_secs(1), handle).await;
        assert!(matches!(joined, Ok(Ok(()))), "Task should exit cleanly");
        assert_eq!(Arc::strong_count(&store), 1, "Task should release the store");
    }
}
