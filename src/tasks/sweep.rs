//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStore, Clock};

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task sleeps for `interval` between sweeps and holds the store lock
/// only for the duration of each sweep. It keeps a weak reference to the
/// store and ends by itself once the store has been dropped.
///
/// # Arguments
/// * `runtime` - Runtime the task is spawned on
/// * `store` - Weak reference to the shared store
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which is aborted to stop sweeping.
pub fn spawn_sweep_task<K, V, C>(
    runtime: &Handle,
    store: Weak<Mutex<CacheStore<K, V, C>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
    C: Clock,
{
    runtime.spawn(async move {
        debug!(
            interval_ms = interval.as_millis() as u64,
            "Starting expiry sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(shared) = store.upgrade() else {
                debug!("Cache dropped, stopping expiry sweep task");
                break;
            };

            let (removed, name) = {
                let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
                (guard.sweep_expired(), guard.name().to_string())
            };

            if removed > 0 {
                info!(cache = %name, removed, "Expiry sweep removed expired entries");
            } else {
                debug!(cache = %name, "Expiry sweep found no expired entries");
            }
        }
    })
}
