//! Memory Cache Module
//!
//! Thread-safe cache handle that owns the background expiry sweep.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheOptions, CacheStats, CacheStore, Clock, SystemClock};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

// == Memory Cache ==
/// Bounded, expiring key-value cache safe to share between threads and tasks.
///
/// Every operation, and every tick of the background sweep, runs with the
/// store lock held, so operations from different callers never interleave.
/// Share a cache by wrapping it in an `Arc`; dropping the last handle stops
/// the sweep.
///
/// # Example
/// ```
/// use memory_cache::{CacheOptions, MemoryCache};
///
/// # #[tokio::main]
/// # async fn main() -> memory_cache::Result<()> {
/// let cache = MemoryCache::new(CacheOptions::default().with_name("sessions"))?;
/// cache.set("session_42".to_string(), vec!["hello".to_string()], None);
/// assert_eq!(cache.get(&"session_42".to_string()), Some(vec!["hello".to_string()]));
/// cache.close();
/// # Ok(())
/// # }
/// ```
pub struct MemoryCache<K, V, C = SystemClock> {
    store: Arc<Mutex<CacheStore<K, V, C>>>,
    name: String,
    sweep_interval: Duration,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> MemoryCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts its background sweep on the current
    /// tokio runtime.
    ///
    /// # Errors
    /// - `InvalidConfig` if the options fail validation
    /// - `RuntimeUnavailable` if called outside a tokio runtime
    pub fn new(options: CacheOptions) -> Result<Self> {
        Self::with_clock(options, SystemClock)
    }
}

impl<K, V, C> MemoryCache<K, V, C>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
    C: Clock,
{
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(options: CacheOptions, clock: C) -> Result<Self> {
        options.validate()?;
        let runtime = Handle::try_current().map_err(|_| CacheError::RuntimeUnavailable)?;

        let sweep_interval = options.sweep_interval();
        let store = Arc::new(Mutex::new(CacheStore::with_clock(&options, clock)));
        let sweeper = spawn_sweep_task(&runtime, Arc::downgrade(&store), sweep_interval);

        debug!(
            cache = %options.name,
            interval_ms = sweep_interval.as_millis() as u64,
            "Periodic expiry sweep started"
        );

        Ok(Self {
            store,
            name: options.name,
            sweep_interval,
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    /// Returns the value for `key`, or None if absent or expired.
    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().get(key)
    }

    /// Stores `value` under `key` for `ttl`, or the default TTL if None.
    pub fn set(&self, key: K, value: V, ttl: Option<Duration>) {
        self.lock().set(key, value, ttl);
    }

    /// Removes `key`. Returns whether it was present.
    pub fn delete(&self, key: &K) -> bool {
        self.lock().delete(key)
    }

    /// Removes every entry, keeping lifetime statistics.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Whether `key` is stored, regardless of expiry.
    pub fn has(&self, key: &K) -> bool {
        self.lock().has(key)
    }

    /// Snapshot of stored keys, least recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.lock().keys()
    }

    /// Number of stored entries.
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Period of the background sweep.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    // == Close ==
    /// Stops the background sweep.
    ///
    /// The cache stays usable: expired entries are still never returned, they
    /// are just no longer purged until read. Calling it again does nothing.
    pub fn close(&self) {
        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            handle.abort();
            info!(cache = %self.name, "Periodic expiry sweep stopped");
        }
    }

    /// Whether the background sweep has been stopped.
    pub fn is_closed(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn lock(&self) -> MutexGuard<'_, CacheStore<K, V, C>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V, C> Drop for MemoryCache<K, V, C> {
    fn drop(&mut self) {
        let sweeper = self
            .sweeper
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = sweeper.take() {
            handle.abort();
        }
    }
}

impl<K, V, C> Debug for MemoryCache<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("name", &self.name)
            .field("sweep_interval", &self.sweep_interval)
            .finish_non_exhaustive()
    }
}
