//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheOptions, CacheStats, Clock, LruTracker, SystemClock};

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
///
/// The store has a single owner and no background activity of its own:
/// expired entries are dropped when read, or in bulk by [`sweep_expired`].
/// Wrap it in [`MemoryCache`](crate::cache::MemoryCache) for shared access
/// and a periodic sweep.
///
/// [`sweep_expired`]: CacheStore::sweep_expired
#[derive(Debug)]
pub struct CacheStore<K, V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL for entries stored without an explicit one
    default_ttl: Duration,
    /// Diagnostic name
    name: String,
    clock: C,
}

impl<K, V> CacheStore<K, V, SystemClock>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore using the system clock.
    pub fn new(options: &CacheOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<K, V, C> CacheStore<K, V, C>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
    C: Clock,
{
    /// Creates a new CacheStore reading time from `clock`.
    ///
    /// A `max_size` of zero is raised to one so at least the newest entry fits.
    pub fn with_clock(options: &CacheOptions, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_size: options.max_size.max(1),
            default_ttl: options.ttl,
            name: options.name.clone(),
            clock,
        }
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// Returns None if the key is absent or expired; an expired entry is
    /// removed on the spot.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();

        match self.entries.get_mut(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) if !entry.is_expired(now) => {
                entry.touch(now);
                let value = entry.value.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => {}
        }

        // Expired: drop it exactly as delete would
        self.delete(key);
        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores a value, overwriting any previous one under the same key.
    ///
    /// If the key is new and the cache is at capacity, the least recently used
    /// entry is evicted first.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the default TTL if None)
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_least_recently_used();
        }

        let now = self.clock.now();
        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl), now);
        self.lru.touch(&key);
        debug!(cache = %self.name, key = ?key, "Item added to cache");
        self.entries.insert(key, entry);

        self.stats.set_size(self.entries.len());
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether it was present.
    pub fn delete(&mut self, key: &K) -> bool {
        let existed = self.entries.remove(key).is_some();
        self.lru.remove(key);
        self.stats.set_size(self.entries.len());

        if existed {
            debug!(cache = %self.name, key = ?key, "Item removed from cache");
        }
        existed
    }

    // == Clear ==
    /// Removes every entry. Lifetime counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_size(0);
        debug!(cache = %self.name, "Cache cleared");
    }

    // == Has ==
    /// Checks whether a key is stored, expired or not.
    ///
    /// Does not touch statistics or recency.
    pub fn has(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Keys ==
    /// Snapshot of all stored keys, expired or not, least recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.lru.iter().cloned().collect()
    }

    // == Stats ==
    /// Returns a copy of the current statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Each removed entry counts as an eviction. Returns the number removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        let count = expired_keys.len();
        self.stats.record_evictions(count as u64);
        self.stats.set_size(self.entries.len());
        count
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn evict_least_recently_used(&mut self) {
        let Some(victim) = self.lru.evict_oldest() else {
            return;
        };

        if let Some(entry) = self.entries.remove(&victim) {
            self.stats.record_evictions(1);
            debug!(
                cache = %self.name,
                key = ?victim,
                idle_ms = entry.idle_for(self.clock.now()).as_millis() as u64,
                "Item evicted by LRU policy"
            );
        }
        self.stats.set_size(self.entries.len());
    }
}
