//! Cache Statistics Module
//!
//! Tracks cache performance metrics including accesses, hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
///
/// Counters are cumulative over the lifetime of the cache; only `size`
/// follows the current contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of `get` calls
    pub accesses: u64,
    /// Number of `get` calls that returned a live value
    pub hits: u64,
    /// Number of `get` calls that found nothing usable (absent or expired)
    pub misses: u64,
    /// hits / accesses, 0.0 before the first access
    pub hit_rate: f64,
    /// Current number of entries in the cache
    pub size: usize,
    /// Entries removed by LRU eviction or by the background sweep
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Counts an access that returned a value.
    pub fn record_hit(&mut self) {
        self.accesses += 1;
        self.hits += 1;
        self.update_hit_rate();
    }

    // == Record Miss ==
    /// Counts an access that returned nothing.
    pub fn record_miss(&mut self) {
        self.accesses += 1;
        self.misses += 1;
        self.update_hit_rate();
    }

    // == Record Evictions ==
    /// Adds `count` to the eviction counter.
    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    // == Update Size ==
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    fn update_hit_rate(&mut self) {
        self.hit_rate = if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        };
    }
}
