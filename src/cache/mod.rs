//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, LRU eviction and a
//! periodic expiry sweep.

mod clock;
mod entry;
mod lru;
mod memory;
mod options;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryCache;
pub use options::{
    sweep_interval, CacheOptions, DEFAULT_MAX_SIZE, DEFAULT_NAME, DEFAULT_TTL,
    MAX_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL,
};
pub use stats::CacheStats;
pub use store::CacheStore;
