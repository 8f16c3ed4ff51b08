//! Memory Cache - A bounded in-memory cache
//!
//! Key-value caching with TTL expiration, LRU eviction, a periodic expiry
//! sweep and hit/miss statistics.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheOptions, CacheStats, CacheStore, Clock, ManualClock, MemoryCache, SystemClock};
pub use config::Config;
pub use error::{CacheError, Result};
