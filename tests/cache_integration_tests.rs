//! Integration Tests for the public cache API
//!
//! Drives `MemoryCache` the way callers do: through its handle, from async
//! code, with real and manual clocks.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use memory_cache::{CacheError, CacheOptions, ManualClock, MemoryCache};

// == Helper Functions ==

fn k(s: &str) -> String {
    s.to_string()
}

fn key_set(keys: Vec<String>) -> HashSet<String> {
    keys.into_iter().collect()
}

fn manual_cache(max_size: usize, ttl: Duration) -> (MemoryCache<String, u32, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let options = CacheOptions::default()
        .with_max_size(max_size)
        .with_ttl(ttl)
        .with_name("integration");
    let cache = MemoryCache::with_clock(options, clock.clone()).unwrap();
    (cache, clock)
}

// == Scenario Tests ==

#[tokio::test]
async fn test_scenario_lru_then_expiry_real_time() {
    let options = CacheOptions::default()
        .with_max_size(3)
        .with_ttl(Duration::from_millis(1000))
        .with_name("scenario");
    let cache: MemoryCache<String, u32> = MemoryCache::new(options).unwrap();

    cache.set(k("a"), 1, None);
    cache.set(k("b"), 2, None);
    cache.set(k("c"), 3, None);
    assert_eq!(cache.size(), 3);

    assert_eq!(cache.get(&k("a")), Some(1));

    cache.set(k("d"), 4, None);
    assert_eq!(key_set(cache.keys()), key_set(vec![k("a"), k("c"), k("d")]));
    assert_eq!(cache.stats().evictions, 1);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(cache.get(&k("a")), None);
    assert!(cache.size() <= 2);
    assert!(!cache.has(&k("a")));

    cache.close();
}

#[tokio::test]
async fn test_scenario_lru_then_expiry_manual_clock() {
    let (cache, clock) = manual_cache(3, Duration::from_millis(1000));

    cache.set(k("a"), 1, None);
    cache.set(k("b"), 2, None);
    cache.set(k("c"), 3, None);
    cache.get(&k("a"));
    cache.set(k("d"), 4, None);

    assert_eq!(cache.keys(), vec![k("c"), k("a"), k("d")]);

    clock.advance(Duration::from_millis(1100));

    assert_eq!(cache.get(&k("a")), None);
    assert_eq!(cache.size(), 2);
    // c and d are logically expired but still physically present
    assert!(cache.has(&k("c")));
    assert!(cache.has(&k("d")));
    assert_eq!(cache.get(&k("c")), None);
    assert_eq!(cache.get(&k("d")), None);
    assert_eq!(cache.size(), 0);
}

// == Property Scenarios ==

#[tokio::test]
async fn test_lru_eviction_order_two_slots() {
    let (cache, _) = manual_cache(2, Duration::from_secs(60));

    cache.set(k("A"), 1, None);
    cache.set(k("B"), 2, None);
    assert_eq!(cache.get(&k("A")), Some(1));
    cache.set(k("C"), 3, None);

    assert!(cache.has(&k("A")));
    assert!(!cache.has(&k("B")));
    assert!(cache.has(&k("C")));
}

#[tokio::test]
async fn test_ttl_override_per_call() {
    let (cache, clock) = manual_cache(10, Duration::from_secs(600));

    cache.set(k("query"), 1, Some(Duration::from_secs(300)));
    cache.set(k("timeline"), 2, None);

    clock.advance(Duration::from_secs(301));

    assert_eq!(cache.get(&k("query")), None);
    assert_eq!(cache.get(&k("timeline")), Some(2));
}

#[tokio::test]
async fn test_idempotent_delete() {
    let (cache, _) = manual_cache(10, Duration::from_secs(60));

    assert!(!cache.delete(&k("missing")));
    assert_eq!(cache.size(), 0);

    cache.set(k("present"), 1, None);
    assert!(cache.delete(&k("present")));
    assert!(!cache.delete(&k("present")));
    assert_eq!(cache.size(), 0);
}

#[tokio::test]
async fn test_stats_accounting() {
    let (cache, clock) = manual_cache(10, Duration::from_secs(60));
    assert_eq!(cache.stats().hit_rate, 0.0);

    cache.set(k("a"), 1, None);
    cache.set(k("b"), 2, Some(Duration::from_secs(1)));

    cache.get(&k("a")); // hit
    cache.get(&k("b")); // hit
    cache.get(&k("zzz")); // miss
    clock.advance(Duration::from_secs(2));
    cache.get(&k("b")); // miss, expired

    let stats = cache.stats();
    assert_eq!(stats.accesses, 4);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hit_rate, 0.5);
    assert_eq!(stats.size, 1);
    assert_eq!(stats.evictions, 0);
}

#[tokio::test]
async fn test_clear_keeps_lifetime_counters() {
    let (cache, _) = manual_cache(10, Duration::from_secs(60));

    cache.set(k("a"), 1, None);
    cache.get(&k("a"));
    cache.get(&k("b"));

    cache.clear();

    assert_eq!(cache.size(), 0);
    assert!(cache.keys().is_empty());
    let stats = cache.stats();
    assert_eq!(stats.size, 0);
    assert_eq!(stats.accesses, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_stats_snapshot_is_a_copy() {
    let (cache, _) = manual_cache(10, Duration::from_secs(60));

    let snapshot = cache.stats();
    cache.set(k("a"), 1, None);
    cache.get(&k("a"));

    assert_eq!(snapshot.accesses, 0);
    assert_eq!(snapshot.size, 0);
    assert_eq!(cache.stats().accesses, 1);
}

#[tokio::test]
async fn test_keys_is_a_snapshot() {
    let (cache, _) = manual_cache(10, Duration::from_secs(60));

    cache.set(k("a"), 1, None);
    let keys = cache.keys();
    cache.set(k("b"), 2, None);
    cache.delete(&k("a"));

    assert_eq!(keys, vec![k("a")]);
    assert_eq!(cache.keys(), vec![k("b")]);
}

// == Background Sweep ==

#[tokio::test(start_paused = true)]
async fn test_background_sweep_runs_repeatedly() {
    let (cache, clock) = manual_cache(100, Duration::from_millis(400));
    assert_eq!(cache.sweep_interval(), Duration::from_millis(200));

    cache.set(k("first"), 1, None);
    clock.advance(Duration::from_millis(500));
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(!cache.has(&k("first")));

    cache.set(k("second"), 2, None);
    clock.advance(Duration::from_millis(500));
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(!cache.has(&k("second")));

    let stats = cache.stats();
    assert_eq!(stats.evictions, 2);
    assert_eq!(stats.accesses, 0);
}

#[tokio::test(start_paused = true)]
async fn test_eviction_counter_combines_lru_and_sweep() {
    let (cache, clock) = manual_cache(2, Duration::from_secs(2));

    cache.set(k("a"), 1, None);
    cache.set(k("b"), 2, None);
    cache.set(k("c"), 3, None); // evicts a

    clock.advance(Duration::from_secs(3));
    tokio::time::sleep(Duration::from_millis(1100)).await; // sweeps b and c

    let stats = cache.stats();
    assert_eq!(stats.evictions, 3);
    assert_eq!(stats.size, 0);
}

// == Construction ==

#[test]
fn test_requires_runtime() {
    let result = MemoryCache::<String, u32>::new(CacheOptions::default());
    assert!(matches!(result, Err(CacheError::RuntimeUnavailable)));
}

#[tokio::test]
async fn test_rejects_zero_ttl() {
    let result = MemoryCache::<String, u32>::new(CacheOptions::default().with_ttl(Duration::ZERO));
    assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_access_keeps_capacity_invariant() {
    let options = CacheOptions::default()
        .with_max_size(64)
        .with_ttl(Duration::from_millis(50))
        .with_name("concurrent");
    let cache: Arc<MemoryCache<String, u64>> = Arc::new(MemoryCache::new(options).unwrap());

    let mut handles = Vec::new();
    for worker in 0..8u64 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            for i in 0..500u64 {
                let key = format!("session_{}", (worker * 31 + i) % 200);
                match i % 5 {
                    0 => {
                        cache.delete(&key);
                    }
                    1 => {
                        cache.has(&key);
                    }
                    _ => {
                        if cache.get(&key).is_none() {
                            cache.set(key, i, None);
                        }
                    }
                }
                assert!(cache.size() <= 64);
                if i % 100 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, stats.accesses);
    assert_eq!(stats.accesses, 8 * 300);
    assert!(stats.size <= 64);
    assert!(cache.keys().len() <= 64);
}
