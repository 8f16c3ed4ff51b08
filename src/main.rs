//! Memory Cache soak driver
//!
//! Runs a synthetic session-lookup workload against a cache and reports its
//! statistics while it runs.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memory_cache::{CacheStats, Config, MemoryCache};

/// Cached payload: the message history of one session.
type SessionMessages = Arc<Vec<String>>;

/// Spread between consecutive session ids so lookups hop around the key space
const KEY_STRIDE: u64 = 7919;

/// Every Nth lookup also invalidates the key, as a write to the session would
const INVALIDATE_EVERY: u64 = 97;

/// Lookups between cooperative yields
const BATCH_SIZE: u64 = 1000;

/// Main entry point for the soak driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache (starts its expiry sweep)
/// 4. Run the workload until the duration elapses or a shutdown signal arrives
/// 5. Report final statistics and close the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memory_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Memory Cache soak driver");

    let config = Config::from_env();
    info!(
        "Configuration loaded: name={}, max_size={}, ttl={}ms, key_space={}, duration={}s",
        config.cache_name, config.max_size, config.ttl_ms, config.key_space, config.duration_secs
    );

    let cache: MemoryCache<String, SessionMessages> =
        MemoryCache::new(config.cache_options()).context("failed to create cache")?;
    info!(
        "Cache initialized, sweeping every {}ms",
        cache.sweep_interval().as_millis()
    );

    let deadline = Instant::now() + Duration::from_secs(config.duration_secs);
    tokio::select! {
        lookups = run_workload(&cache, &config, deadline) => {
            info!("Workload finished after {} lookups", lookups);
        }
        _ = shutdown_signal() => {
            warn!("Workload interrupted");
        }
    }

    info!("Final statistics: {}", render_stats(&cache.stats())?);
    cache.close();

    info!("Soak driver shutdown complete");
    Ok(())
}

/// Looks sessions up the way the memory services do: read through the cache,
/// fill it on a miss, and invalidate now and then.
///
/// Returns the number of lookups performed.
async fn run_workload(
    cache: &MemoryCache<String, SessionMessages>,
    config: &Config,
    deadline: Instant,
) -> u64 {
    let key_space = config.key_space.max(1);
    let mut report = interval(Duration::from_secs(config.report_interval_secs.max(1)));
    report.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately
    report.tick().await;

    let mut lookups: u64 = 0;
    while Instant::now() < deadline {
        for _ in 0..BATCH_SIZE {
            let session = lookups.wrapping_mul(KEY_STRIDE) % key_space;
            let key = format!("episodic_{}", session);

            if cache.get(&key).is_none() {
                cache.set(key.clone(), fetch_session(session), None);
            }
            if lookups % INVALIDATE_EVERY == 0 {
                cache.delete(&key);
            }
            lookups += 1;
        }

        tokio::select! {
            biased;
            _ = report.tick() => match render_stats(&cache.stats()) {
                Ok(json) => info!("Cache statistics: {}", json),
                Err(err) => warn!("Failed to render statistics: {}", err),
            },
            _ = tokio::task::yield_now() => {}
        }
    }

    lookups
}

/// Stand-in for the backend read a cache miss would trigger.
fn fetch_session(session: u64) -> SessionMessages {
    Arc::new(
        (0..4)
            .map(|i| format!("session {} message {}", session, i))
            .collect(),
    )
}

fn render_stats(stats: &CacheStats) -> anyhow::Result<String> {
    serde_json::to_string(stats).context("failed to serialize cache statistics")
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
