//! Configuration Module
//!
//! Handles loading the soak driver configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheOptions;

/// Soak driver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Diagnostic name of the cache under test
    pub cache_name: String,
    /// Default entry TTL in milliseconds
    pub ttl_ms: u64,
    /// Maximum number of cache entries
    pub max_size: usize,
    /// Number of distinct session keys the workload cycles over
    pub key_space: u64,
    /// How long the workload runs, in seconds
    pub duration_secs: u64,
    /// Interval between statistics reports, in seconds
    pub report_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAME` - Cache name for logs (default: memory-service-cache)
    /// - `CACHE_TTL_MS` - Default TTL in milliseconds (default: 600000)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 2000)
    /// - `SOAK_KEY_SPACE` - Distinct session keys (default: 5000)
    /// - `SOAK_DURATION_SECS` - Workload duration in seconds (default: 10)
    /// - `REPORT_INTERVAL_SECS` - Statistics report interval in seconds (default: 2)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_name: env::var("CACHE_NAME").unwrap_or(defaults.cache_name),
            ttl_ms: env_or("CACHE_TTL_MS", defaults.ttl_ms),
            max_size: env_or("CACHE_MAX_SIZE", defaults.max_size),
            key_space: env_or("SOAK_KEY_SPACE", defaults.key_space),
            duration_secs: env_or("SOAK_DURATION_SECS", defaults.duration_secs),
            report_interval_secs: env_or("REPORT_INTERVAL_SECS", defaults.report_interval_secs),
        }
    }

    /// Cache options described by this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions::default()
            .with_name(self.cache_name.clone())
            .with_ttl(Duration::from_millis(self.ttl_ms))
            .with_max_size(self.max_size)
    }
}

impl Default for Config {
    fn default() -> Self {
        let preset = CacheOptions::memory_service();
        Self {
            cache_name: preset.name,
            ttl_ms: preset.ttl.as_millis() as u64,
            max_size: preset.max_size,
            key_space: 5000,
            duration_secs: 10,
            report_interval_secs: 2,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_name, "memory-service-cache");
        assert_eq!(config.ttl_ms, 600_000);
        assert_eq!(config.max_size, 2000);
        assert_eq!(config.key_space, 5000);
        assert_eq!(config.duration_secs, 10);
        assert_eq!(config.report_interval_secs, 2);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        for var in [
            "CACHE_NAME",
            "CACHE_TTL_MS",
            "CACHE_MAX_SIZE",
            "SOAK_KEY_SPACE",
            "SOAK_DURATION_SECS",
            "REPORT_INTERVAL_SECS",
        ] {
            env::remove_var(var);
        }

        let config = Config::from_env();
        assert_eq!(config.cache_name, "memory-service-cache");
        assert_eq!(config.ttl_ms, 600_000);
        assert_eq!(config.max_size, 2000);

        env::set_var("CACHE_NAME", "episodic");
        env::set_var("CACHE_TTL_MS", "1500");
        env::set_var("CACHE_MAX_SIZE", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.cache_name, "episodic");
        assert_eq!(config.ttl_ms, 1500);
        assert_eq!(config.max_size, 2000);

        env::remove_var("CACHE_NAME");
        env::remove_var("CACHE_TTL_MS");
        env::remove_var("CACHE_MAX_SIZE");
    }

    #[test]
    fn test_cache_options_from_config() {
        let config = Config {
            ttl_ms: 1000,
            max_size: 3,
            ..Config::default()
        };

        let options = config.cache_options();
        assert_eq!(options.ttl, Duration::from_millis(1000));
        assert_eq!(options.max_size, 3);
        assert_eq!(options.name, "memory-service-cache");
    }
}
