//! Cache Options Module
//!
//! Construction-time settings for a cache instance.

use std::time::Duration;

use crate::error::{CacheError, Result};

// == Defaults ==
/// Default entry lifetime when `set` is called without a TTL
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default maximum number of live entries
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Default diagnostic name
pub const DEFAULT_NAME: &str = "memory-cache";

/// Upper bound for the background sweep period
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Lower bound for the background sweep period
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// == Cache Options ==
/// Settings recognized by a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// Lifetime applied when `set` omits an explicit TTL
    pub ttl: Duration,
    /// Maximum number of live entries
    pub max_size: usize,
    /// Identifier used only in log output
    pub name: String,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_size: DEFAULT_MAX_SIZE,
            name: DEFAULT_NAME.to_string(),
        }
    }
}

impl CacheOptions {
    /// Options used by the application-wide conversational memory cache.
    pub fn memory_service() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_size: 2000,
            name: "memory-service-cache".to_string(),
        }
    }

    /// Sets the default entry lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the maximum number of live entries.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the diagnostic name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // == Validate ==
    /// Rejects options a cache cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "ttl must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Period of the background sweep for these options.
    pub fn sweep_interval(&self) -> Duration {
        sweep_interval(self.ttl)
    }
}

// == Sweep Interval ==
/// Half the default TTL, capped at [`MAX_SWEEP_INTERVAL`] and never below
/// [`MIN_SWEEP_INTERVAL`].
pub fn sweep_interval(ttl: Duration) -> Duration {
    (ttl / 2).clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL)
}
