//! Error types for the cache
//!
//! Cache operations themselves never fail; errors only come from building a cache.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Options rejected by validation
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// The background sweep needs a tokio runtime to run on
    #[error("No tokio runtime available to run the background sweep")]
    RuntimeUnavailable,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
