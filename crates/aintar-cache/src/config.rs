//! Cache, lock and queue configuration.
//!
//! Loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use crate::queue::RetryPolicy;

/// Configuration for the in-process coordination primitives.
///
/// # Environment Variables
///
/// - `CACHE_TTL_SECONDS`: default TTL for cached items (default: `300`)
/// - `OPERATION_LOCK_TIMEOUT_SECONDS`: lock expiry (default: `30`)
/// - `REQUEST_QUEUE_CONCURRENCY`: jobs running at once (default: `4`)
/// - `REQUEST_RETRY_ATTEMPTS`: attempts per job, first one included (default: `3`)
/// - `REQUEST_RETRY_BASE_MS`: first backoff delay (default: `1000`)
/// - `REQUEST_RETRY_MAX_MS`: backoff cap (default: `10000`)
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub default_ttl_seconds: u64,
    pub lock_timeout_seconds: u64,
    pub queue_concurrency: usize,
    pub retry_attempts: u32,
    pub retry_base_ms: u64,
    pub retry_max_ms: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl_seconds: env_or("CACHE_TTL_SECONDS", defaults.default_ttl_seconds),
            lock_timeout_seconds: env_or(
                "OPERATION_LOCK_TIMEOUT_SECONDS",
                defaults.lock_timeout_seconds,
            ),
            queue_concurrency: env_or("REQUEST_QUEUE_CONCURRENCY", defaults.queue_concurrency)
                .max(1),
            retry_attempts: env_or("REQUEST_RETRY_ATTEMPTS", defaults.retry_attempts).max(1),
            retry_base_ms: env_or("REQUEST_RETRY_BASE_MS", defaults.retry_base_ms),
            retry_max_ms: env_or("REQUEST_RETRY_MAX_MS", defaults.retry_max_ms),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            base_delay: Duration::from_millis(self.retry_base_ms),
            max_delay: Duration::from_millis(self.retry_max_ms),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: 300,
            lock_timeout_seconds: 30,
            queue_concurrency: 4,
            retry_attempts: 3,
            retry_base_ms: 1000,
            retry_max_ms: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl(), Duration::from_secs(300));
        assert_eq!(config.retry_policy().max_attempts, 3);
        assert_eq!(config.retry_policy().base_delay, Duration::from_secs(1));
        assert_eq!(config.lock_timeout(), Duration::from_secs(30));
    }
}
