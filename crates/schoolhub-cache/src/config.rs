//! Query cache configuration.

use std::time::Duration;

/// Query cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `CACHE_STALE_SECONDS`: How long a fetched value is served without
///   refetching (default: `0`, always refetch but share in-flight requests)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheConfig {
    pub stale_seconds: u64,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            stale_seconds: lookup("CACHE_STALE_SECONDS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
        }
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_seconds)
    }
}
