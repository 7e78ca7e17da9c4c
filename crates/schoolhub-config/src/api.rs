use std::time::Duration;

use crate::{ConfigError, env_lookup};

/// Backend API configuration.
///
/// # Environment Variables
///
/// - `SCHOOLHUB_API_URL`: Base URL including the `/api` prefix (default: `http://localhost:5000/api`)
/// - `SCHOOLHUB_API_TIMEOUT_SECS`: Request timeout in seconds (default: `30`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5000/api";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SCHOOLHUB_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());

        let timeout_secs = lookup("SCHOOLHUB_API_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_secs,
        }
    }

    /// Config pointing at an explicit base URL with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                name: "SCHOOLHUB_API_URL",
                value: self.base_url.clone(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::NotPositive {
                name: "SCHOOLHUB_API_TIMEOUT_SECS",
            });
        }
        Ok(())
    }

    /// Joins an endpoint path (e.g. `/students/42`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }
}
