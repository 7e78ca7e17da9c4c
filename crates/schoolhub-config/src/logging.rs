use std::path::PathBuf;

use crate::env_lookup;

/// Logging configuration.
///
/// # Environment Variables
///
/// - `LOG_LEVEL`: Level for SchoolHub crates (default: `warn`)
/// - `SCHOOLHUB_LOG_DIR`: Directory for the rolling JSON log (default: `storage/logs`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub dir: PathBuf,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: lookup("LOG_LEVEL")
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "warn".to_string()),
            dir: PathBuf::from(
                lookup("SCHOOLHUB_LOG_DIR").unwrap_or_else(|| "storage/logs".to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::from_lookup(|_| None);
        assert_eq!(config.level, "warn");
        assert_eq!(config.dir, PathBuf::from("storage/logs"));
    }

    #[test]
    fn test_level_is_normalised() {
        let config = LogConfig::from_lookup(|key| (key == "LOG_LEVEL").then(|| " DEBUG ".into()));
        assert_eq!(config.level, "debug");
    }
}
