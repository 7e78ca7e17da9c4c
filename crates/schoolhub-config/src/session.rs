use std::path::PathBuf;

use crate::env_lookup;

/// Session persistence configuration.
///
/// # Environment Variables
///
/// - `SCHOOLHUB_SESSION_FILE`: JSON file holding the token and user profile (default: `storage/session.json`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub path: PathBuf,
}

impl SessionConfig {
    pub const DEFAULT_PATH: &'static str = "storage/session.json";

    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("SCHOOLHUB_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_PATH.to_string());
        Self {
            path: PathBuf::from(path),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(Self::DEFAULT_PATH),
        }
    }
}
