//! # SchoolHub Config
//!
//! Configuration types for the SchoolHub client, loaded from environment
//! variables:
//!
//! - [`api`]: Backend base URL and request timeout
//! - [`session`]: Where the session (token + user profile) is persisted
//! - [`logging`]: Log level and log file directory
//!
//! Every config also has a `from_lookup` constructor taking a variable
//! lookup function, which tests use instead of mutating the process
//! environment.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::{ApiConfig, LogConfig, SessionConfig};
//!
//! let api = ApiConfig::from_env();
//! api.validate()?;
//! let session = SessionConfig::from_env();
//! ```

pub mod api;
pub mod logging;
pub mod session;

use thiserror::Error;

pub use api::ApiConfig;
pub use logging::LogConfig;
pub use session::SessionConfig;

/// Error type for invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be an http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    NotPositive { name: &'static str },
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
