//! # SchoolHub Auth
//!
//! Session handling for the SchoolHub client.
//!
//! This crate provides:
//!
//! - [`claims`]: Reading the `exp` claim of a bearer token without verifying it
//! - [`storage`]: Where the session is persisted ([`FileSessionStorage`], [`MemorySessionStorage`])
//! - [`manager`]: [`SessionManager`], the single owner of the signed-in session
//!
//! The backend verifies tokens; the client only looks at expiry so that a
//! stale session is dropped on start-up instead of failing on the first
//! request.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_auth::SessionManager;
//! use schoolhub_config::SessionConfig;
//!
//! let sessions = SessionManager::from_config(&SessionConfig::from_env());
//! if let Some(session) = sessions.restore() {
//!     println!("Signed in as {}", session.user.name);
//! }
//! ```

pub mod claims;
pub mod manager;
pub mod storage;

use schoolhub_models::User;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use claims::{TokenClaims, token_expired};
pub use manager::SessionManager;
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};

/// A signed-in account and its bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid: {0}")]
    Serialization(#[from] serde_json::Error),
}
