//! The session manager.
//!
//! [`SessionManager`] is the only place that knows whether the user is
//! signed in. The HTTP client reads the token from it on every request and
//! calls [`SessionManager::invalidate`] when the backend answers 401; login
//! and logout go through [`SessionManager::establish`] and
//! [`SessionManager::clear`].

use std::sync::{Arc, PoisonError, RwLock};

use schoolhub_config::SessionConfig;
use schoolhub_models::User;

use crate::claims::token_expired;
use crate::storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
use crate::{Session, SessionError};

#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(Arc::new(FileSessionStorage::new(&config.path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStorage::new()))
    }

    /// Loads the persisted session.
    ///
    /// Expired tokens and unreadable session files are discarded, leaving
    /// the user signed out.
    pub fn restore(&self) -> Option<Session> {
        let stored = match self.storage.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                self.clear_storage();
                None
            }
        };

        let session = match stored {
            Some(session) if token_expired(&session.token) => {
                tracing::info!(user_id = %session.user.id, "Stored session has expired");
                self.clear_storage();
                None
            }
            other => other,
        };

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = session.clone();
        session
    }

    /// Persists a freshly issued session and makes it current.
    pub fn establish(&self, session: Session) -> Result<(), SessionError> {
        self.storage.save(&session)?;
        tracing::info!(user_id = %session.user.id, role = ?session.user.role, "Session established");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Replaces the stored profile, keeping the token.
    pub fn update_user(&self, user: User) -> Result<(), SessionError> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = current.as_mut() {
            session.user = user;
            self.storage.save(session)?;
        }
        Ok(())
    }

    /// Signs out: drops the session from memory and storage.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.storage.clear()
    }

    /// Drops the session after the backend rejected `rejected_token`.
    ///
    /// The session is only taken while it still carries that token, so a
    /// late 401 for an old token leaves a newer sign-in alone. Concurrent
    /// 401 responses for the same token clear it once; the rest get `false`.
    pub fn invalidate(&self, rejected_token: &str) -> bool {
        let dropped = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            match current.as_ref() {
                Some(session) if session.token == rejected_token => current.take(),
                _ => None,
            }
        };

        match dropped {
            Some(session) => {
                tracing::warn!(user_id = %session.user.id, "Session rejected by server, signing out");
                self.clear_storage();
                true
            }
            None => false,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.read(|session| session.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read(|session| session.user.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.read(Session::clone)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|_| ()).is_some()
    }

    fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> Option<T> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(f)
    }

    fn clear_storage(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::error!(error = %e, "Failed to clear stored session");
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
