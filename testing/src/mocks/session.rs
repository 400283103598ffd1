//! In-memory session store for testing.

use fscomics_core::environment::{SessionError, SessionStore};
use std::sync::{Arc, Mutex};

/// In-memory session store.
///
/// Clones share the same token, so a test can keep one handle while the
/// client owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    token: Arc<Mutex<Option<String>>>,
}

impl InMemorySessionStore {
    /// Create an empty (logged out) store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .token
            .lock()
            .map_err(|_| SessionError::LockPoisoned)?
            .clone())
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().map_err(|_| SessionError::LockPoisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock().map_err(|_| SessionError::LockPoisoned)? = None;
        Ok(())
    }
}
