//! File-backed session holder.
//!
//! The token is kept in a small JSON object under [`SESSION_TOKEN_KEY`], so
//! other keys written by hand survive a login or logout.

use fscomics_core::environment::{SessionError, SessionStore, SESSION_TOKEN_KEY};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Session holder persisting the token to a JSON file
///
/// Clones share the same file and lock.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileSessionStore {
    /// Use the file at `path`; it is created on the first login
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Map<String, Value>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(error) => return Err(SessionError::Io(error.to_string())),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SessionError::Corrupt("expected a JSON object".to_string())),
            Err(error) => Err(SessionError::Corrupt(error.to_string())),
        }
    }

    fn write(&self, map: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SessionError::Io(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(map).map_err(|e| SessionError::Corrupt(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| SessionError::Io(e.to_string()))
    }

    fn update(&self, token: Option<&str>) -> Result<(), SessionError> {
        let _guard = self.lock.lock().map_err(|_| SessionError::LockPoisoned)?;
        let mut map = self.read()?;
        match token {
            Some(token) => {
                map.insert(SESSION_TOKEN_KEY.to_string(), Value::String(token.to_string()));
            },
            None => {
                map.remove(SESSION_TOKEN_KEY);
            },
        }
        self.write(&map)
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(self
            .read()?
            .get(SESSION_TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string))
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        tracing::debug!(path = %self.path.display(), "Persisting session token");
        self.update(Some(token))
    }

    fn clear(&self) -> Result<(), SessionError> {
        tracing::debug!(path = %self.path.display(), "Clearing session token");
        self.update(None)
    }
}
