//! Bearer credential persistence.
//!
//! One durable key, stored as JSON under the user config directory. The
//! store performs no expiry tracking; an absent credential simply means
//! "unauthenticated" and callers fail their operation instead of proceeding
//! with a null token.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque bearer token identifying an authenticated user to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session(String);

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value for the `Authorization` header.
    pub fn token(&self) -> &str {
        &self.0
    }
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    access_token: Session,
}

/// File-backed persistence facade for the session credential.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store over an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location under the user config dir.
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            Error::Validation("could not determine config directory".to_string())
        })?;
        Ok(Self::new(base.join("docgen").join("session.json")))
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted credential, `None` when absent.
    pub fn load(&self) -> Result<Option<Session>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredSession = serde_json::from_str(&data)?;
        Ok(Some(stored.access_token))
    }

    /// Persists a credential, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let stored = StoredSession {
            access_token: session.clone(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }

    /// Removes the credential file if present. Returns whether it existed.
    pub fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
