//! Process-wide session: the access token and its durable copy.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use shared::domain::AccessToken;
use tracing::{info, warn};

use crate::error::ClientError;

/// Synchronous key/value slot holding the persisted token.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> io::Result<Option<AccessToken>>;
    fn store(&self, token: &AccessToken) -> io::Result<()>;
    fn remove(&self) -> io::Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: AccessToken,
}

/// Stores the token as a small JSON document at `path`.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> io::Result<Option<AccessToken>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        let persisted: PersistedSession = serde_json::from_str(&raw)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(Some(persisted.token))
    }

    fn store(&self, token: &AccessToken) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string(&PersistedSession {
            token: token.clone(),
        })
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(&self.path, serialized)
    }

    fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// In-process storage. Clones share the same slot, so a clone can stand in
/// for "the next page load" in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<AccessToken>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Option<AccessToken>>> {
        self.slot
            .lock()
            .map_err(|_| io::Error::other("token slot poisoned"))
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> io::Result<Option<AccessToken>> {
        Ok(self.lock()?.clone())
    }

    fn store(&self, token: &AccessToken) -> io::Result<()> {
        *self.lock()? = Some(token.clone());
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Sole owner of the token. Every reader sees a write immediately.
pub struct SessionStore {
    token: Option<AccessToken>,
    storage: Box<dyn TokenStorage>,
}

impl SessionStore {
    /// Restores whatever token the storage holds from a previous run.
    pub fn open(storage: impl TokenStorage + 'static) -> Self {
        let token = match storage.load() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "persisted session unreadable; starting signed out");
                None
            }
        };
        if token.is_some() {
            info!("restored persisted session");
        }
        Self {
            token,
            storage: Box::new(storage),
        }
    }

    pub fn get(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Replaces the token. The in-memory value changes even if persisting fails.
    pub fn set(&mut self, token: AccessToken) -> Result<(), ClientError> {
        let persisted = self.storage.store(&token);
        self.token = Some(token);
        persisted?;
        info!("session token stored");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), ClientError> {
        self.token = None;
        self.storage.remove()?;
        info!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
