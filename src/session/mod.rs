//! Bearer token storage.
//!
//! The token is the only durable client-side state. It is written by the login flow
//! and cleared by logout or a 401; every outbound request reads it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::ClientError;

/// Where the bearer token lives between requests.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Token held for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        read(&self.token).clone()
    }

    fn store(&self, token: &str) -> Result<(), ClientError> {
        *write(&self.token) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *write(&self.token) = None;
        Ok(())
    }
}

/// Token persisted to a file so a session survives restarts.
///
/// Reads are served from memory; the file is touched only on store and clear.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl FileTokenStore {
    /// Open the store, loading an existing token if the file is present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref().to_path_buf();
        let cached = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = ?path, has_token = cached.is_some(), "token store opened");

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        read(&self.cached).clone()
    }

    fn store(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, token)?;
        *write(&self.cached) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *write(&self.cached) = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.token().is_none());
        store.store("abc").unwrap();
        assert_eq!(store.token().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("token");

        let store = FileTokenStore::open(&path).unwrap();
        assert!(store.token().is_none());
        store.store("tok-123").unwrap();

        let reopened = FileTokenStore::open(&path).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("tok-123"));

        reopened.clear().unwrap();
        assert!(!path.exists());
        assert!(FileTokenStore::open(&path).unwrap().token().is_none());
    }

    #[test]
    fn test_clear_without_file() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::open(dir.path().join("token")).unwrap();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_blank_file_means_no_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        assert!(FileTokenStore::open(&path).unwrap().token().is_none());
    }
}
