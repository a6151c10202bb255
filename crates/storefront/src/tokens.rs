//! Persisted authentication tokens.
//!
//! The backend issues a JWT access/refresh pair. Both live in a small
//! key-value store shared by the [`ApiClient`](crate::api::ApiClient), which
//! reads the access token for every request, and the
//! [`UserStore`](crate::store::UserStore), which writes them on sign-in and
//! removes them on logout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use crate::models::AuthTokens;

/// Storage keys for authentication data.
pub mod keys {
    /// Key for the JWT access token.
    pub const ACCESS_TOKEN: &str = "token";

    /// Key for the JWT refresh token.
    pub const REFRESH_TOKEN: &str = "refreshToken";
}

/// Errors raised while persisting tokens.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// Reading or writing the backing file failed.
    #[error("token file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not contain a JSON object of strings.
    #[error("token file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value storage for auth tokens.
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal could not be persisted.
    fn remove(&self, key: &str) -> Result<(), TokenStoreError>;
}

/// Persist both tokens of a freshly issued pair.
///
/// # Errors
///
/// Returns an error if either token could not be stored.
pub fn store_tokens(store: &dyn TokenStore, tokens: &AuthTokens) -> Result<(), TokenStoreError> {
    store.set(keys::ACCESS_TOKEN, &tokens.access)?;
    store.set(keys::REFRESH_TOKEN, &tokens.refresh)
}

/// Remove both tokens.
///
/// # Errors
///
/// Returns the first removal that could not be persisted.
pub fn clear_tokens(store: &dyn TokenStore) -> Result<(), TokenStoreError> {
    // Both removals are attempted; the first failure is reported
    let access = store.remove(keys::ACCESS_TOKEN);
    let refresh = store.remove(keys::REFRESH_TOKEN);
    access.and(refresh)
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

/// Tokens held for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// FileTokenStore
// =============================================================================

/// Tokens persisted as a JSON object in a file.
///
/// The file is read once on open and rewritten on every change. A missing
/// file is treated as an empty store and created on first write. A change
/// that cannot be written is not applied in memory either.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileTokenStore {
    /// Open the store backed by `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let path = path.into();

        let values = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => HashMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                TokenStoreError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(TokenStoreError::Io { path, source }),
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) -> Result<(), TokenStoreError> {
        let io_err = |source| TokenStoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(values).map_err(|source| {
            TokenStoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());

        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);

        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access: "access-1".to_string(),
            refresh: "refresh-1".to_string(),
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        store_tokens(&store, &tokens()).unwrap();

        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("access-1"));
        assert_eq!(store.get(keys::REFRESH_TOKEN).as_deref(), Some("refresh-1"));

        clear_tokens(&store).unwrap();
        assert!(store.get(keys::ACCESS_TOKEN).is_none());
        assert!(store.get(keys::REFRESH_TOKEN).is_none());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::open(dir.path().join("tokens.json")).unwrap();
        assert!(store.get(keys::ACCESS_TOKEN).is_none());
        // Removing from an empty store does not create the file
        store.remove(keys::ACCESS_TOKEN).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tokens.json");

        let store = FileTokenStore::open(&path).unwrap();
        store_tokens(&store, &tokens()).unwrap();

        let reopened = FileTokenStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::ACCESS_TOKEN).as_deref(), Some("access-1"));

        clear_tokens(&reopened).unwrap();
        let reopened = FileTokenStore::open(&path).unwrap();
        assert!(reopened.get(keys::REFRESH_TOKEN).is_none());
    }

    #[test]
    fn test_failed_write_leaves_memory_and_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::open(&path).unwrap();
        store_tokens(&store, &tokens()).unwrap();

        // A directory in place of the file makes every write fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = clear_tokens(&store).unwrap_err();
        assert!(matches!(err, TokenStoreError::Io { .. }));
        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("access-1"));
        assert_eq!(store.get(keys::REFRESH_TOKEN).as_deref(), Some("refresh-1"));

        assert!(store.set(keys::ACCESS_TOKEN, "access-2").is_err());
        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("access-1"));
    }

    #[test]
    fn test_clear_attempts_both_removals() {
        /// Fails every removal of the access token.
        struct StuckAccessToken(MemoryTokenStore);

        impl TokenStore for StuckAccessToken {
            fn get(&self, key: &str) -> Option<String> {
                self.0.get(key)
            }

            fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
                self.0.set(key, value)
            }

            fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
                if key == keys::ACCESS_TOKEN {
                    return Err(TokenStoreError::Io {
                        path: PathBuf::from("stuck"),
                        source: std::io::Error::other("read-only"),
                    });
                }
                self.0.remove(key)
            }
        }

        let store = StuckAccessToken(MemoryTokenStore::new());
        store_tokens(&store, &tokens()).unwrap();

        assert!(clear_tokens(&store).is_err());
        assert!(store.get(keys::REFRESH_TOKEN).is_none());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileTokenStore::open(&path).unwrap_err();
        assert!(matches!(err, TokenStoreError::Corrupt { .. }));
    }
}
