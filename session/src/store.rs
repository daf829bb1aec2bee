//! Durable token storage seam.
//!
//! Storage is a string-only key/value store, mirroring `window.localStorage`.
//! Absence of a key is the normal logged-out state, not an error.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Error returned by a [`TokenStore`] that can reject reads or writes.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("durable storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// String key/value storage that survives reloads or process restarts.
pub trait TokenStore {
    /// Read `key`, returning `Ok(None)` when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store used by server-side rendering and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with both tokens, skipping absent ones.
    #[must_use]
    pub fn with_tokens(access_token: Option<&str>, refresh_token: Option<&str>) -> Self {
        let store = Self::new();
        {
            let mut entries = store.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(token) = access_token {
                entries.insert(ACCESS_TOKEN_KEY.to_owned(), token.to_owned());
            }
            if let Some(token) = refresh_token {
                entries.insert(REFRESH_TOKEN_KEY.to_owned(), token.to_owned());
            }
        }
        store
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
