//! Device-local key-value persistence.
//!
//! Session data that lives on the user's device (the last completed
//! assessment, for instance) goes through the [`LocalStore`] trait rather
//! than ambient global storage, so scoring and chat logic stay pure and can
//! be exercised against a [`MemoryStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// String-keyed, string-valued store with `localStorage` semantics.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Insert or replace the value under `key`.
    fn set(&self, key: &str, value: String) -> Result<(), CoreError>;

    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

impl<T: LocalStore + ?Sized> LocalStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}

impl<T: LocalStore + ?Sized> LocalStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}

/// A record type that lives under a single well-known key.
pub trait StoredRecord: Serialize + DeserializeOwned {
    const KEY: &'static str;
}

/// Load the record stored under `R::KEY`, if any.
pub fn load<R, S>(store: &S) -> Result<Option<R>, CoreError>
where
    R: StoredRecord,
    S: LocalStore + ?Sized,
{
    match store.get(R::KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `record` and write it under `R::KEY`, replacing any prior value.
pub fn save<R, S>(store: &S, record: &R) -> Result<(), CoreError>
where
    R: StoredRecord,
    S: LocalStore + ?Sized,
{
    let raw = serde_json::to_string(record)?;
    store.set(R::KEY, raw)
}

/// In-memory [`LocalStore`]. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.entries
            .lock()
            .map_err(|_| CoreError::LocalStore("memory store lock poisoned".to_string()))
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        self.entries()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}
