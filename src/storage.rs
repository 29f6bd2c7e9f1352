use crate::data::{validate_games, Game, Snapshot};
use gloo_storage::{LocalStorage, Storage};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::collections::HashMap;
use thiserror::Error;

pub const STORAGE_KEY: &str = "gotyGamesData";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("stored value is not valid JSON: {0}")]
    Serde(String),
}

pub trait KeyValueStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>;
    fn delete(&self, key: &str);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match LocalStorage::get::<T>(key) {
            Ok(value) => Ok(Some(value)),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
            Err(gloo_storage::errors::StorageError::SerdeError(err)) => {
                Err(StorageError::Serde(err.to_string()))
            }
            Err(err) => Err(StorageError::Unavailable(err.to_string())),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        LocalStorage::set(key, value).map_err(|err| StorageError::Unavailable(err.to_string()))
    }

    fn delete(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.entries.borrow().get(key) {
            Some(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|err| StorageError::Serde(err.to_string())),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable("quota exceeded".to_owned()));
        }
        let text = serde_json::to_string(value).map_err(|err| StorageError::Serde(err.to_string()))?;
        self.entries.borrow_mut().insert(key.to_owned(), text);
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl<S: KeyValueStore> KeyValueStore for &S {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        (**self).get(key)
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) {
        (**self).delete(key)
    }
}

// Unreadable or inconsistent data is logged and treated as absent.
pub fn load_snapshot<S: KeyValueStore>(backend: &S) -> Option<Snapshot> {
    let snapshot = match backend.get::<Snapshot>(STORAGE_KEY) {
        Ok(snapshot) => snapshot?,
        Err(err) => {
            warn!("Ignoring persisted games: {}", err);
            return None;
        }
    };

    if let Err(err) = validate_games(&snapshot.games) {
        warn!("Ignoring persisted games: {}", err);
        return None;
    }
    Some(snapshot)
}

pub fn save_snapshot<S: KeyValueStore>(backend: &S, games: &[Game]) -> Result<(), StorageError> {
    backend.set(
        STORAGE_KEY,
        &Snapshot {
            games: games.to_vec(),
        },
    )
}
