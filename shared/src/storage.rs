use std::collections::HashMap;
use crate::error::StorageError;

/// Key under which the whole vote store is persisted.
pub const VOTES_STORAGE_KEY: &str = "votes";

/// Synchronous string store addressed by key, the shape of browser local
/// storage. Writers replace the whole value of a key.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage with an optional per-key size quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self { entries: HashMap::new(), quota: Some(quota) }
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded { needed: value.len(), quota });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
