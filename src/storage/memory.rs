//! In-memory storage backend

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{KeyValueStorage, StorageError};

/// Process-local storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
    /// When set, every call fails with `StorageError::Unavailable`
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .write()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Storage that refuses every read and write (private browsing, quota, ...)
    pub fn unavailable() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            unavailable: true,
        }
    }

    /// Raw value, bypassing the availability switch
    pub fn peek(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("favIds").unwrap(), None);

        storage.set("favIds", "[1,2]").unwrap();
        assert_eq!(storage.get("favIds").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_unavailable_storage_fails() {
        let storage = MemoryStorage::unavailable();
        assert!(matches!(storage.get("favIds"), Err(StorageError::Unavailable)));
        assert!(matches!(
            storage.set("favIds", "[]"),
            Err(StorageError::Unavailable)
        ));
        assert_eq!(storage.peek("favIds"), None);
    }
}
