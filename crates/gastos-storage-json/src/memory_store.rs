use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use gastos_core::{CoreError, KeyValueStore};

/// Process-local byte store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places raw bytes under `key`, bypassing serialization.
    pub fn insert_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), bytes.into());
    }

    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.get_raw(key))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        self.insert_raw(key, bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_load_as_none() {
        let store = MemoryStore::new();
        assert!(store.load("expenses").unwrap().is_none());
        store.save("expenses", b"[]").unwrap();
        assert_eq!(store.load("expenses").unwrap(), Some(b"[]".to_vec()));
        assert_eq!(store.keys(), vec!["expenses".to_string()]);
    }
}
