//! JSON persistence for the Gastos ledger.
//!
//! [`JsonLedgerStorage`] encodes each ledger record with `serde_json` and hands
//! the bytes to any [`KeyValueStore`]: [`MemoryStore`] for tests and ephemeral
//! sessions, [`JsonFileStore`] for one file per key on disk.

mod file_store;
mod memory_store;

use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use gastos_core::{CoreError, KeyValueStore, LedgerStorage, StorageKey};
use gastos_domain::{Budget, Expense, UserProfile};

pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Ledger storage writing JSON documents into a byte store.
#[derive(Debug, Clone, Default)]
pub struct JsonLedgerStorage<S> {
    store: S,
}

impl<S: KeyValueStore> JsonLedgerStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), CoreError> {
        let bytes = serialize(value)?;
        self.store.save(key.as_str(), &bytes)?;
        debug!(key = key.as_str(), bytes = bytes.len(), "record written");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, CoreError> {
        match self.store.load(key.as_str())? {
            Some(bytes) => deserialize(&bytes).map(Some),
            None => Ok(None),
        }
    }
}

impl JsonLedgerStorage<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl JsonLedgerStorage<JsonFileStore> {
    /// Stores records as `<root>/<key>.json`, creating `root` if needed.
    pub fn at_dir(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        Ok(Self::new(JsonFileStore::new(root)?))
    }
}

impl<S: KeyValueStore> LedgerStorage for JsonLedgerStorage<S> {
    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), CoreError> {
        self.write(StorageKey::Expenses, expenses)
    }

    fn save_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError> {
        self.write(StorageKey::Budgets, budgets)
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), CoreError> {
        self.write(StorageKey::UserProfile, profile)
    }

    fn load_expenses(&self) -> Result<Option<Vec<Expense>>, CoreError> {
        self.read(StorageKey::Expenses)
    }

    fn load_budgets(&self) -> Result<Option<Vec<Budget>>, CoreError> {
        self.read(StorageKey::Budgets)
    }

    fn load_profile(&self) -> Result<Option<UserProfile>, CoreError> {
        self.read(StorageKey::UserProfile)
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec_pretty(value).map_err(|err| CoreError::Serde(err.to_string()))
}

fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CoreError> {
    serde_json::from_slice(bytes).map_err(|err| CoreError::Serde(err.to_string()))
}
