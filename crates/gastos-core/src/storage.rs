use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use gastos_domain::{Budget, Expense, UserProfile};

use crate::CoreError;

/// Stable keys under which the three ledger records are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Expenses,
    Budgets,
    UserProfile,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::Expenses,
        StorageKey::Budgets,
        StorageKey::UserProfile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Expenses => "expenses",
            StorageKey::Budgets => "budgets",
            StorageKey::UserProfile => "userProfile",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte-level key/value backend. `Ok(None)` means the key has never been written.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError>;
}

/// Abstraction over persistence backends capable of storing the ledger records.
///
/// Each record is read and written on its own so that one bad record never
/// blocks the others.
pub trait LedgerStorage: Send + Sync {
    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), CoreError>;
    fn save_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError>;
    fn save_profile(&self, profile: &UserProfile) -> Result<(), CoreError>;
    fn load_expenses(&self) -> Result<Option<Vec<Expense>>, CoreError>;
    fn load_budgets(&self) -> Result<Option<Vec<Budget>>, CoreError>;
    fn load_profile(&self) -> Result<Option<UserProfile>, CoreError>;
}

/// Everything the ledger owns: expenses in insertion order, budgets, and the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerState {
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    pub profile: UserProfile,
}

impl LedgerState {
    /// Empty ledger for a user joining at `join_date`.
    pub fn new(join_date: DateTime<Utc>) -> Self {
        Self {
            expenses: Vec::new(),
            budgets: Vec::new(),
            profile: UserProfile::new(join_date),
        }
    }
}

/// Outcome of [`save_state`]: which records could not be written.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub failures: Vec<(StorageKey, CoreError)>,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_keys(&self) -> Vec<StorageKey> {
        self.failures.iter().map(|(key, _)| *key).collect()
    }
}

/// Loads every record, substituting defaults for anything absent or unreadable.
///
/// A fresh profile joins at `now`. Never fails.
pub fn load_state(storage: &dyn LedgerStorage, now: DateTime<Utc>) -> LedgerState {
    let expenses = or_default(StorageKey::Expenses, storage.load_expenses(), Vec::new);
    let budgets = or_default(StorageKey::Budgets, storage.load_budgets(), Vec::new);
    let profile = or_default(StorageKey::UserProfile, storage.load_profile(), || {
        UserProfile::new(now)
    });
    debug!(
        expenses = expenses.len(),
        budgets = budgets.len(),
        "ledger state loaded"
    );
    LedgerState {
        expenses,
        budgets,
        profile,
    }
}

fn or_default<T>(
    key: StorageKey,
    loaded: Result<Option<T>, CoreError>,
    fallback: impl FnOnce() -> T,
) -> T {
    match loaded {
        Ok(Some(value)) => value,
        Ok(None) => fallback(),
        Err(err) => {
            warn!(key = key.as_str(), error = %err, "discarding unreadable record");
            fallback()
        }
    }
}

/// Writes all three records. Failures are logged and collected, never propagated.
pub fn save_state(storage: &dyn LedgerStorage, state: &LedgerState) -> SaveReport {
    let attempts = [
        (StorageKey::Expenses, storage.save_expenses(&state.expenses)),
        (StorageKey::Budgets, storage.save_budgets(&state.budgets)),
        (StorageKey::UserProfile, storage.save_profile(&state.profile)),
    ];

    let mut report = SaveReport::default();
    for (key, outcome) in attempts {
        if let Err(err) = outcome {
            warn!(key = key.as_str(), error = %err, "failed to persist record");
            report.failures.push((key, err));
        }
    }
    report
}
