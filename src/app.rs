//! Opening ledger sessions from configuration.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use gastos_config::Config;
use gastos_core::{parse_amount, Clock, LedgerSession, SystemClock};
use gastos_domain::{Budget, Expense, ExpenseCategory};
use gastos_storage_json::JsonLedgerStorage;

use crate::Result;

/// Opens the ledger stored under the configured data root, on wall-clock time.
pub fn open_session(config: &Config) -> Result<LedgerSession> {
    config.validate()?;
    open_session_at(config.resolve_data_root(), Arc::new(SystemClock))
}

/// Opens the ledger stored as JSON files in `root`.
pub fn open_session_at(root: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<LedgerSession> {
    let root = root.into();
    let storage = JsonLedgerStorage::at_dir(&root)?;
    info!(root = %root.display(), "opening ledger");
    Ok(LedgerSession::open(Box::new(storage), clock))
}

/// Parses user-entered amount text and logs the expense dated now.
pub fn record_expense(
    session: &LedgerSession,
    raw_amount: &str,
    description: &str,
    category: ExpenseCategory,
) -> Result<Uuid> {
    let amount = parse_amount(raw_amount)?;
    let expense = Expense::new(amount, description.trim(), category, session.now());
    Ok(session.add_expense(expense)?)
}

/// Budget starting now with the configured default period.
pub fn budget_with_default_period(
    config: &Config,
    session: &LedgerSession,
    category: ExpenseCategory,
    limit: f64,
) -> Budget {
    Budget::new(category, limit, config.default_budget_period, session.now())
}
