use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use gastos_domain::BudgetPeriod;

use crate::ConfigError;

const DATA_DIR_NAME: &str = "Gastos";

/// User preferences that shape presentation and where ledger data lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Display locale for amounts and dates. Week windows ignore it and always start on Monday.
    pub locale: String,
    pub currency: String,
    /// Period preselected when creating a budget.
    #[serde(default)]
    pub default_budget_period: BudgetPeriod,
    /// `tracing-subscriber` filter directive, e.g. `gastos=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Optional custom directory for ledger records. Defaults to `~/Documents/Gastos`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_budget_period: BudgetPeriod::default(),
            log_filter: None,
            data_root: None,
        }
    }
}

impl Config {
    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(DATA_DIR_NAME)
    }

    /// Rejects settings that would leave the engine without a usable locale or currency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "locale",
                reason: "must not be empty".into(),
            });
        }
        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid {
                field: "currency",
                reason: format!("`{}` is not a three-letter ISO code", self.currency),
            });
        }
        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "log_filter",
                    reason: "must not be blank when present".into(),
                });
            }
        }
        if let Some(root) = &self.data_root {
            if root.exists() && !root.is_dir() {
                return Err(ConfigError::DataRootNotDirectory(root.clone()));
            }
        }
        Ok(())
    }
}
