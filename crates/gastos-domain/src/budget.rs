use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::ExpenseCategory, common::BudgetPeriod, common::Identifiable};

/// A spending guardrail for a specific category.
///
/// `start_date` and `is_active` are recorded but do not influence window
/// resolution or filtering: every budget is evaluated against the period that
/// contains "now".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub category: ExpenseCategory,
    pub limit: f64,
    pub period: BudgetPeriod,
    pub start_date: DateTime<Utc>,
    #[serde(default = "Budget::default_active")]
    pub is_active: bool,
}

impl Budget {
    pub fn new(
        category: ExpenseCategory,
        limit: f64,
        period: BudgetPeriod,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            limit,
            period,
            start_date,
            is_active: true,
        }
    }

    pub fn default_active() -> bool {
        true
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}
