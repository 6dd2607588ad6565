//! The ledger context shared by every caller.
//!
//! A session owns the in-memory state, the clock, and the storage backend. All
//! mutations run under one write lock that stays held until the records have
//! been handed to storage, so readers never observe half-applied updates.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use gastos_domain::{
    display_badge, Achievement, Badge, Budget, BudgetPeriod, Expense, ExpenseCategory,
    Granularity, Identifiable, ReportPeriod, UserProfile,
};

use crate::{
    load_state, save_state, validate_budget, validate_expense, AchievementService,
    AggregationService, BudgetStatus, CategoryShare, Clock, CoreError, DailyTotal,
    ExpenseFilter, LedgerState, LedgerStorage, PeriodReport, SaveReport, StreakService,
};

/// Number of days covered by the spending trend.
pub const TREND_DAYS: i64 = 30;

pub struct LedgerSession {
    state: RwLock<LedgerState>,
    storage: Box<dyn LedgerStorage>,
    clock: Arc<dyn Clock>,
}

impl LedgerSession {
    /// Loads whatever the storage holds. Missing or unreadable records start empty.
    pub fn open(storage: Box<dyn LedgerStorage>, clock: Arc<dyn Clock>) -> Self {
        let state = load_state(storage.as_ref(), clock.now());
        info!(
            expenses = state.expenses.len(),
            budgets = state.budgets.len(),
            level = state.profile.level,
            "ledger session opened"
        );
        Self {
            state: RwLock::new(state),
            storage,
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, state: &LedgerState) -> SaveReport {
        let report = save_state(self.storage.as_ref(), state);
        if !report.is_clean() {
            debug!(failed = ?report.failed_keys(), "ledger persisted with failures");
        }
        report
    }

    /// Appends an expense, then updates streaks, points and achievements.
    pub fn add_expense(&self, expense: Expense) -> Result<Uuid, CoreError> {
        validate_expense(&expense)?;
        let now = self.clock.now();
        let mut state = self.write();
        if state.expenses.iter().any(|existing| existing.id == expense.id) {
            return Err(CoreError::Validation(format!(
                "expense {} already exists",
                expense.id
            )));
        }

        let id = expense.id;
        state.expenses.push(expense);
        {
            let LedgerState {
                expenses, profile, ..
            } = &mut *state;
            StreakService::record_expense_logged(profile, expenses.as_slice(), now);
            AchievementService::evaluate(profile, expenses.as_slice(), now);
        }
        self.persist(&state);
        Ok(id)
    }

    /// Replaces the expense with the same id. Returns `false` for unknown ids.
    ///
    /// Profile counters are left alone; only `add_expense` moves them.
    pub fn update_expense(&self, expense: Expense) -> Result<bool, CoreError> {
        validate_expense(&expense)?;
        let mut state = self.write();
        let replaced = replace_by_id(&mut state.expenses, expense);
        if replaced {
            self.persist(&state);
        }
        Ok(replaced)
    }

    pub fn delete_expense(&self, id: Uuid) -> bool {
        let mut state = self.write();
        let removed = remove_by_id(&mut state.expenses, id);
        if removed {
            self.persist(&state);
        }
        removed
    }

    pub fn add_budget(&self, budget: Budget) -> Result<Uuid, CoreError> {
        validate_budget(&budget)?;
        let mut state = self.write();
        if state.budgets.iter().any(|existing| existing.id == budget.id) {
            return Err(CoreError::Validation(format!(
                "budget {} already exists",
                budget.id
            )));
        }
        let id = budget.id;
        state.budgets.push(budget);
        self.persist(&state);
        Ok(id)
    }

    pub fn update_budget(&self, budget: Budget) -> Result<bool, CoreError> {
        validate_budget(&budget)?;
        let mut state = self.write();
        let replaced = replace_by_id(&mut state.budgets, budget);
        if replaced {
            self.persist(&state);
        }
        Ok(replaced)
    }

    pub fn delete_budget(&self, id: Uuid) -> bool {
        let mut state = self.write();
        let removed = remove_by_id(&mut state.budgets, id);
        if removed {
            self.persist(&state);
        }
        removed
    }

    /// Unlocks an achievement outside the automatic rules.
    pub fn unlock_achievement(&self, achievement: Achievement) -> bool {
        let now = self.clock.now();
        let mut state = self.write();
        let unlocked = AchievementService::unlock(&mut state.profile, achievement, now);
        if unlocked {
            self.persist(&state);
        }
        unlocked
    }

    /// Expenses in insertion order.
    pub fn expenses(&self) -> Vec<Expense> {
        self.read().expenses.clone()
    }

    pub fn budgets(&self) -> Vec<Budget> {
        self.read().budgets.clone()
    }

    pub fn profile(&self) -> UserProfile {
        self.read().profile.clone()
    }

    pub fn expense(&self, id: Uuid) -> Option<Expense> {
        self.read()
            .expenses
            .iter()
            .find(|expense| expense.id == id)
            .cloned()
    }

    pub fn snapshot(&self) -> LedgerState {
        self.read().clone()
    }

    pub fn expenses_by_category(&self) -> BTreeMap<ExpenseCategory, f64> {
        AggregationService::total_by_category(&self.read().expenses)
    }

    pub fn total_in_window(&self, granularity: Granularity) -> f64 {
        let now = self.clock.now();
        AggregationService::total_in_window(&self.read().expenses, granularity, now)
    }

    pub fn monthly_total(&self) -> f64 {
        self.total_in_window(Granularity::Month)
    }

    pub fn weekly_total(&self) -> f64 {
        self.total_in_window(Granularity::Week)
    }

    pub fn budget_consumed(&self, category: ExpenseCategory, period: BudgetPeriod) -> f64 {
        let now = self.clock.now();
        AggregationService::budget_consumed(&self.read().expenses, category, period, now)
    }

    pub fn budget_ratio(&self, category: ExpenseCategory, period: BudgetPeriod, limit: f64) -> f64 {
        AggregationService::budget_ratio(self.budget_consumed(category, period), limit)
    }

    /// Consumption of every budget in the period containing now.
    pub fn budget_statuses(&self) -> Vec<BudgetStatus> {
        let now = self.clock.now();
        let state = self.read();
        state
            .budgets
            .iter()
            .map(|budget| AggregationService::budget_status(&state.expenses, budget, now))
            .collect()
    }

    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        AggregationService::category_breakdown(&self.read().expenses)
    }

    pub fn daily_trend(&self) -> Vec<DailyTotal> {
        let now = self.clock.now();
        AggregationService::daily_trend(&self.read().expenses, now, TREND_DAYS)
    }

    pub fn period_report(&self, period: ReportPeriod) -> PeriodReport {
        let now = self.clock.now();
        AggregationService::period_report(&self.read().expenses, period, now)
    }

    pub fn filter_expenses(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        AggregationService::filter_expenses(&self.read().expenses, filter)
    }

    pub fn most_used_category(&self) -> Option<ExpenseCategory> {
        AggregationService::most_used_category(&self.read().expenses)
    }

    /// All catalog entries, locked ones synthesised on the fly.
    pub fn badges(&self) -> Vec<Badge> {
        let state = self.read();
        Achievement::ALL
            .iter()
            .map(|achievement| display_badge(*achievement, &state.profile))
            .collect()
    }
}

fn replace_by_id<T: Identifiable>(items: &mut [T], item: T) -> bool {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}
