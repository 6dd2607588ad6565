//! Provides spending aggregation and budget comparison helpers over expense snapshots.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use gastos_domain::{Budget, BudgetPeriod, Expense, ExpenseCategory, Granularity, ReportPeriod};

use crate::window::{in_window, local_date};

const WARNING_RATIO: f64 = 0.7;
const CRITICAL_RATIO: f64 = 0.9;

/// How close a budget is to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetHealth {
    OnTrack,
    Warning,
    Critical,
}

impl BudgetHealth {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < WARNING_RATIO {
            BudgetHealth::OnTrack
        } else if ratio < CRITICAL_RATIO {
            BudgetHealth::Warning
        } else {
            BudgetHealth::Critical
        }
    }
}

/// Consumption of a single budget in the period containing "now".
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: f64,
    pub ratio: f64,
    /// Negative once spending has exceeded the limit.
    pub remaining: f64,
    pub health: BudgetHealth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Headline figures for a reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub period: ReportPeriod,
    pub total: f64,
    pub average_daily: f64,
    pub transaction_count: usize,
    pub categories_used: usize,
}

/// Criteria for listing expenses. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub search: Option<String>,
    pub category: Option<ExpenseCategory>,
}

/// Stateless aggregation utilities. Every function is a pure read.
pub struct AggregationService;

impl AggregationService {
    /// Sums every expense per category, ignoring dates.
    pub fn total_by_category(expenses: &[Expense]) -> BTreeMap<ExpenseCategory, f64> {
        let mut totals = BTreeMap::new();
        for expense in expenses {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        totals
    }

    pub fn total_in_window(
        expenses: &[Expense],
        granularity: Granularity,
        now: DateTime<Utc>,
    ) -> f64 {
        expenses
            .iter()
            .filter(|expense| in_window(expense.date, granularity, now))
            .map(|expense| expense.amount)
            .sum()
    }

    /// Spending in `category` during the `period` window containing `now`.
    ///
    /// The window is always anchored to `now`, never to a budget's start date.
    pub fn budget_consumed(
        expenses: &[Expense],
        category: ExpenseCategory,
        period: BudgetPeriod,
        now: DateTime<Utc>,
    ) -> f64 {
        expenses
            .iter()
            .filter(|expense| expense.category == category)
            .filter(|expense| in_window(expense.date, period.granularity(), now))
            .map(|expense| expense.amount)
            .sum()
    }

    /// `consumed / limit` clamped to `[0, 1]`; zero when the limit is not positive.
    pub fn budget_ratio(consumed: f64, limit: f64) -> f64 {
        if limit > 0.0 {
            (consumed / limit).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn budget_status(expenses: &[Expense], budget: &Budget, now: DateTime<Utc>) -> BudgetStatus {
        let spent = Self::budget_consumed(expenses, budget.category, budget.period, now);
        let ratio = Self::budget_ratio(spent, budget.limit);
        BudgetStatus {
            budget: budget.clone(),
            spent,
            ratio,
            remaining: budget.limit - spent,
            health: BudgetHealth::from_ratio(ratio),
        }
    }

    /// Category totals with their share of overall spending, largest first.
    pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryShare> {
        let totals = Self::total_by_category(expenses);
        let total: f64 = totals.values().sum();
        let mut shares: Vec<CategoryShare> = totals
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percentage: if total > 0.0 {
                    amount / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        shares
    }

    /// Per-day totals for expenses dated within the last `days` days up to `now`.
    pub fn daily_trend(expenses: &[Expense], now: DateTime<Utc>, days: i64) -> Vec<DailyTotal> {
        let start = now - Duration::days(days);
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for expense in expenses {
            if expense.date >= start && expense.date <= now {
                *totals.entry(local_date(expense.date)).or_insert(0.0) += expense.amount;
            }
        }
        totals
            .into_iter()
            .map(|(date, amount)| DailyTotal { date, amount })
            .collect()
    }

    pub fn count_in_window(expenses: &[Expense], granularity: Granularity, now: DateTime<Utc>) -> usize {
        expenses
            .iter()
            .filter(|expense| in_window(expense.date, granularity, now))
            .count()
    }

    pub fn categories_used_in_window(
        expenses: &[Expense],
        granularity: Granularity,
        now: DateTime<Utc>,
    ) -> usize {
        expenses
            .iter()
            .filter(|expense| in_window(expense.date, granularity, now))
            .map(|expense| expense.category)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn average_daily(total: f64, period: ReportPeriod) -> f64 {
        match period.days() {
            0 => 0.0,
            days => total / f64::from(days),
        }
    }

    pub fn period_report(expenses: &[Expense], period: ReportPeriod, now: DateTime<Utc>) -> PeriodReport {
        let granularity = period.granularity();
        let total = Self::total_in_window(expenses, granularity, now);
        PeriodReport {
            period,
            total,
            average_daily: Self::average_daily(total, period),
            transaction_count: Self::count_in_window(expenses, granularity, now),
            categories_used: Self::categories_used_in_window(expenses, granularity, now),
        }
    }

    /// Category with the largest all-time total.
    pub fn most_used_category(expenses: &[Expense]) -> Option<ExpenseCategory> {
        Self::total_by_category(expenses)
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(category, _)| category)
    }

    /// Expenses matching `filter`, newest first.
    pub fn filter_expenses(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);
        let mut matches: Vec<Expense> = expenses
            .iter()
            .filter(|expense| filter.category.map_or(true, |c| expense.category == c))
            .filter(|expense| {
                needle
                    .as_deref()
                    .map_or(true, |n| expense.description.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .single()
            .expect("unambiguous local noon")
            .with_timezone(&Utc)
    }

    fn expense(amount: f64, category: ExpenseCategory, date: DateTime<Utc>) -> Expense {
        Expense::new(amount, "item", category, date)
    }

    #[test]
    fn empty_ledger_yields_zeroes() {
        let now = local_noon(2024, 6, 12);
        assert!(AggregationService::total_by_category(&[]).is_empty());
        assert_eq!(AggregationService::total_in_window(&[], Granularity::Month, now), 0.0);
        assert_eq!(
            AggregationService::budget_consumed(&[], ExpenseCategory::Food, BudgetPeriod::Daily, now),
            0.0
        );
        assert!(AggregationService::most_used_category(&[]).is_none());
    }

    #[test]
    fn budget_ratio_is_clamped_and_guarded() {
        assert_eq!(AggregationService::budget_ratio(12.5, 100.0), 0.125);
        assert_eq!(AggregationService::budget_ratio(500.0, 100.0), 1.0);
        assert_eq!(AggregationService::budget_ratio(50.0, 0.0), 0.0);
        assert_eq!(AggregationService::budget_ratio(50.0, -10.0), 0.0);
    }

    #[test]
    fn budget_consumed_filters_by_category_and_window() {
        let now = local_noon(2024, 6, 12);
        let expenses = vec![
            expense(10.0, ExpenseCategory::Food, local_noon(2024, 6, 12)),
            expense(5.0, ExpenseCategory::Food, local_noon(2024, 6, 3)),
            expense(7.0, ExpenseCategory::Food, local_noon(2024, 5, 30)),
            expense(99.0, ExpenseCategory::Health, local_noon(2024, 6, 12)),
        ];
        let monthly = AggregationService::budget_consumed(
            &expenses,
            ExpenseCategory::Food,
            BudgetPeriod::Monthly,
            now,
        );
        assert_eq!(monthly, 15.0);
        let weekly = AggregationService::budget_consumed(
            &expenses,
            ExpenseCategory::Food,
            BudgetPeriod::Weekly,
            now,
        );
        assert_eq!(weekly, 10.0);
    }

    #[test]
    fn budget_status_reports_health_bands() {
        let now = local_noon(2024, 6, 12);
        let budget = Budget::new(ExpenseCategory::Shopping, 100.0, BudgetPeriod::Monthly, now);
        let expenses = vec![expense(80.0, ExpenseCategory::Shopping, now)];
        let status = AggregationService::budget_status(&expenses, &budget, now);
        assert_eq!(status.spent, 80.0);
        assert_eq!(status.remaining, 20.0);
        assert_eq!(status.health, BudgetHealth::Warning);

        let over = vec![expense(150.0, ExpenseCategory::Shopping, now)];
        let status = AggregationService::budget_status(&over, &budget, now);
        assert_eq!(status.ratio, 1.0);
        assert_eq!(status.remaining, -50.0);
        assert_eq!(status.health, BudgetHealth::Critical);
    }

    #[test]
    fn breakdown_is_sorted_and_conserves_total() {
        let now = local_noon(2024, 6, 12);
        let expenses = vec![
            expense(30.0, ExpenseCategory::Food, now),
            expense(50.0, ExpenseCategory::Transport, now),
            expense(20.0, ExpenseCategory::Food, now),
        ];
        let shares = AggregationService::category_breakdown(&expenses);
        assert_eq!(shares[0].category, ExpenseCategory::Food);
        assert_eq!(shares[0].amount, 50.0);
        let percent: f64 = shares.iter().map(|share| share.percentage).sum();
        assert!((percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn daily_trend_groups_by_local_day() {
        let now = local_noon(2024, 6, 12);
        let expenses = vec![
            expense(1.0, ExpenseCategory::Food, local_noon(2024, 6, 10)),
            expense(2.0, ExpenseCategory::Food, local_noon(2024, 6, 10)),
            expense(4.0, ExpenseCategory::Food, local_noon(2024, 6, 12)),
            expense(8.0, ExpenseCategory::Food, local_noon(2024, 4, 1)),
        ];
        let trend = AggregationService::daily_trend(&expenses, now, 30);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].amount, 3.0);
        assert_eq!(trend[1].amount, 4.0);
        assert!(trend[0].date < trend[1].date);
    }

    #[test]
    fn period_report_counts_transactions_and_categories() {
        let now = local_noon(2024, 6, 12);
        let expenses = vec![
            expense(14.0, ExpenseCategory::Food, local_noon(2024, 6, 11)),
            expense(7.0, ExpenseCategory::Health, local_noon(2024, 6, 12)),
            expense(100.0, ExpenseCategory::Health, local_noon(2024, 5, 1)),
        ];
        let report = AggregationService::period_report(&expenses, ReportPeriod::Week, now);
        assert_eq!(report.total, 21.0);
        assert_eq!(report.average_daily, 3.0);
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.categories_used, 2);
    }

    #[test]
    fn filter_sorts_newest_first_and_matches_case_insensitively() {
        let mut coffee = expense(3.0, ExpenseCategory::Food, local_noon(2024, 6, 1));
        coffee.description = "Morning Coffee".into();
        let mut bus = expense(2.0, ExpenseCategory::Transport, local_noon(2024, 6, 5));
        bus.description = "Bus ticket".into();
        let mut beans = expense(9.0, ExpenseCategory::Food, local_noon(2024, 6, 3));
        beans.description = "coffee beans".into();
        let expenses = vec![coffee, bus, beans];

        let all = AggregationService::filter_expenses(&expenses, &ExpenseFilter::default());
        assert_eq!(all[0].description, "Bus ticket");

        let filter = ExpenseFilter {
            search: Some("COFFEE".into()),
            category: Some(ExpenseCategory::Food),
        };
        let hits = AggregationService::filter_expenses(&expenses, &filter);
        let names: Vec<_> = hits.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["coffee beans", "Morning Coffee"]);
    }
}
