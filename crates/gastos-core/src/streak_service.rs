//! Logging streaks, point totals, and level progression.

use chrono::{DateTime, Utc};
use tracing::debug;

use gastos_domain::{Expense, UserProfile};

use crate::window::{is_day_before, is_same_day};

/// Points awarded for every logged expense.
pub const BASE_POINTS_PER_EXPENSE: u32 = 10;

pub struct StreakService;

impl StreakService {
    /// Updates counters, points, streaks and level after an expense was appended.
    ///
    /// `expenses` must already contain the new expense as its last element. The
    /// "previous" expense is the one immediately before it in insertion order,
    /// not the most recent by date, so back-dated entries can break or extend a
    /// streak depending on when they were logged.
    pub fn record_expense_logged(profile: &mut UserProfile, expenses: &[Expense], now: DateTime<Utc>) {
        profile.total_expenses_logged += 1;
        profile.total_points = profile.total_points.saturating_add(BASE_POINTS_PER_EXPENSE);

        let previous = expenses.len().checked_sub(2).and_then(|idx| expenses.get(idx));
        match previous {
            Some(prior) if is_day_before(prior.date, now) => profile.current_streak += 1,
            Some(prior) if !is_same_day(prior.date, now) => profile.current_streak = 1,
            // Another entry today: the streak already counts this day.
            Some(_) => {}
            None => profile.current_streak = 1,
        }

        profile.longest_streak = profile.longest_streak.max(profile.current_streak);
        Self::refresh_level(profile);

        debug!(
            points = profile.total_points,
            streak = profile.current_streak,
            level = profile.level,
            "profile stats updated"
        );
    }

    /// Raises the level to match the point total. Never lowers it.
    pub fn refresh_level(profile: &mut UserProfile) {
        let level = UserProfile::level_for_points(profile.total_points);
        if level > profile.level {
            profile.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};
    use gastos_domain::ExpenseCategory;

    fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .single()
            .expect("unambiguous local noon")
            .with_timezone(&Utc)
    }

    fn log(profile: &mut UserProfile, expenses: &mut Vec<Expense>, date: DateTime<Utc>, now: DateTime<Utc>) {
        expenses.push(Expense::new(1.0, "entry", ExpenseCategory::Other, date));
        StreakService::record_expense_logged(profile, expenses, now);
    }

    #[test]
    fn first_expense_starts_streak_and_awards_base_points() {
        let now = local_noon(2024, 6, 12);
        let mut profile = UserProfile::new(now);
        let mut expenses = Vec::new();
        log(&mut profile, &mut expenses, now, now);
        assert_eq!(profile.total_expenses_logged, 1);
        assert_eq!(profile.total_points, BASE_POINTS_PER_EXPENSE);
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.longest_streak, 1);
    }

    #[test]
    fn same_day_entries_leave_streak_unchanged() {
        let now = local_noon(2024, 6, 12);
        let mut profile = UserProfile::new(now);
        let mut expenses = Vec::new();
        log(&mut profile, &mut expenses, now, now);
        log(&mut profile, &mut expenses, now, now + Duration::hours(1));
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.total_points, 2 * BASE_POINTS_PER_EXPENSE);
    }

    #[test]
    fn gap_resets_streak_but_keeps_longest() {
        let mut profile = UserProfile::new(local_noon(2024, 6, 1));
        let mut expenses = Vec::new();
        for day in 1..=3 {
            let now = local_noon(2024, 6, day);
            log(&mut profile, &mut expenses, now, now);
        }
        assert_eq!(profile.current_streak, 3);

        let later = local_noon(2024, 6, 10);
        log(&mut profile, &mut expenses, later, later);
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.longest_streak, 3);
    }

    #[test]
    fn previous_entry_is_taken_by_insertion_order() {
        let mut profile = UserProfile::new(local_noon(2024, 6, 1));
        let mut expenses = Vec::new();
        let yesterday = local_noon(2024, 6, 11);
        log(&mut profile, &mut expenses, yesterday, yesterday);

        // Back-dated entry logged today: previous insertion was yesterday, so the streak grows.
        let today = local_noon(2024, 6, 12);
        log(&mut profile, &mut expenses, local_noon(2024, 5, 1), today);
        assert_eq!(profile.current_streak, 2);

        // The next day, the entry right before in insertion order is dated 2024-05-01,
        // so the streak resets even though something was logged yesterday.
        let tomorrow = local_noon(2024, 6, 13);
        log(&mut profile, &mut expenses, tomorrow, tomorrow);
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.longest_streak, 2);
    }

    #[test]
    fn level_never_decreases() {
        let mut profile = UserProfile::new(Utc::now());
        profile.level = 5;
        profile.total_points = 100;
        StreakService::refresh_level(&mut profile);
        assert_eq!(profile.level, 5);

        profile.total_points = 6_000;
        StreakService::refresh_level(&mut profile);
        assert_eq!(profile.level, 7);
    }
}
