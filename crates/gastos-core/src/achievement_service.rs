//! Achievement unlock rules.
//!
//! The catalog (titles, rewards) lives in `gastos-domain`. This module owns the
//! wiring table: the subset of achievements evaluated automatically after an
//! expense is logged. Budget Keeper and Savings Pro are catalogued but not wired;
//! they only unlock through [`AchievementService::unlock`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::info;

use gastos_domain::{Achievement, Expense, ExpenseCategory, UserProfile};

/// Number of receipts needed for the Receipt Scanner badge.
pub const RECEIPT_SCANNER_THRESHOLD: usize = 10;

/// Ledger state visible to unlock predicates.
pub struct RuleContext<'a> {
    pub profile: &'a UserProfile,
    pub expenses: &'a [Expense],
}

/// Pairs an achievement with the predicate that unlocks it.
pub struct AchievementRule {
    pub achievement: Achievement,
    pub predicate: fn(&RuleContext<'_>) -> bool,
}

static WIRED_RULES: [AchievementRule; 5] = [
    AchievementRule {
        achievement: Achievement::FirstExpense,
        predicate: is_first_expense,
    },
    AchievementRule {
        achievement: Achievement::WeekStreak,
        predicate: is_week_streak,
    },
    AchievementRule {
        achievement: Achievement::MonthStreak,
        predicate: is_month_streak,
    },
    AchievementRule {
        achievement: Achievement::ReceiptScanner,
        predicate: has_enough_receipts,
    },
    AchievementRule {
        achievement: Achievement::CategoryMaster,
        predicate: uses_every_category,
    },
];

fn is_first_expense(ctx: &RuleContext<'_>) -> bool {
    ctx.profile.total_expenses_logged == 1
}

fn is_week_streak(ctx: &RuleContext<'_>) -> bool {
    ctx.profile.current_streak >= 7
}

fn is_month_streak(ctx: &RuleContext<'_>) -> bool {
    ctx.profile.current_streak >= 30
}

fn has_enough_receipts(ctx: &RuleContext<'_>) -> bool {
    ctx.expenses.iter().filter(|e| e.has_receipt()).count() >= RECEIPT_SCANNER_THRESHOLD
}

fn uses_every_category(ctx: &RuleContext<'_>) -> bool {
    let used: BTreeSet<ExpenseCategory> = ctx.expenses.iter().map(|e| e.category).collect();
    used.len() >= ExpenseCategory::COUNT
}

pub struct AchievementService;

impl AchievementService {
    /// Rules evaluated after every logged expense.
    pub fn wired_rules() -> &'static [AchievementRule] {
        &WIRED_RULES
    }

    pub fn is_wired(achievement: Achievement) -> bool {
        WIRED_RULES.iter().any(|rule| rule.achievement == achievement)
    }

    /// Evaluates every wired rule against the current state and unlocks the ones
    /// that pass and are not yet in the profile.
    ///
    /// All predicates see the state from before this call; new badges are
    /// appended as one batch afterwards. Returns the achievements unlocked now.
    pub fn evaluate(
        profile: &mut UserProfile,
        expenses: &[Expense],
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        let unlocked: Vec<Achievement> = {
            let ctx = RuleContext {
                profile: &*profile,
                expenses,
            };
            WIRED_RULES
                .iter()
                .filter(|rule| !ctx.profile.has_badge(rule.achievement.title()))
                .filter(|rule| (rule.predicate)(&ctx))
                .map(|rule| rule.achievement)
                .collect()
        };

        let mut badges = Vec::with_capacity(unlocked.len());
        for achievement in &unlocked {
            badges.push(achievement.unlocked_badge(now));
            profile.total_points = profile.total_points.saturating_add(achievement.points());
            info!(
                achievement = achievement.title(),
                points = achievement.points(),
                "achievement unlocked"
            );
        }
        profile.badges.extend(badges);
        unlocked
    }

    /// Explicitly unlocks one achievement, wired or not.
    ///
    /// Returns `false` without awarding points when the badge is already present.
    pub fn unlock(profile: &mut UserProfile, achievement: Achievement, now: DateTime<Utc>) -> bool {
        if profile.has_badge(achievement.title()) {
            return false;
        }
        profile.badges.push(achievement.unlocked_badge(now));
        profile.total_points = profile.total_points.saturating_add(achievement.points());
        info!(
            achievement = achievement.title(),
            points = achievement.points(),
            "achievement unlocked manually"
        );
        true
    }
}
