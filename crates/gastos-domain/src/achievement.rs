//! Achievement catalog and the badge records that track unlock state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::Identifiable, profile::UserProfile};

/// Named milestones a user can reach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstExpense,
    WeekStreak,
    MonthStreak,
    BudgetKeeper,
    ReceiptScanner,
    CategoryMaster,
    SavingsPro,
}

/// Static catalog row describing an achievement and its reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub points: u32,
}

// Indexed by `Achievement as usize`.
static CATALOG: [AchievementDefinition; Achievement::COUNT] = [
    AchievementDefinition {
        title: "First Expense",
        description: "Logged your first expense",
        icon: "star.fill",
        points: 50,
    },
    AchievementDefinition {
        title: "Week Streak",
        description: "Logged expenses 7 days in a row",
        icon: "calendar.fill",
        points: 100,
    },
    AchievementDefinition {
        title: "Month Streak",
        description: "Logged expenses 30 days in a row",
        icon: "trophy.fill",
        points: 300,
    },
    AchievementDefinition {
        title: "Budget Keeper",
        description: "Stayed within budget for a whole month",
        icon: "checkmark.shield.fill",
        points: 250,
    },
    AchievementDefinition {
        title: "Receipt Scanner",
        description: "Scanned 10 receipts",
        icon: "camera.fill",
        points: 150,
    },
    AchievementDefinition {
        title: "Category Master",
        description: "Used every category",
        icon: "folder.fill",
        points: 200,
    },
    AchievementDefinition {
        title: "Savings Pro",
        description: "Saved more than 20% of your budget",
        icon: "banknote.fill",
        points: 500,
    },
];

impl Achievement {
    pub const COUNT: usize = 7;

    pub const ALL: [Achievement; Achievement::COUNT] = [
        Achievement::FirstExpense,
        Achievement::WeekStreak,
        Achievement::MonthStreak,
        Achievement::BudgetKeeper,
        Achievement::ReceiptScanner,
        Achievement::CategoryMaster,
        Achievement::SavingsPro,
    ];

    pub fn definition(self) -> &'static AchievementDefinition {
        &CATALOG[self as usize]
    }

    pub fn title(self) -> &'static str {
        self.definition().title
    }

    pub fn points(self) -> u32 {
        self.definition().points
    }

    /// Builds a fresh, locked badge from the catalog entry.
    pub fn locked_badge(self) -> Badge {
        let definition = self.definition();
        Badge::new(definition.title, definition.description, definition.icon)
    }

    /// Builds the badge record stored in the profile once this achievement unlocks.
    pub fn unlocked_badge(self, unlocked_at: DateTime<Utc>) -> Badge {
        let mut badge = self.locked_badge();
        badge.is_unlocked = true;
        badge.unlocked_date = Some(unlocked_at);
        badge
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Unlock-state record for an achievement. Titles are unique within a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Badge {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_unlocked: bool,
}

impl Badge {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            unlocked_date: None,
            is_unlocked: false,
        }
    }
}

impl Identifiable for Badge {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Projects an achievement onto the profile: the stored badge when one exists,
/// otherwise a locked badge synthesised from the catalog. Never mutates.
pub fn display_badge(achievement: Achievement, profile: &UserProfile) -> Badge {
    profile
        .badge(achievement.title())
        .cloned()
        .unwrap_or_else(|| achievement.locked_badge())
}
