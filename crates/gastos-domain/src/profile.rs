//! Gamification state for the single local user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievement::Badge;

pub const POINTS_PER_LEVEL: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub total_points: u32,
    #[serde(default = "UserProfile::initial_level")]
    pub level: u32,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub total_expenses_logged: u32,
    pub join_date: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(join_date: DateTime<Utc>) -> Self {
        Self {
            total_points: 0,
            level: Self::initial_level(),
            badges: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            total_expenses_logged: 0,
            join_date,
        }
    }

    pub fn initial_level() -> u32 {
        1
    }

    /// Level reached with `points`: one level per thousand points, starting at 1.
    pub fn level_for_points(points: u32) -> u32 {
        points / POINTS_PER_LEVEL + 1
    }

    /// Points earned inside the current level.
    pub fn experience_points(&self) -> u32 {
        self.total_points % POINTS_PER_LEVEL
    }

    pub fn next_level_points(&self) -> u32 {
        POINTS_PER_LEVEL
    }

    /// Fraction of the current level completed, in `[0, 1)`.
    pub fn level_progress(&self) -> f64 {
        f64::from(self.experience_points()) / f64::from(self.next_level_points())
    }

    pub fn badge(&self, title: &str) -> Option<&Badge> {
        self.badges.iter().find(|badge| badge.title == title)
    }

    pub fn has_badge(&self, title: &str) -> bool {
        self.badge(title).is_some()
    }

    pub fn unlocked_badge_count(&self) -> usize {
        self.badges.iter().filter(|badge| badge.is_unlocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_math_follows_thousand_point_tiers() {
        assert_eq!(UserProfile::level_for_points(0), 1);
        assert_eq!(UserProfile::level_for_points(999), 1);
        assert_eq!(UserProfile::level_for_points(1000), 2);
        assert_eq!(UserProfile::level_for_points(2560), 3);

        let mut profile = UserProfile::new(Utc::now());
        profile.total_points = 1250;
        assert_eq!(profile.experience_points(), 250);
        assert!((profile.level_progress() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn sparse_profile_documents_fill_defaults() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"join_date":"2024-01-01T00:00:00Z"}"#).expect("parse");
        assert_eq!(profile.level, 1);
        assert_eq!(profile.total_points, 0);
        assert!(profile.badges.is_empty());
    }
}
