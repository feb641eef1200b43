//! Dashboard read-model DTOs.
//!
//! All shapes in this module are produced by read-only queries in
//! [`DashboardRepo`](crate::repositories::DashboardRepo) and returned
//! as JSON by the dashboard endpoints.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use steampulse_core::types::{AppId, Timestamp};

/// Headline totals for the tracked account.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub steam_user_id: String,
    pub unique_games_with_unlocks: i64,
    pub total_unlocks: i64,
    pub unlocks_last_7_days: i64,
    pub last_unlocked_at: Option<Timestamp>,
    /// Rounded to one decimal.
    pub average_achievements_per_game: f64,
}

/// Unlock count for one UTC day bucket.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UnlocksByDayRow {
    pub day: NaiveDate,
    pub unlocks: i64,
}

/// Per-game unlock count, ordered by unlock count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameUnlockRow {
    pub app_id: AppId,
    pub name: Option<String>,
    pub unlocks: i64,
    pub last_unlocked_at: Option<Timestamp>,
}

/// One recently unlocked achievement.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentAchievementRow {
    pub achieved_at: Timestamp,
    pub app_id: AppId,
    pub game_name: Option<String>,
    pub achievement_key: String,
    pub achievement_name: Option<String>,
}

/// Per-game completion progress. `completion_percent` is `None` when no
/// achievement total has been recorded for the game yet.
#[derive(Debug, Clone, Serialize)]
pub struct GameProgressRow {
    pub app_id: AppId,
    pub game_name: Option<String>,
    pub unlocked_count: i64,
    pub total_achievements: Option<i64>,
    /// Rounded to one decimal.
    pub completion_percent: Option<f64>,
    pub last_unlocked_at: Option<Timestamp>,
}

/// Unlock count for one weekday (Europe/Oslo local time), Monday-first.
#[derive(Debug, Clone, Serialize)]
pub struct WeekdayRow {
    pub weekday: &'static str,
    pub achievements: i64,
}

/// The longest run of consecutive local dates with at least one unlock.
#[derive(Debug, Clone, Serialize)]
pub struct BestStreak {
    pub days: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub dates: Vec<NaiveDate>,
}

impl BestStreak {
    /// The empty streak, returned when no unlocks exist at all.
    pub fn empty() -> Self {
        Self {
            days: 0,
            start_date: None,
            end_date: None,
            dates: Vec::new(),
        }
    }
}

/// Unlock count and running total for one month bucket (Europe/Oslo).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CumulativeByMonthRow {
    /// `YYYY-MM`.
    pub month: String,
    pub achievements: i64,
    pub cumulative_achievements: i64,
}
