//! Tracked game entity models.

use serde::Serialize;
use sqlx::FromRow;
use steampulse_core::types::{AppId, Timestamp};

/// A row from the `games` table. One row per game the tracked account
/// owns; refreshed on every sync cycle, never deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub app_id: AppId,
    pub name: Option<String>,
    pub playtime_forever: i64,
    pub updated_at: Timestamp,
}

/// Input for [`GameRepo::upsert`](crate::repositories::GameRepo::upsert),
/// derived from the Steam owned-games listing.
#[derive(Debug, Clone)]
pub struct UpsertGame {
    pub app_id: AppId,
    pub name: Option<String>,
    pub playtime_forever: i64,
}

/// A row from the `game_achievement_totals` table: how many achievement
/// definitions Steam currently reports for a game.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameAchievementTotal {
    pub app_id: AppId,
    pub total_achievements: i64,
    pub updated_at: Timestamp,
}
