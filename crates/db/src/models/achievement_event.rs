//! Unlock event entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use steampulse_core::types::{AppId, DbId, Timestamp};

/// A row from the `achievement_events` table. Created exactly once per
/// (steam_user_id, app_id, achievement_key) triple; never updated or
/// deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AchievementEvent {
    pub id: DbId,
    pub steam_user_id: String,
    pub app_id: AppId,
    pub achievement_key: String,
    pub achievement_name: Option<String>,
    pub achieved_at: Timestamp,
    pub created_at: Timestamp,
}

/// A candidate unlock event, before the idempotent insert decides
/// whether it is genuinely new.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAchievementEvent {
    pub steam_user_id: String,
    pub app_id: AppId,
    pub achievement_key: String,
    pub achievement_name: Option<String>,
    pub achieved_at: Timestamp,
}
