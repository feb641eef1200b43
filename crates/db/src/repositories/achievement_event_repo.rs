//! Repository for the `achievement_events` table.

use sqlx::PgPool;
use steampulse_core::types::DbId;

use crate::models::achievement_event::{AchievementEvent, NewAchievementEvent};

/// Column list for `achievement_events` queries.
const COLUMNS: &str =
    "id, steam_user_id, app_id, achievement_key, achievement_name, achieved_at, created_at";

/// Provides write and lookup operations for unlock events.
pub struct AchievementEventRepo;

impl AchievementEventRepo {
    /// Insert an unlock event unless the (steam_user_id, app_id,
    /// achievement_key) triple already exists.
    ///
    /// Returns `true` only when a new row was inserted. The
    /// `ON CONFLICT DO NOTHING` form makes the check-and-insert a
    /// single atomic statement, so concurrent or repeated calls with
    /// the same triple persist at most one row total.
    pub async fn insert_if_new(
        pool: &PgPool,
        event: &NewAchievementEvent,
    ) -> Result<bool, sqlx::Error> {
        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO achievement_events \
                (steam_user_id, app_id, achievement_key, achievement_name, achieved_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (steam_user_id, app_id, achievement_key) DO NOTHING \
             RETURNING id",
        )
        .bind(&event.steam_user_id)
        .bind(event.app_id)
        .bind(&event.achievement_key)
        .bind(&event.achievement_name)
        .bind(event.achieved_at)
        .fetch_optional(pool)
        .await?;
        Ok(inserted.is_some())
    }

    /// Count all stored events for an account.
    pub async fn count_for_user(pool: &PgPool, steam_user_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM achievement_events WHERE steam_user_id = $1")
            .bind(steam_user_id)
            .fetch_one(pool)
            .await
    }

    /// List all stored events for an account, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        steam_user_id: &str,
    ) -> Result<Vec<AchievementEvent>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM achievement_events WHERE steam_user_id = $1 ORDER BY id");
        sqlx::query_as::<_, AchievementEvent>(&query)
            .bind(steam_user_id)
            .fetch_all(pool)
            .await
    }
}
