//! Repository for the `game_achievement_totals` table.

use sqlx::PgPool;
use steampulse_core::types::AppId;

use crate::models::game::GameAchievementTotal;

/// Provides the achievement-definition count per game, refreshed on
/// every successful per-game fetch.
pub struct GameTotalRepo;

impl GameTotalRepo {
    /// Upsert the total number of achievement definitions for a game.
    pub async fn upsert(pool: &PgPool, app_id: AppId, total: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO game_achievement_totals (app_id, total_achievements, updated_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (app_id) DO UPDATE \
             SET total_achievements = EXCLUDED.total_achievements, \
                 updated_at = NOW()",
        )
        .bind(app_id)
        .bind(total)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find the recorded total for a game.
    pub async fn find(
        pool: &PgPool,
        app_id: AppId,
    ) -> Result<Option<GameAchievementTotal>, sqlx::Error> {
        sqlx::query_as::<_, GameAchievementTotal>(
            "SELECT app_id, total_achievements, updated_at \
             FROM game_achievement_totals WHERE app_id = $1",
        )
        .bind(app_id)
        .fetch_optional(pool)
        .await
    }
}
