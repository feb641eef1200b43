//! Repository for the `games` table.

use sqlx::PgPool;
use steampulse_core::types::AppId;

use crate::models::game::{Game, UpsertGame};

/// Column list for `games` queries.
const COLUMNS: &str = "app_id, name, playtime_forever, updated_at";

/// Provides read/write operations for tracked games.
pub struct GameRepo;

impl GameRepo {
    /// Upsert basic game metadata from the owned-games listing.
    ///
    /// Name and playtime are refreshed unconditionally; last writer
    /// wins.
    pub async fn upsert(pool: &PgPool, input: &UpsertGame) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO games (app_id, name, playtime_forever, updated_at) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (app_id) DO UPDATE \
             SET name = EXCLUDED.name, \
                 playtime_forever = EXCLUDED.playtime_forever, \
                 updated_at = NOW()",
        )
        .bind(input.app_id)
        .bind(&input.name)
        .bind(input.playtime_forever)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a game by its Steam app id.
    pub async fn find(pool: &PgPool, app_id: AppId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE app_id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(app_id)
            .fetch_optional(pool)
            .await
    }
}
