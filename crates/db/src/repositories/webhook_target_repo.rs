//! Repository for the `webhook_targets` table.

use sqlx::PgPool;

use crate::models::webhook_target::WebhookTarget;

/// Column list for `webhook_targets` queries.
const COLUMNS: &str = "id, url, created_at";

/// Provides registration and listing of webhook delivery targets.
pub struct WebhookTargetRepo;

impl WebhookTargetRepo {
    /// List all registered targets, oldest registration first.
    pub async fn list(pool: &PgPool) -> Result<Vec<WebhookTarget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM webhook_targets ORDER BY id");
        sqlx::query_as::<_, WebhookTarget>(&query)
            .fetch_all(pool)
            .await
    }

    /// Register a target URL if it is not already registered.
    ///
    /// Returns the existing row when the URL is already present, so
    /// registration is idempotent from the caller's perspective.
    pub async fn add(pool: &PgPool, url: &str) -> Result<WebhookTarget, sqlx::Error> {
        let insert = format!(
            "INSERT INTO webhook_targets (url) VALUES ($1) \
             ON CONFLICT (url) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, WebhookTarget>(&insert)
            .bind(url)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(target) => Ok(target),
            // The URL already exists; INSERT returned zero rows.
            None => {
                let select = format!("SELECT {COLUMNS} FROM webhook_targets WHERE url = $1");
                sqlx::query_as::<_, WebhookTarget>(&select)
                    .bind(url)
                    .fetch_one(pool)
                    .await
            }
        }
    }
}
