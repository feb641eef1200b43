use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    steampulse_db::health_check(&pool).await.unwrap();

    // Verify all four tables exist and start empty.
    let tables = [
        "games",
        "game_achievement_totals",
        "achievement_events",
        "webhook_targets",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The unique constraint backing the idempotent insert must exist with
/// the expected name (the API error mapping keys off the `uq_` prefix).
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_uniqueness_constraint_exists(pool: PgPool) {
    let count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM pg_constraint \
         WHERE conname = 'uq_achievement_events_user_app_key'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count.0, 1);
}
