//! Integration tests for webhook target registration.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn registers_a_valid_target(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/webhooks",
        json!({"url": "https://hooks.example.com/steam"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let target = body_json(response).await;
    assert!(target["id"].is_i64());
    assert_eq!(target["url"], "https://hooks.example.com/steam");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn re_registering_returns_the_existing_row(pool: PgPool) {
    let url = json!({"url": "https://hooks.example.com/steam"});

    let first = post_json(common::build_test_app(pool.clone()), "/api/v1/webhooks", url.clone())
        .await;
    let first = body_json(first).await;

    let second = post_json(common::build_test_app(pool), "/api/v1/webhooks", url).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;

    assert_eq!(first["id"], second["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejects_an_invalid_url(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/webhooks", json!({"url": "not a url"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejects_a_missing_url_field(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/webhooks", json!({})).await;

    // Axum's Json extractor rejects the malformed body before the
    // handler runs.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
