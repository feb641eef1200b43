//! Integration tests for the manual sync triggers, including the full
//! reconcile-then-deliver path against a local webhook receiver.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post as axum_post;
use axum::{Json, Router};
use common::{body_json, post, post_json, FakeProvider};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn manual_sync_discovers_the_unlock_once(pool: PgPool) {
    let response = post(common::build_test_app(pool.clone()), "/api/v1/sync").await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await;
    assert_eq!(summary["games_considered"], 1);
    assert_eq!(summary["games_processed"], 1);
    assert_eq!(summary["new_unlocks_inserted"], 1);
    assert_eq!(
        summary["new_events_sample"][0]["achievement_key"],
        "FIRST_WIN"
    );

    // Identical provider state on the second run: nothing new.
    let response = post(common::build_test_app(pool), "/api/v1/sync").await;
    let summary = body_json(response).await;
    assert_eq!(summary["new_unlocks_inserted"], 0);
    assert_eq!(summary["new_events_sample"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_listing_maps_to_bad_gateway(pool: PgPool) {
    let app = common::build_test_app_with(pool, Arc::new(FakeProvider::failing()));
    let response = post(app, "/api/v1/sync").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

/// Start a local webhook receiver that accepts everything. Returns its
/// base URL.
async fn start_receiver() -> String {
    let app = Router::new().route(
        "/hook",
        axum_post(|Json(_): Json<serde_json::Value>| async { StatusCode::OK }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sync_and_deliver_sends_webhooks_for_new_events(pool: PgPool) {
    let receiver = start_receiver().await;

    // Register the receiver as a target first.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/webhooks",
        json!({"url": format!("{receiver}/hook")}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post(common::build_test_app(pool.clone()), "/api/v1/sync/deliver").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["summary"]["new_unlocks_inserted"], 1);
    assert_eq!(body["webhooks_sent_for_events"], 1);

    let deliveries = &body["deliveries_sample"][0];
    assert_eq!(deliveries["app_id"], 440);
    assert_eq!(deliveries["achievement_key"], "FIRST_WIN");
    assert_eq!(deliveries["deliveries"][0]["ok"], true);
    assert_eq!(deliveries["deliveries"][0]["status"], 200);

    // A repeat delivers nothing: the unlock is already stored.
    let response = post(common::build_test_app(pool), "/api/v1/sync/deliver").await;
    let body = body_json(response).await;
    assert_eq!(body["webhooks_sent_for_events"], 0);
    assert_eq!(body["deliveries_sample"], json!([]));
}
