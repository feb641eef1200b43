//! Debug-only routes, mounted when `ENABLE_DEBUG_ROUTES=true`.
//!
//! `/receiver` is a local webhook sink for testing deliveries end to
//! end; `/seed` inserts a deterministic event and sends webhooks for
//! it.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use chrono::Utc;
use serde::Serialize;
use steampulse_db::models::achievement_event::NewAchievementEvent;
use steampulse_db::repositories::AchievementEventRepo;
use steampulse_events::DeliveryReport;

use crate::error::AppResult;
use crate::state::AppState;

/// Response for `POST /debug/seed`.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub inserted: bool,
    pub deliveries: Vec<DeliveryReport>,
}

/// POST /debug/receiver -- log the payload and acknowledge.
async fn receiver(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    tracing::info!(payload = %body, "Webhook received");
    Json(serde_json::json!({ "ok": true }))
}

/// POST /debug/seed -- insert a deterministic unlock event and deliver
/// webhooks for it. Re-seeding is a no-op thanks to the idempotent
/// insert.
async fn seed(State(state): State<AppState>) -> AppResult<Json<SeedResponse>> {
    let event = NewAchievementEvent {
        steam_user_id: "demo-user".to_string(),
        app_id: 440,
        achievement_key: "FIRST_WIN".to_string(),
        achievement_name: Some("First Win".to_string()),
        achieved_at: Utc::now(),
    };

    let inserted = AchievementEventRepo::insert_if_new(&state.pool, &event).await?;
    if !inserted {
        return Ok(Json(SeedResponse {
            inserted: false,
            deliveries: Vec::new(),
        }));
    }

    let deliveries = state
        .notifier
        .send_achievement_event(&state.pool, &event)
        .await?;
    Ok(Json(SeedResponse {
        inserted: true,
        deliveries,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/receiver", post(receiver))
        .route("/seed", post(seed))
}
