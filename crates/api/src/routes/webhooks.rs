//! Webhook target registration.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::Deserialize;
use steampulse_core::error::CoreError;
use steampulse_db::models::webhook_target::WebhookTarget;
use steampulse_db::repositories::WebhookTargetRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for registering a delivery target.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterWebhook {
    #[validate(url(message = "Invalid URL"))]
    pub url: String,
}

/// POST /webhooks -- register a delivery target.
///
/// Re-registering an existing URL returns the existing row.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterWebhook>,
) -> AppResult<Json<WebhookTarget>> {
    payload
        .validate()
        .map_err(|_| CoreError::Validation("Invalid URL".to_string()))?;

    let target = WebhookTargetRepo::add(&state.pool, &payload.url).await?;
    Ok(Json(target))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(register))
}
