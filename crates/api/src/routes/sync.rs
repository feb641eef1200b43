//! Manual sync triggers.
//!
//! `POST /sync` runs one reconciliation pass and returns its summary;
//! `POST /sync/deliver` additionally fans the new events out to the
//! registered webhook targets, mirroring one poller cycle on demand.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::Serialize;
use steampulse_core::types::AppId;
use steampulse_events::DeliveryReport;
use steampulse_sync::{run_sync, SyncSummary};

use crate::error::AppResult;
use crate::state::AppState;

/// Delivery reports for one event, keyed by what was unlocked.
#[derive(Debug, Serialize)]
pub struct EventDeliveries {
    pub app_id: AppId,
    pub achievement_key: String,
    pub deliveries: Vec<DeliveryReport>,
}

/// Response for `POST /sync/deliver`.
#[derive(Debug, Serialize)]
pub struct SyncAndDeliverResponse {
    pub summary: SyncSummary,
    pub webhooks_sent_for_events: usize,
    /// Per-event delivery reports, capped at 10 events.
    pub deliveries_sample: Vec<EventDeliveries>,
}

/// POST /sync -- run one reconciliation pass.
async fn trigger_sync(State(state): State<AppState>) -> AppResult<Json<SyncSummary>> {
    let summary = run_sync(&state.pool, state.provider.as_ref(), &state.sync_config).await?;
    Ok(Json(summary))
}

/// POST /sync/deliver -- reconcile, then send webhooks for the new
/// events.
async fn trigger_sync_and_deliver(
    State(state): State<AppState>,
) -> AppResult<Json<SyncAndDeliverResponse>> {
    let summary = run_sync(&state.pool, state.provider.as_ref(), &state.sync_config).await?;

    let mut deliveries_sample = Vec::new();
    for event in &summary.new_events_sample {
        let deliveries = state
            .notifier
            .send_achievement_event(&state.pool, event)
            .await?;
        if deliveries_sample.len() < 10 {
            deliveries_sample.push(EventDeliveries {
                app_id: event.app_id,
                achievement_key: event.achievement_key.clone(),
                deliveries,
            });
        }
    }

    let webhooks_sent_for_events = summary.new_events_sample.len();
    Ok(Json(SyncAndDeliverResponse {
        summary,
        webhooks_sent_for_events,
        deliveries_sample,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(trigger_sync))
        .route("/deliver", post(trigger_sync_and_deliver))
}
