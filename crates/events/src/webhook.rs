//! Webhook fan-out for unlock events.
//!
//! [`WebhookNotifier`] posts a JSON payload to every registered target
//! concurrently and collects one [`DeliveryReport`] per target. A
//! target that cannot be reached produces a failed report entry; it
//! never aborts the other deliveries. There is exactly one attempt per
//! event and target (no retries) and no request timeout beyond the
//! transport defaults.

use futures::future;
use serde::Serialize;
use steampulse_core::types::DbId;
use steampulse_db::models::achievement_event::NewAchievementEvent;
use steampulse_db::models::webhook_target::WebhookTarget;
use steampulse_db::repositories::WebhookTargetRepo;
use steampulse_db::DbPool;

/// Outcome of one delivery attempt to one target.
///
/// `ok` reflects transport-level success only: a non-2xx response from
/// the target still yields `ok: true` with that status code. Transport
/// failures (unreachable host, malformed URL) yield `ok: false` with a
/// description.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryReport {
    fn delivered(target_id: DbId, url: String, status: u16) -> Self {
        Self {
            ok: true,
            target_id: Some(target_id),
            url: Some(url),
            status: Some(status),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            ok: false,
            target_id: None,
            url: None,
            status: None,
            error: Some(error),
        }
    }
}

/// Delivers unlock events to registered webhook targets.
pub struct WebhookNotifier {
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier with a default HTTP client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Build the JSON payload delivered for one unlock event.
    pub fn achievement_payload(event: &NewAchievementEvent) -> serde_json::Value {
        serde_json::json!({
            "event_type": "achievement_unlocked",
            "steam_user_id": event.steam_user_id,
            "app_id": event.app_id,
            "achievement_key": event.achievement_key,
            "achievement_name": event.achievement_name,
            "achieved_at": event.achieved_at,
        })
    }

    /// Deliver one unlock event to every registered target.
    ///
    /// Fails only when the target listing itself fails; delivery
    /// outcomes are data, not errors.
    pub async fn send_achievement_event(
        &self,
        pool: &DbPool,
        event: &NewAchievementEvent,
    ) -> Result<Vec<DeliveryReport>, sqlx::Error> {
        let targets = WebhookTargetRepo::list(pool).await?;
        let payload = Self::achievement_payload(event);
        Ok(self.deliver_to_all(&targets, &payload).await)
    }

    /// POST the payload to all targets concurrently and await every
    /// attempt. Report order matches target order.
    pub async fn deliver_to_all(
        &self,
        targets: &[WebhookTarget],
        payload: &serde_json::Value,
    ) -> Vec<DeliveryReport> {
        let attempts = targets.iter().map(|target| self.deliver(target, payload));
        future::join_all(attempts).await
    }

    /// Execute a single POST request against one target.
    async fn deliver(&self, target: &WebhookTarget, payload: &serde_json::Value) -> DeliveryReport {
        match self.client.post(&target.url).json(payload).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                DeliveryReport::delivered(target.id, target.url.clone(), status)
            }
            Err(e) => {
                tracing::warn!(
                    target_id = target.id,
                    url = %target.url,
                    error = %e,
                    "Webhook delivery failed"
                );
                DeliveryReport::failed(e.to_string())
            }
        }
    }
}

impl Default for WebhookNotifier {
    fn default() -> Self {
        Self::new()
    }
}
