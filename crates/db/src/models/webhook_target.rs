//! Webhook target entity model.

use serde::Serialize;
use sqlx::FromRow;
use steampulse_core::types::{DbId, Timestamp};

/// A row from the `webhook_targets` table: one registered delivery
/// endpoint. Registered over HTTP; read-only from the sync pipeline's
/// perspective.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebhookTarget {
    pub id: DbId,
    pub url: String,
    pub created_at: Timestamp,
}
