use std::sync::Arc;

use steampulse_core::SyncConfig;
use steampulse_events::WebhookNotifier;
use steampulse_steam::AchievementProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: steampulse_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Sync pipeline configuration (account, ceilings, cadence).
    pub sync_config: Arc<SyncConfig>,
    /// Achievement provider. Trait object so tests can inject a fake.
    pub provider: Arc<dyn AchievementProvider>,
    /// Webhook delivery service.
    pub notifier: Arc<WebhookNotifier>,
}
