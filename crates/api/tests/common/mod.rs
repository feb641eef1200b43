//! Shared helpers for API integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the
//! same middleware stack production uses, with an in-memory fake
//! standing in for the Steam Web API.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use steampulse_api::config::ServerConfig;
use steampulse_api::router::build_app_router;
use steampulse_api::state::AppState;
use steampulse_core::types::AppId;
use steampulse_core::SyncConfig;
use steampulse_events::WebhookNotifier;
use steampulse_steam::{
    AchievementProvider, OwnedGame, PlayerAchievements, SteamAchievement, SteamError,
};

/// SteamID64 used by every test fixture.
pub const TEST_STEAM_USER: &str = "76561198000000000";

/// In-memory provider: a fixed library plus per-game achievement
/// fixtures.
#[derive(Default)]
pub struct FakeProvider {
    pub games: Vec<OwnedGame>,
    pub achievements: HashMap<AppId, Vec<SteamAchievement>>,
    pub fail_listing: bool,
}

impl FakeProvider {
    /// A library with one game (440) holding one unlocked achievement
    /// (`FIRST_WIN`).
    pub fn with_first_win() -> Self {
        Self {
            games: vec![OwnedGame {
                appid: 440,
                name: Some("Team Fortress 2".to_string()),
                playtime_forever: Some(6230),
            }],
            achievements: HashMap::from([(
                440,
                vec![SteamAchievement {
                    apiname: "FIRST_WIN".to_string(),
                    achieved: 1,
                    unlocktime: Some(1_690_000_000),
                }],
            )]),
            fail_listing: false,
        }
    }

    /// A provider whose owned-games listing always fails.
    pub fn failing() -> Self {
        Self {
            fail_listing: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl AchievementProvider for FakeProvider {
    async fn owned_games(&self) -> Result<Vec<OwnedGame>, SteamError> {
        if self.fail_listing {
            return Err(SteamError::Status {
                status: 503,
                body: "listing unavailable".to_string(),
            });
        }
        Ok(self.games.clone())
    }

    async fn player_achievements(
        &self,
        app_id: AppId,
    ) -> Result<PlayerAchievements, SteamError> {
        Ok(PlayerAchievements {
            steam_id: None,
            game_name: None,
            achievements: self.achievements.get(&app_id).cloned().unwrap_or_default(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults. Debug routes are
/// enabled so the debug endpoints are reachable in tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        enable_debug_routes: true,
    }
}

/// Build a test `SyncConfig` for the fixture account.
pub fn test_sync_config() -> SyncConfig {
    SyncConfig {
        steam_user_id: TEST_STEAM_USER.to_string(),
        max_games: 50,
        max_new_events: 50,
        poll_interval_secs: 60,
        poller_enabled: false,
    }
}

/// Build the application router with the default fake provider.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(FakeProvider::with_first_win()))
}

/// Build the application router with a specific provider.
pub fn build_test_app_with(pool: PgPool, provider: Arc<dyn AchievementProvider>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sync_config: Arc::new(test_sync_config()),
        provider,
        notifier: Arc::new(WebhookNotifier::new()),
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with an empty body.
pub async fn post(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
