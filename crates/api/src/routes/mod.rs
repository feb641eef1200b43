pub mod dashboard;
pub mod debug;
pub mod health;
pub mod steam;
pub mod sync;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /webhooks                                    register target (POST)
///
/// /steam/owned-games                           ranked library summary
///
/// /sync                                        manual reconcile (POST)
/// /sync/deliver                                reconcile + send webhooks (POST)
///
/// /dashboard/summary                           headline totals + best streak
/// /dashboard/unlocks-by-day                    daily unlock counts
/// /dashboard/top-games                         most-unlocked games
/// /dashboard/recent-achievements               latest unlocks
/// /dashboard/games-unlocks                     per-game unlock counts
/// /dashboard/games-progress                    per-game completion progress
/// /dashboard/achievements-by-weekday           weekday histogram
/// /dashboard/cumulative-achievements-by-month  monthly running total
///
/// /debug/*                                     mounted only when ENABLE_DEBUG_ROUTES=true
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/webhooks", webhooks::router())
        .nest("/steam", steam::router())
        .nest("/sync", sync::router())
        .nest("/dashboard", dashboard::router())
}
