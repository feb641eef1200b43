//! Steam library summary endpoints.

use std::cmp::Reverse;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use steampulse_core::types::AppId;

use crate::error::AppResult;
use crate::state::AppState;

/// One game in the owned-games sample.
#[derive(Debug, Serialize)]
pub struct OwnedGameSample {
    pub appid: AppId,
    pub name: Option<String>,
    pub playtime_forever: i64,
}

/// Ranked summary of the account's library.
#[derive(Debug, Serialize)]
pub struct OwnedGamesSummary {
    pub total_owned: usize,
    /// How many games the configured ceiling would let a sync cycle
    /// process.
    pub returned: usize,
    /// The ten most-played games.
    pub sample: Vec<OwnedGameSample>,
}

/// GET /steam/owned-games -- ranked owned-games summary.
async fn owned_games(State(state): State<AppState>) -> AppResult<Json<OwnedGamesSummary>> {
    let mut games = state.provider.owned_games().await?;
    games.sort_by_key(|g| Reverse(g.playtime_forever.unwrap_or(0)));

    let max_games = state.sync_config.max_games;
    let returned = if max_games <= 0 {
        games.len()
    } else {
        games.len().min(max_games as usize)
    };

    let sample = games
        .iter()
        .take(10)
        .map(|g| OwnedGameSample {
            appid: g.appid,
            name: g.name.clone(),
            playtime_forever: g.playtime_forever.unwrap_or(0),
        })
        .collect();

    Ok(Json(OwnedGamesSummary {
        total_owned: games.len(),
        returned,
        sample,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/owned-games", get(owned_games))
}
