//! REST client for the Steam Web API endpoints.
//!
//! Wraps `IPlayerService/GetOwnedGames` and
//! `ISteamUserStats/GetPlayerAchievements` using [`reqwest`].

use async_trait::async_trait;
use serde::Deserialize;
use steampulse_core::error::CoreError;
use steampulse_core::types::AppId;

use crate::AchievementProvider;

/// Production Steam Web API base URL.
const DEFAULT_BASE_URL: &str = "https://api.steampowered.com";

/// One game from the owned-games listing.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnedGame {
    /// Steam application id.
    pub appid: AppId,
    /// Display name; absent unless app info was requested.
    pub name: Option<String>,
    /// Lifetime playtime in minutes; the ranking metric for sync.
    pub playtime_forever: Option<i64>,
}

/// One achievement definition with its unlock state.
#[derive(Debug, Clone, Deserialize)]
pub struct SteamAchievement {
    /// Stable API name, unique within a game.
    pub apiname: String,
    /// `1` = unlocked, `0` = locked.
    pub achieved: i64,
    /// Unlock time in unix seconds; usually present when unlocked,
    /// but Steam reports `0` for some titles.
    pub unlocktime: Option<i64>,
}

impl SteamAchievement {
    /// Whether Steam marks this achievement as unlocked.
    pub fn is_unlocked(&self) -> bool {
        self.achieved == 1
    }
}

/// Parsed player-achievements response for one game.
#[derive(Debug, Clone)]
pub struct PlayerAchievements {
    pub steam_id: Option<String>,
    pub game_name: Option<String>,
    pub achievements: Vec<SteamAchievement>,
}

#[derive(Debug, Deserialize)]
struct GetOwnedGamesResponse {
    response: Option<OwnedGamesBody>,
}

#[derive(Debug, Deserialize)]
struct OwnedGamesBody {
    games: Option<Vec<OwnedGame>>,
}

#[derive(Debug, Deserialize)]
struct GetPlayerAchievementsResponse {
    playerstats: Option<PlayerStatsBody>,
}

#[derive(Debug, Deserialize)]
struct PlayerStatsBody {
    #[serde(rename = "steamID")]
    steam_id: Option<String>,
    #[serde(rename = "gameName")]
    game_name: Option<String>,
    achievements: Option<Vec<SteamAchievement>>,
    error: Option<String>,
}

/// Errors from the Steam Web API layer.
#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Steam returned a non-2xx status code.
    #[error("Steam API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Steam answered 200 but reported an application-level error
    /// (e.g. a private profile).
    #[error("Steam reported an error: {0}")]
    Api(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected Steam response: {0}")]
    Malformed(String),
}

/// HTTP client for the Steam Web API, scoped to one account.
pub struct SteamClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    steam_user_id: String,
}

impl SteamClient {
    /// Create a client for the given API key and SteamID64.
    pub fn new(api_key: String, steam_user_id: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key, steam_user_id)
    }

    /// Create a client against a non-default base URL (used by tests
    /// pointing at a local stub server).
    pub fn with_base_url(base_url: String, api_key: String, steam_user_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            steam_user_id,
        }
    }

    /// Build a client from `STEAM_API_KEY` and `STEAM_STEAMID64`.
    pub fn from_env() -> Result<Self, CoreError> {
        let api_key = require_env("STEAM_API_KEY")?;
        let steam_user_id = require_env("STEAM_STEAMID64")?;
        Ok(Self::new(api_key, steam_user_id))
    }

    /// SteamID64 this client is scoped to.
    pub fn steam_user_id(&self) -> &str {
        &self.steam_user_id
    }

    /// Fetch every game the account owns, including app info and
    /// played free games.
    pub async fn get_owned_games(&self) -> Result<Vec<OwnedGame>, SteamError> {
        let response = self
            .client
            .get(format!(
                "{}/IPlayerService/GetOwnedGames/v0001/",
                self.base_url
            ))
            .query(&[
                ("key", self.api_key.as_str()),
                ("steamid", self.steam_user_id.as_str()),
                ("include_appinfo", "1"),
                ("include_played_free_games", "1"),
            ])
            .send()
            .await?;

        let data: GetOwnedGamesResponse = Self::parse_response(response).await?;
        Ok(data.response.and_then(|r| r.games).unwrap_or_default())
    }

    /// Fetch the achievement state for one game.
    pub async fn get_player_achievements(
        &self,
        app_id: AppId,
    ) -> Result<PlayerAchievements, SteamError> {
        let response = self
            .client
            .get(format!(
                "{}/ISteamUserStats/GetPlayerAchievements/v0001/",
                self.base_url
            ))
            .query(&[
                ("appid", app_id.to_string().as_str()),
                ("key", self.api_key.as_str()),
                ("steamid", self.steam_user_id.as_str()),
            ])
            .send()
            .await?;

        let data: GetPlayerAchievementsResponse = Self::parse_response(response).await?;
        player_achievements_from(data)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`SteamError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SteamError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SteamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SteamError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AchievementProvider for SteamClient {
    async fn owned_games(&self) -> Result<Vec<OwnedGame>, SteamError> {
        self.get_owned_games().await
    }

    async fn player_achievements(
        &self,
        app_id: AppId,
    ) -> Result<PlayerAchievements, SteamError> {
        self.get_player_achievements(app_id).await
    }
}

/// Validate and flatten the player-achievements envelope.
fn player_achievements_from(
    data: GetPlayerAchievementsResponse,
) -> Result<PlayerAchievements, SteamError> {
    let stats = data
        .playerstats
        .ok_or_else(|| SteamError::Malformed("missing playerstats".to_string()))?;

    if let Some(error) = stats.error {
        return Err(SteamError::Api(error));
    }

    Ok(PlayerAchievements {
        steam_id: stats.steam_id,
        game_name: stats.game_name,
        achievements: stats.achievements.unwrap_or_default(),
    })
}

fn require_env(name: &str) -> Result<String, CoreError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::Configuration(format!("Missing {name} in environment")))
}
