//! Steam Web API client for owned games and player achievements.
//!
//! [`SteamClient`] wraps the two read-only endpoints the sync pipeline
//! needs. The [`AchievementProvider`] trait is the seam the reconciler
//! and HTTP handlers depend on, so tests can substitute a fake
//! provider for the real client.

pub mod client;

pub use client::{
    OwnedGame, PlayerAchievements, SteamAchievement, SteamClient, SteamError,
};

use async_trait::async_trait;
use steampulse_core::types::AppId;

/// Read-only access to the external achievement provider.
///
/// Implemented by [`SteamClient`] for production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait AchievementProvider: Send + Sync {
    /// List every game the tracked account owns.
    async fn owned_games(&self) -> Result<Vec<OwnedGame>, SteamError>;

    /// Fetch the full achievement state for one game.
    async fn player_achievements(&self, app_id: AppId)
        -> Result<PlayerAchievements, SteamError>;
}
