//! One reconciliation pass over the tracked account's library.
//!
//! Fetches the owned-games listing, walks the most-played games up to
//! the configured ceiling, and inserts unlock events the store has not
//! seen before. Every per-game failure (Steam or store) is contained
//! to that game; only the root owned-games listing can abort the run.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Serialize;
use steampulse_core::error::CoreError;
use steampulse_core::types::{AppId, Timestamp};
use steampulse_core::SyncConfig;
use steampulse_db::models::achievement_event::NewAchievementEvent;
use steampulse_db::models::game::UpsertGame;
use steampulse_db::repositories::{AchievementEventRepo, GameRepo, GameTotalRepo};
use steampulse_db::DbPool;
use steampulse_steam::{AchievementProvider, OwnedGame, SteamError};

/// Cap on the failing-app-id sample collected per run.
const FAILED_APP_IDS_CAP: usize = 20;

/// Cap on the per-game inserted-count sample collected per run.
const PER_GAME_SAMPLE_CAP: usize = 10;

/// Inserted-event count for one game, collected into the per-game
/// sample.
#[derive(Debug, Clone, Serialize)]
pub struct PerAppInserted {
    pub app_id: AppId,
    pub inserted: usize,
}

/// Statistics for one reconciliation run. In-memory only; the
/// new-events sample drives webhook notification and the rest feeds
/// the manual-sync response and cycle logging.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    /// Configured ceiling (<= 0 means unlimited).
    pub max_games: i64,
    /// Number of games actually selected after applying the ceiling.
    pub effective_max_games: usize,
    /// Size of the full owned-games listing.
    pub games_considered: usize,
    /// Games attempted, including ones that later failed.
    pub games_processed: usize,
    /// Per-game fetch/store failures.
    pub api_failures: usize,
    /// App ids of failing games, capped at 20.
    pub failed_app_ids_sample: Vec<AppId>,
    /// Total newly inserted unlock events. Never capped.
    pub new_unlocks_inserted: usize,
    /// Per-game inserted counts, capped at 10 games.
    pub new_unlocks_per_app_sample: Vec<PerAppInserted>,
    /// The new events themselves, capped at the configured maximum.
    pub new_events_sample: Vec<NewAchievementEvent>,
}

impl SyncSummary {
    fn new(config: &SyncConfig, games_considered: usize, effective_max_games: usize) -> Self {
        Self {
            max_games: config.max_games,
            effective_max_games,
            games_considered,
            games_processed: 0,
            api_failures: 0,
            failed_app_ids_sample: Vec::new(),
            new_unlocks_inserted: 0,
            new_unlocks_per_app_sample: Vec::new(),
            new_events_sample: Vec::new(),
        }
    }
}

/// Failures that abort a whole reconciliation run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The tracked account is not configured.
    #[error(transparent)]
    Config(#[from] CoreError),

    /// The root owned-games listing failed; nothing downstream is
    /// meaningful without it.
    #[error("Owned-games listing failed: {0}")]
    OwnedGames(#[from] SteamError),
}

/// Failures contained to a single game.
#[derive(Debug, thiserror::Error)]
enum GameSyncError {
    #[error(transparent)]
    Steam(#[from] SteamError),

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Run one reconciliation pass for the configured account.
///
/// Returns the run summary; fails only on a missing account or a
/// failed owned-games listing.
pub async fn run_sync(
    pool: &DbPool,
    provider: &dyn AchievementProvider,
    config: &SyncConfig,
) -> Result<SyncSummary, SyncError> {
    if config.steam_user_id.is_empty() {
        return Err(CoreError::Configuration("No Steam account configured".to_string()).into());
    }

    let mut games = provider.owned_games().await?;
    rank_by_playtime(&mut games);

    let selected = &games[..ceiling_len(games.len(), config.max_games)];
    let mut summary = SyncSummary::new(config, games.len(), selected.len());

    for game in selected {
        summary.games_processed += 1;
        if let Err(e) = sync_game(pool, provider, config, &mut summary, game).await {
            summary.api_failures += 1;
            if summary.failed_app_ids_sample.len() < FAILED_APP_IDS_CAP {
                summary.failed_app_ids_sample.push(game.appid);
            }
            tracing::warn!(app_id = game.appid, error = %e, "Game sync failed, skipping");
        }
    }

    Ok(summary)
}

/// Sync a single game: refresh its metadata and achievement total,
/// then insert any unlock events the store has not seen.
///
/// Any error here is caught by the caller and charged to this game
/// only. Events inserted before the error are kept.
async fn sync_game(
    pool: &DbPool,
    provider: &dyn AchievementProvider,
    config: &SyncConfig,
    summary: &mut SyncSummary,
    game: &OwnedGame,
) -> Result<(), GameSyncError> {
    GameRepo::upsert(
        pool,
        &UpsertGame {
            app_id: game.appid,
            name: game.name.clone(),
            playtime_forever: game.playtime_forever.unwrap_or(0),
        },
    )
    .await?;

    let stats = provider.player_achievements(game.appid).await?;
    GameTotalRepo::upsert(pool, game.appid, stats.achievements.len() as i64).await?;

    let mut inserted_for_game = 0usize;
    for achievement in stats.achievements.iter().filter(|a| a.is_unlocked()) {
        let event = NewAchievementEvent {
            steam_user_id: config.steam_user_id.clone(),
            app_id: game.appid,
            achievement_key: achievement.apiname.clone(),
            // TODO: enrich display names via the GetSchemaForGame endpoint.
            achievement_name: Some(achievement.apiname.clone()),
            achieved_at: unlock_timestamp(achievement.unlocktime),
        };

        if AchievementEventRepo::insert_if_new(pool, &event).await? {
            summary.new_unlocks_inserted += 1;
            inserted_for_game += 1;
            if summary.new_events_sample.len() < config.max_new_events {
                summary.new_events_sample.push(event);
            }
        }
    }

    if inserted_for_game > 0 && summary.new_unlocks_per_app_sample.len() < PER_GAME_SAMPLE_CAP {
        summary.new_unlocks_per_app_sample.push(PerAppInserted {
            app_id: game.appid,
            inserted: inserted_for_game,
        });
    }

    Ok(())
}

/// Sort most-played first. The sort is stable, so provider order is
/// kept for equal playtimes.
fn rank_by_playtime(games: &mut [OwnedGame]) {
    games.sort_by_key(|g| Reverse(g.playtime_forever.unwrap_or(0)));
}

/// Number of games to process under the configured ceiling.
fn ceiling_len(total: usize, max_games: i64) -> usize {
    if max_games <= 0 {
        total
    } else {
        total.min(max_games as usize)
    }
}

/// Unlock timestamp from Steam's unix-seconds field, falling back to
/// the time of processing when Steam reports nothing (or zero, which
/// some titles do even for unlocked achievements).
fn unlock_timestamp(unlocktime: Option<i64>) -> Timestamp {
    match unlocktime {
        Some(secs) if secs > 0 => DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now),
        _ => Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(appid: AppId, playtime: Option<i64>) -> OwnedGame {
        OwnedGame {
            appid,
            name: None,
            playtime_forever: playtime,
        }
    }

    #[test]
    fn ranking_is_most_played_first() {
        let mut games = vec![game(1, Some(10)), game(2, Some(300)), game(3, None)];
        rank_by_playtime(&mut games);
        let order: Vec<AppId> = games.iter().map(|g| g.appid).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn ranking_treats_missing_playtime_as_zero() {
        let mut games = vec![game(1, None), game(2, Some(0))];
        rank_by_playtime(&mut games);
        // Stable sort: equal keys keep provider order.
        let order: Vec<AppId> = games.iter().map(|g| g.appid).collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn ceiling_takes_a_prefix() {
        assert_eq!(ceiling_len(100, 10), 10);
        assert_eq!(ceiling_len(5, 10), 5);
    }

    #[test]
    fn zero_or_negative_ceiling_means_unlimited() {
        assert_eq!(ceiling_len(100, 0), 100);
        assert_eq!(ceiling_len(100, -1), 100);
    }

    #[test]
    fn unlock_timestamp_uses_provider_seconds() {
        let ts = unlock_timestamp(Some(1_690_000_000));
        assert_eq!(ts.timestamp(), 1_690_000_000);
    }

    #[test]
    fn unlock_timestamp_falls_back_to_now() {
        let before = Utc::now();
        let ts = unlock_timestamp(None);
        let zero = unlock_timestamp(Some(0));
        let after = Utc::now();
        assert!(ts >= before && ts <= after);
        assert!(zero >= before && zero <= after);
    }
}
