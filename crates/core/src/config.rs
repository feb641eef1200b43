//! Environment-driven configuration for the sync pipeline.
//!
//! Values are read once at startup. Malformed numeric or boolean values
//! fall back to the default rather than aborting; only a missing Steam
//! user id is fatal.

use crate::error::CoreError;

/// Default ceiling on games fetched per sync cycle.
const DEFAULT_MAX_GAMES: i64 = 50;

/// Default cap on the new-events sample returned by one sync run.
const DEFAULT_MAX_NEW_EVENTS: i64 = 50;

/// Default poll interval in seconds.
const DEFAULT_POLL_INTERVAL_SECS: i64 = 60;

/// Configuration for the achievement sync pipeline and poller.
///
/// | Env Var                   | Default        |
/// |---------------------------|----------------|
/// | `STEAM_STEAMID64`         | (required)     |
/// | `STEAM_MAX_GAMES`         | `50` (<= 0 = unlimited) |
/// | `MAX_NEW_EVENTS_RETURNED` | `50`           |
/// | `POLL_INTERVAL_SECONDS`   | `60`           |
/// | `ENABLE_POLLER`           | `true`         |
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// SteamID64 of the tracked account.
    pub steam_user_id: String,
    /// Ceiling on games processed per cycle. Zero or negative means no
    /// ceiling.
    pub max_games: i64,
    /// Cap on the new-events sample collected per cycle. The inserted
    /// counter itself is never capped.
    pub max_new_events: usize,
    /// Poller cadence in seconds.
    pub poll_interval_secs: u64,
    /// Whether the background poller runs at all.
    pub poller_enabled: bool,
}

impl SyncConfig {
    /// Load the sync configuration from environment variables.
    ///
    /// Fails with [`CoreError::Configuration`] when `STEAM_STEAMID64` is
    /// absent or empty; every other option has a default.
    pub fn from_env() -> Result<Self, CoreError> {
        let steam_user_id = std::env::var("STEAM_STEAMID64")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                CoreError::Configuration("Missing STEAM_STEAMID64 in environment".into())
            })?;

        Ok(Self {
            steam_user_id,
            max_games: env_number("STEAM_MAX_GAMES", DEFAULT_MAX_GAMES),
            max_new_events: env_number("MAX_NEW_EVENTS_RETURNED", DEFAULT_MAX_NEW_EVENTS).max(0)
                as usize,
            // tokio intervals must be non-zero.
            poll_interval_secs: env_number("POLL_INTERVAL_SECONDS", DEFAULT_POLL_INTERVAL_SECS)
                .max(1) as u64,
            poller_enabled: env_bool("ENABLE_POLLER", true),
        })
    }
}

/// Read a numeric env var, falling back on absence or a malformed value.
pub fn env_number(name: &str, fallback: i64) -> i64 {
    parse_number(std::env::var(name).ok().as_deref(), fallback)
}

/// Read a boolean env var. Accepts `1`/`true`/`yes` (case-insensitive)
/// as true; anything else is false; absence yields the fallback.
pub fn env_bool(name: &str, fallback: bool) -> bool {
    parse_bool(std::env::var(name).ok().as_deref(), fallback)
}

fn parse_number(raw: Option<&str>, fallback: i64) -> i64 {
    match raw {
        Some(v) => v.trim().parse().unwrap_or(fallback),
        None => fallback,
    }
}

fn parse_bool(raw: Option<&str>, fallback: bool) -> bool {
    match raw {
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        None => fallback,
    }
}
