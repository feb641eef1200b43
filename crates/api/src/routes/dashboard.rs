//! Dashboard read-model endpoints.
//!
//! All routes are read-only and scoped to the configured account.
//! Query parameters are validated the same way: a present but
//! non-positive value is a 400.

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use steampulse_db::models::dashboard::{
    BestStreak, CumulativeByMonthRow, DashboardSummary, GameProgressRow, GameUnlockRow,
    RecentAchievementRow, UnlocksByDayRow, WeekdayRow,
};
use steampulse_db::repositories::DashboardRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct DaysQuery {
    days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct LimitQuery {
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MonthsQuery {
    months: Option<i64>,
}

/// Summary response: headline totals plus the best daily streak.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub best_streak: BestStreak,
}

/// Reject non-positive values, passing the example through in the
/// error message.
fn positive_or(value: Option<i64>, default: i64, hint: &str) -> Result<i64, AppError> {
    let value = value.unwrap_or(default);
    if value <= 0 {
        return Err(AppError::BadRequest(format!("Use ?{hint} (e.g. {default})")));
    }
    Ok(value)
}

/// GET /dashboard/summary
async fn summary(State(state): State<AppState>) -> AppResult<Json<SummaryResponse>> {
    let steam_user_id = &state.sync_config.steam_user_id;
    let summary = DashboardRepo::summary(&state.pool, steam_user_id).await?;
    let best_streak = DashboardRepo::best_streak(&state.pool, steam_user_id).await?;
    Ok(Json(SummaryResponse {
        summary,
        best_streak,
    }))
}

/// GET /dashboard/unlocks-by-day?days=30
async fn unlocks_by_day(
    State(state): State<AppState>,
    Query(query): Query<DaysQuery>,
) -> AppResult<Json<Vec<UnlocksByDayRow>>> {
    let days = positive_or(query.days, 30, "days=NUMBER")?;
    let rows =
        DashboardRepo::unlocks_by_day(&state.pool, &state.sync_config.steam_user_id, days).await?;
    Ok(Json(rows))
}

/// GET /dashboard/top-games?limit=10
async fn top_games(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<GameUnlockRow>>> {
    let limit = positive_or(query.limit, 10, "limit=NUMBER")?;
    let rows =
        DashboardRepo::game_unlock_counts(&state.pool, &state.sync_config.steam_user_id, limit)
            .await?;
    Ok(Json(rows))
}

/// GET /dashboard/games-unlocks?limit=20
async fn games_unlocks(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<GameUnlockRow>>> {
    let limit = positive_or(query.limit, 20, "limit=NUMBER")?;
    let rows =
        DashboardRepo::game_unlock_counts(&state.pool, &state.sync_config.steam_user_id, limit)
            .await?;
    Ok(Json(rows))
}

/// GET /dashboard/recent-achievements?limit=20
async fn recent_achievements(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<RecentAchievementRow>>> {
    let limit = positive_or(query.limit, 20, "limit=NUMBER")?;
    let rows =
        DashboardRepo::recent_achievements(&state.pool, &state.sync_config.steam_user_id, limit)
            .await?;
    Ok(Json(rows))
}

/// GET /dashboard/games-progress?limit=20
async fn games_progress(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<GameProgressRow>>> {
    let limit = positive_or(query.limit, 20, "limit=NUMBER")?;
    let rows = DashboardRepo::game_progress(&state.pool, &state.sync_config.steam_user_id, limit)
        .await?;
    Ok(Json(rows))
}

/// GET /dashboard/achievements-by-weekday
async fn achievements_by_weekday(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeekdayRow>>> {
    let rows =
        DashboardRepo::achievements_by_weekday(&state.pool, &state.sync_config.steam_user_id)
            .await?;
    Ok(Json(rows))
}

/// GET /dashboard/cumulative-achievements-by-month?months=120
async fn cumulative_by_month(
    State(state): State<AppState>,
    Query(query): Query<MonthsQuery>,
) -> AppResult<Json<Vec<CumulativeByMonthRow>>> {
    let months = positive_or(query.months, 120, "months=NUMBER")?;
    let rows =
        DashboardRepo::cumulative_by_month(&state.pool, &state.sync_config.steam_user_id, months)
            .await?;
    Ok(Json(rows))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/unlocks-by-day", get(unlocks_by_day))
        .route("/top-games", get(top_games))
        .route("/games-unlocks", get(games_unlocks))
        .route("/recent-achievements", get(recent_achievements))
        .route("/games-progress", get(games_progress))
        .route("/achievements-by-weekday", get(achievements_by_weekday))
        .route("/cumulative-achievements-by-month", get(cumulative_by_month))
}
