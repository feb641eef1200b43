//! Read-only dashboard queries over the unlock event store.
//!
//! Day/weekday/month bucketing follows the dashboard's display
//! timezone; everything else is UTC.

use chrono::NaiveDate;
use sqlx::PgPool;
use steampulse_core::types::Timestamp;

use crate::models::dashboard::{
    BestStreak, CumulativeByMonthRow, DashboardSummary, GameProgressRow, GameUnlockRow,
    RecentAchievementRow, UnlocksByDayRow, WeekdayRow,
};

/// Display timezone for local-date bucketing (weekday, streak, month).
const DASHBOARD_TZ: &str = "Europe/Oslo";

/// Weekday labels indexed by PostgreSQL `DOW` (0 = Sunday).
const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Provides the dashboard read model. All queries are scoped to one
/// account and never write.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline totals: distinct games, total unlocks, rolling 7-day
    /// count, last unlock timestamp, average unlocks per game.
    pub async fn summary(
        pool: &PgPool,
        steam_user_id: &str,
    ) -> Result<DashboardSummary, sqlx::Error> {
        let (unique_games, total_unlocks, last_unlocked_at): (i64, i64, Option<Timestamp>) =
            sqlx::query_as(
                "SELECT COUNT(DISTINCT app_id), COUNT(*), MAX(achieved_at) \
                 FROM achievement_events WHERE steam_user_id = $1",
            )
            .bind(steam_user_id)
            .fetch_one(pool)
            .await?;

        let unlocks_last_7_days: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM achievement_events \
             WHERE steam_user_id = $1 AND achieved_at >= NOW() - INTERVAL '7 days'",
        )
        .bind(steam_user_id)
        .fetch_one(pool)
        .await?;

        let average_achievements_per_game = if unique_games > 0 {
            (total_unlocks as f64 / unique_games as f64 * 10.0).round() / 10.0
        } else {
            0.0
        };

        Ok(DashboardSummary {
            steam_user_id: steam_user_id.to_string(),
            unique_games_with_unlocks: unique_games,
            total_unlocks,
            unlocks_last_7_days,
            last_unlocked_at,
            average_achievements_per_game,
        })
    }

    /// Unlock counts per UTC day over the trailing `days` window.
    pub async fn unlocks_by_day(
        pool: &PgPool,
        steam_user_id: &str,
        days: i64,
    ) -> Result<Vec<UnlocksByDayRow>, sqlx::Error> {
        let days = days.clamp(1, 365) as i32;
        sqlx::query_as::<_, UnlocksByDayRow>(
            "SELECT DATE_TRUNC('day', achieved_at)::date AS day, COUNT(*) AS unlocks \
             FROM achievement_events \
             WHERE steam_user_id = $1 AND achieved_at >= NOW() - make_interval(days => $2) \
             GROUP BY 1 ORDER BY 1",
        )
        .bind(steam_user_id)
        .bind(days)
        .fetch_all(pool)
        .await
    }

    /// Per-game unlock counts, most-unlocked first. Backs both the
    /// top-games and games-unlocks endpoints.
    pub async fn game_unlock_counts(
        pool: &PgPool,
        steam_user_id: &str,
        limit: i64,
    ) -> Result<Vec<GameUnlockRow>, sqlx::Error> {
        let limit = limit.clamp(1, 100);
        sqlx::query_as::<_, GameUnlockRow>(
            "SELECT e.app_id, g.name, COUNT(*) AS unlocks, \
                    MAX(e.achieved_at) AS last_unlocked_at \
             FROM achievement_events e \
             LEFT JOIN games g ON g.app_id = e.app_id \
             WHERE e.steam_user_id = $1 \
             GROUP BY e.app_id, g.name \
             ORDER BY unlocks DESC, last_unlocked_at DESC \
             LIMIT $2",
        )
        .bind(steam_user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Most recent unlocks, newest first.
    pub async fn recent_achievements(
        pool: &PgPool,
        steam_user_id: &str,
        limit: i64,
    ) -> Result<Vec<RecentAchievementRow>, sqlx::Error> {
        let limit = limit.clamp(1, 100);
        sqlx::query_as::<_, RecentAchievementRow>(
            "SELECT e.achieved_at, e.app_id, g.name AS game_name, \
                    e.achievement_key, e.achievement_name \
             FROM achievement_events e \
             LEFT JOIN games g ON g.app_id = e.app_id \
             WHERE e.steam_user_id = $1 \
             ORDER BY e.achieved_at DESC \
             LIMIT $2",
        )
        .bind(steam_user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Per-game completion progress, joining the recorded achievement
    /// totals. Games without a recorded total get `None` for total and
    /// percent.
    pub async fn game_progress(
        pool: &PgPool,
        steam_user_id: &str,
        limit: i64,
    ) -> Result<Vec<GameProgressRow>, sqlx::Error> {
        let limit = limit.clamp(1, 100);
        let rows: Vec<(i64, Option<String>, i64, Option<i64>, Option<Timestamp>)> = sqlx::query_as(
            "SELECT e.app_id, g.name, COUNT(*) AS unlocked_count, \
                    t.total_achievements, MAX(e.achieved_at) AS last_unlocked_at \
             FROM achievement_events e \
             LEFT JOIN games g ON g.app_id = e.app_id \
             LEFT JOIN game_achievement_totals t ON t.app_id = e.app_id \
             WHERE e.steam_user_id = $1 \
             GROUP BY e.app_id, g.name, t.total_achievements \
             ORDER BY unlocked_count DESC, MAX(e.achieved_at) DESC \
             LIMIT $2",
        )
        .bind(steam_user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(app_id, game_name, unlocked_count, total_achievements, last_unlocked_at)| {
                    let completion_percent = total_achievements
                        .filter(|&t| t > 0)
                        .map(|t| (unlocked_count as f64 / t as f64 * 1000.0).round() / 10.0);
                    GameProgressRow {
                        app_id,
                        game_name,
                        unlocked_count,
                        total_achievements,
                        completion_percent,
                        last_unlocked_at,
                    }
                },
            )
            .collect())
    }

    /// Unlock counts per weekday in the dashboard timezone,
    /// Monday-first, with zero-filled missing weekdays.
    pub async fn achievements_by_weekday(
        pool: &PgPool,
        steam_user_id: &str,
    ) -> Result<Vec<WeekdayRow>, sqlx::Error> {
        let query = format!(
            "SELECT EXTRACT(DOW FROM (achieved_at AT TIME ZONE '{DASHBOARD_TZ}'))::int AS dow, \
                    COUNT(*) AS achievements \
             FROM achievement_events \
             WHERE steam_user_id = $1 \
             GROUP BY dow"
        );
        let rows: Vec<(i32, i64)> = sqlx::query_as(&query)
            .bind(steam_user_id)
            .fetch_all(pool)
            .await?;

        // PostgreSQL DOW: 0 = Sunday .. 6 = Saturday; the dashboard
        // wants Monday-first.
        let order = [1, 2, 3, 4, 5, 6, 0];
        Ok(order
            .into_iter()
            .map(|dow| WeekdayRow {
                weekday: WEEKDAY_LABELS[dow as usize],
                achievements: rows
                    .iter()
                    .find(|(d, _)| *d == dow)
                    .map(|(_, n)| *n)
                    .unwrap_or(0),
            })
            .collect())
    }

    /// The longest run of consecutive local dates with at least one
    /// unlock, expanded into the full date list for rendering.
    pub async fn best_streak(
        pool: &PgPool,
        steam_user_id: &str,
    ) -> Result<BestStreak, sqlx::Error> {
        let query = format!(
            "WITH days AS ( \
                SELECT DISTINCT \
                    (DATE_TRUNC('day', achieved_at AT TIME ZONE '{DASHBOARD_TZ}'))::date AS d \
                FROM achievement_events \
                WHERE steam_user_id = $1 \
             ), \
             islands AS ( \
                SELECT d, (d - (ROW_NUMBER() OVER (ORDER BY d))::int) AS grp FROM days \
             ) \
             SELECT MIN(d) AS start_date, MAX(d) AS end_date, COUNT(*) AS len \
             FROM islands \
             GROUP BY grp \
             ORDER BY len DESC, MAX(d) DESC \
             LIMIT 1"
        );
        let row: Option<(NaiveDate, NaiveDate, i64)> = sqlx::query_as(&query)
            .bind(steam_user_id)
            .fetch_optional(pool)
            .await?;

        let Some((start_date, end_date, days)) = row else {
            return Ok(BestStreak::empty());
        };

        let dates: Vec<NaiveDate> = sqlx::query_scalar(
            "SELECT d::date FROM generate_series($1::date, $2::date, interval '1 day') AS s(d)",
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(pool)
        .await?;

        Ok(BestStreak {
            days,
            start_date: Some(start_date),
            end_date: Some(end_date),
            dates,
        })
    }

    /// Monthly unlock counts and a running total over the trailing
    /// `months` window, bucketed in the dashboard timezone.
    pub async fn cumulative_by_month(
        pool: &PgPool,
        steam_user_id: &str,
        months: i64,
    ) -> Result<Vec<CumulativeByMonthRow>, sqlx::Error> {
        let months = months.clamp(1, 240) as i32;
        let query = format!(
            "WITH m AS ( \
                SELECT DATE_TRUNC('month', (achieved_at AT TIME ZONE '{DASHBOARD_TZ}'))::date \
                       AS month_start, \
                       COUNT(*) AS achievements \
                FROM achievement_events \
                WHERE steam_user_id = $1 \
                  AND achieved_at >= NOW() - make_interval(months => $2) \
                GROUP BY 1 \
             ) \
             SELECT TO_CHAR(month_start, 'YYYY-MM') AS month, \
                    achievements, \
                    SUM(achievements) OVER (ORDER BY month_start)::bigint \
                        AS cumulative_achievements \
             FROM m ORDER BY month_start"
        );
        sqlx::query_as::<_, CumulativeByMonthRow>(&query)
            .bind(steam_user_id)
            .bind(months)
            .fetch_all(pool)
            .await
    }
}
