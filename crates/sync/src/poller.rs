//! Background poller driving reconcile-then-notify cycles.
//!
//! [`AchievementPoller`] runs one cycle immediately at startup and
//! then on a fixed interval until cancelled. A failed cycle is logged
//! and the loop waits for the next tick; it is never retried early and
//! never terminates the loop.

use std::sync::Arc;
use std::time::Duration;

use steampulse_core::SyncConfig;
use steampulse_db::DbPool;
use steampulse_events::WebhookNotifier;
use steampulse_steam::AchievementProvider;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::reconciler::run_sync;

/// Background service that periodically syncs achievements and sends
/// webhooks for newly discovered unlocks.
pub struct AchievementPoller {
    pool: DbPool,
    provider: Arc<dyn AchievementProvider>,
    notifier: Arc<WebhookNotifier>,
    config: SyncConfig,
}

impl AchievementPoller {
    /// Create a poller over the given store, provider, and notifier.
    pub fn new(
        pool: DbPool,
        provider: Arc<dyn AchievementProvider>,
        notifier: Arc<WebhookNotifier>,
        config: SyncConfig,
    ) -> Self {
        Self {
            pool,
            provider,
            notifier,
            config,
        }
    }

    /// Run the poll loop.
    ///
    /// The first tick fires immediately, so one cycle runs at startup
    /// without waiting a full interval. The loop exits only when the
    /// provided [`CancellationToken`] is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval =
            tokio::time::interval(Duration::from_secs(self.config.poll_interval_secs));
        // A tick that lands while a cycle is still running is pushed
        // back instead of fired in a burst: cycles never overlap.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.config.poll_interval_secs,
            "Achievement poller started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Achievement poller cancelled");
                    break;
                }
                _ = interval.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }

    /// One reconcile-then-notify cycle. Never propagates an error;
    /// a failed cycle must not stop future cycles.
    async fn run_cycle(&self) {
        let summary = match run_sync(&self.pool, self.provider.as_ref(), &self.config).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Poll cycle failed");
                return;
            }
        };

        let mut webhooks_sent = 0usize;
        let mut failed_deliveries = 0usize;
        for event in &summary.new_events_sample {
            match self.notifier.send_achievement_event(&self.pool, event).await {
                Ok(reports) => {
                    webhooks_sent += 1;
                    failed_deliveries += reports.iter().filter(|r| !r.ok).count();
                }
                Err(e) => {
                    tracing::error!(
                        app_id = event.app_id,
                        achievement_key = %event.achievement_key,
                        error = %e,
                        "Failed to list webhook targets for event"
                    );
                }
            }
        }

        tracing::info!(
            games_processed = summary.games_processed,
            api_failures = summary.api_failures,
            new_unlocks_inserted = summary.new_unlocks_inserted,
            webhooks_sent,
            failed_deliveries,
            "Poll cycle complete"
        );
    }
}
