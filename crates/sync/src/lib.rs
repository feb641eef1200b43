//! The sync pipeline: periodic reconciliation of Steam achievement
//! state against the event store, plus webhook notification for newly
//! discovered unlocks.
//!
//! - [`run_sync`] -- one reconciliation pass (the manual-trigger entry
//!   point).
//! - [`AchievementPoller`] -- drives reconciliation on a fixed interval
//!   and fans each cycle's new events out to webhook targets.

pub mod poller;
pub mod reconciler;

pub use poller::AchievementPoller;
pub use reconciler::{run_sync, PerAppInserted, SyncError, SyncSummary};
