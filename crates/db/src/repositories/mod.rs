//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations
//! that accept `&PgPool` as the first argument.

pub mod achievement_event_repo;
pub mod dashboard_repo;
pub mod game_repo;
pub mod game_total_repo;
pub mod webhook_target_repo;

pub use achievement_event_repo::AchievementEventRepo;
pub use dashboard_repo::DashboardRepo;
pub use game_repo::GameRepo;
pub use game_total_repo::GameTotalRepo;
pub use webhook_target_repo::WebhookTargetRepo;
