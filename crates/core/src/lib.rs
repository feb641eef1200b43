//! Shared domain types, error taxonomy, and environment-driven
//! configuration for the Steampulse achievement tracker.

pub mod config;
pub mod error;
pub mod types;

pub use config::SyncConfig;
pub use error::CoreError;
