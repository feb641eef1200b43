//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus the input shapes the repositories
//! accept.

pub mod achievement_event;
pub mod dashboard;
pub mod game;
pub mod webhook_target;
