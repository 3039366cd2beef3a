//! FightPicks Backend Library
//!
//! Scoring and ranking engine for a fight prediction platform: lock
//! resolution for pick submission, per-fight pick scoring, rolling
//! point aggregation, and rank-delta leaderboards. The persistence and
//! API layers live elsewhere and call into this crate.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::Scoreboard;
