//! Pure computation layer of the backend: lock resolution, pick scoring,
//! period aggregation and ranking.
//!
//! Nothing in here performs I/O or reads the wall clock; `now` is always
//! an explicit argument and every function returns new records for the
//! caller to persist.

pub mod aggregate;
pub mod lock;
pub mod rank;
pub mod scoring;

pub use aggregate::{aggregate_user, last_completed_event, PointsSummary};
pub use lock::{resolve_lock, LockReason, LockState, CASCADE_STEP_MINUTES};
pub use rank::{
    competition_ranks, leaderboard, rank_and_delta, LeaderboardEntry, Period, RankField,
    RankMovement, LEADERBOARD_LIMIT,
};
pub use scoring::score_fight;
