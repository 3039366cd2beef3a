use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User model. All point and rank fields are derived: the aggregator and
/// ranker own them, callers only read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: NaiveDateTime,
    /// Lifetime total
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub last_event_points: i64,
    #[serde(default)]
    pub monthly_points: i64,
    #[serde(default)]
    pub yearly_points: i64,
    /// Signed rank movement attributable to the last completed event;
    /// positive means the user moved up
    #[serde(default)]
    pub monthly_rank_delta: i64,
    #[serde(default)]
    pub yearly_rank_delta: i64,
}

impl User {
    /// Create a new User with zeroed derived fields
    pub fn new(username: String, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            created_at,
            points: 0,
            last_event_points: 0,
            monthly_points: 0,
            yearly_points: 0,
            monthly_rank_delta: 0,
            yearly_rank_delta: 0,
        }
    }
}
