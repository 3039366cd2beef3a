use crate::models::fight::{Method, RoundLabel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pick model representing one user's prediction for a single fight.
/// At most one pick exists per (user, fight); resubmitting replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub fight_id: Uuid,
    /// Predicted winner
    pub fighter_id: Uuid,
    pub method: Method,
    /// "R<n>" when method is a finish, a decision-type token for DEC
    pub round: String,
    /// Derived; owned by the scoring engine, zero until the fight resolves
    #[serde(default)]
    pub points_earned: i64,
}

impl Pick {
    /// Create a new Pick
    pub fn new(
        user_id: Uuid,
        event_id: Uuid,
        fight_id: Uuid,
        fighter_id: Uuid,
        method: Method,
        round: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            fight_id,
            fighter_id,
            method,
            round,
            points_earned: 0,
        }
    }

    /// Validate that the round label is consistent with the method
    pub fn validate(&self) -> Result<(), String> {
        let label = RoundLabel::parse(&self.round)?;
        match self.method {
            Method::Dec => {
                if label.is_round() {
                    return Err(
                        "Decision picks take a decision type, not a round number".to_string()
                    );
                }
            }
            Method::KoTko | Method::Sub => {
                if !label.is_round() {
                    return Err(format!(
                        "{} picks require a round label like R1",
                        self.method.as_str()
                    ));
                }
            }
        }
        Ok(())
    }
}
