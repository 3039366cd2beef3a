use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card position of a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightCategory {
    MainEvent,
    CoMain,
    MainCard,
    Prelim,
    Early,
}

impl FightCategory {
    /// Convert from a stored string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "main_event" => Ok(FightCategory::MainEvent),
            "co_main" => Ok(FightCategory::CoMain),
            "main_card" => Ok(FightCategory::MainCard),
            "prelim" => Ok(FightCategory::Prelim),
            "early" => Ok(FightCategory::Early),
            _ => Err(format!("Invalid fight category: {}", s)),
        }
    }

    /// Convert to a stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            FightCategory::MainEvent => "main_event",
            FightCategory::CoMain => "co_main",
            FightCategory::MainCard => "main_card",
            FightCategory::Prelim => "prelim",
            FightCategory::Early => "early",
        }
    }
}

/// Fight-level lock override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightLockStatus {
    Open,
    Locked,
}

/// How a resolved fight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightResult {
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "nc")]
    NoContest,
}

impl FightResult {
    /// Convert from a stored string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "win" => Ok(FightResult::Win),
            "draw" => Ok(FightResult::Draw),
            "nc" => Ok(FightResult::NoContest),
            _ => Err(format!("Invalid fight result: {}", s)),
        }
    }

    /// Convert to a stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            FightResult::Win => "win",
            FightResult::Draw => "draw",
            FightResult::NoContest => "nc",
        }
    }
}

/// Predicted finish method. Serialized as the canonical label that fight
/// method strings are matched against by substring containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "KO/TKO")]
    KoTko,
    #[serde(rename = "SUB")]
    Sub,
    #[serde(rename = "DEC")]
    Dec,
}

impl Method {
    /// Convert from the canonical label
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "KO/TKO" => Ok(Method::KoTko),
            "SUB" => Ok(Method::Sub),
            "DEC" => Ok(Method::Dec),
            _ => Err(format!("Invalid method: {}", s)),
        }
    }

    /// Canonical label, e.g. contained in "KO/TKO (Punch)"
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::KoTko => "KO/TKO",
            Method::Sub => "SUB",
            Method::Dec => "DEC",
        }
    }
}

/// Parsed round label: a numbered round "R<n>" for finishes, or a
/// decision-type token (e.g. "Unânime") for fights that go the distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundLabel {
    Round(u32),
    Decision(String),
}

impl RoundLabel {
    /// Parse a round label. Any non-empty token that is not "R<n>" is
    /// treated as a decision type; the serialized form stays
    /// substring-compatible with fight method strings.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("Round label must not be empty".to_string());
        }
        if let Some(digits) = s.strip_prefix('R') {
            if let Ok(n) = digits.parse::<u32>() {
                if n == 0 {
                    return Err("Round numbers are 1-based".to_string());
                }
                return Ok(RoundLabel::Round(n));
            }
        }
        Ok(RoundLabel::Decision(s.to_string()))
    }

    /// Check if this is a numbered round
    pub fn is_round(&self) -> bool {
        matches!(self, RoundLabel::Round(_))
    }
}

/// Fully populated outcome of a resolved fight
#[derive(Debug, Clone)]
pub struct FightOutcome {
    pub result: FightResult,
    /// Absent for draws and no-contests
    pub winner_id: Option<Uuid>,
    /// Canonical method label with detail, e.g. "DEC (Unânime)"
    pub method: String,
    /// "R<n>" for finishes, a decision-type token for decisions
    pub round_end: String,
}

/// Fight model. Outcome fields are all-or-nothing: either the fight is
/// unresolved and all are absent, or it is resolved and all are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fight {
    pub id: Uuid,
    pub event_id: Uuid,
    pub red_fighter_id: Uuid,
    pub blue_fighter_id: Uuid,
    pub category: FightCategory,
    pub is_title: bool,
    /// 1-based card position, used for cascade locking
    pub order: Option<i32>,
    pub lock_status: FightLockStatus,
    pub custom_lock_time: Option<NaiveDateTime>,
    pub winner_id: Option<Uuid>,
    pub result: Option<FightResult>,
    pub method: Option<String>,
    pub round_end: Option<String>,
}

impl Fight {
    /// Create a new unresolved Fight
    pub fn new(
        event_id: Uuid,
        red_fighter_id: Uuid,
        blue_fighter_id: Uuid,
        category: FightCategory,
        is_title: bool,
        order: Option<i32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            red_fighter_id,
            blue_fighter_id,
            category,
            is_title,
            order,
            lock_status: FightLockStatus::Open,
            custom_lock_time: None,
            winner_id: None,
            result: None,
            method: None,
            round_end: None,
        }
    }

    /// Check whether a fighter is one of the two participants
    pub fn has_fighter(&self, fighter_id: Uuid) -> bool {
        self.red_fighter_id == fighter_id || self.blue_fighter_id == fighter_id
    }

    /// Check if the fight has a recorded result
    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    /// Validated view of the outcome fields.
    ///
    /// Returns `Ok(None)` for an unresolved fight, `Ok(Some(_))` for a
    /// fully resolved one, and an error when the fields are partially
    /// populated or inconsistent with the result.
    pub fn outcome(&self) -> Result<Option<FightOutcome>, String> {
        let populated = [
            self.result.is_some(),
            self.method.is_some(),
            self.round_end.is_some(),
        ];

        if populated.iter().all(|p| !p) {
            if self.winner_id.is_some() {
                return Err("Fight has a winner but no result".to_string());
            }
            return Ok(None);
        }
        if !populated.iter().all(|p| *p) {
            return Err("Fight outcome fields are partially populated".to_string());
        }

        let result = self.result.unwrap();
        match result {
            FightResult::Win => {
                let winner_id = self
                    .winner_id
                    .ok_or_else(|| "Win result requires a winner".to_string())?;
                if !self.has_fighter(winner_id) {
                    return Err("Winner is not a participant of the fight".to_string());
                }
            }
            FightResult::Draw | FightResult::NoContest => {
                if self.winner_id.is_some() {
                    return Err(format!(
                        "A {} result cannot have a winner",
                        result.as_str()
                    ));
                }
            }
        }

        Ok(Some(FightOutcome {
            result,
            winner_id: self.winner_id,
            method: self.method.clone().unwrap(),
            round_end: self.round_end.clone().unwrap(),
        }))
    }
}
