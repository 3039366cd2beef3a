use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default card duration used when an event has no explicit end date.
/// An event counts as completed once `now` is past its effective end.
pub const DEFAULT_EVENT_DURATION_HOURS: i64 = 8;

/// Event-level lock status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockStatus {
    Open,
    Locked,
    Scheduled,
    Cascade,
}

impl LockStatus {
    /// Convert from a stored string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "open" => Ok(LockStatus::Open),
            "locked" => Ok(LockStatus::Locked),
            "scheduled" => Ok(LockStatus::Scheduled),
            "cascade" => Ok(LockStatus::Cascade),
            _ => Err(format!("Invalid lock status: {}", s)),
        }
    }

    /// Convert to a stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            LockStatus::Open => "open",
            LockStatus::Locked => "locked",
            LockStatus::Scheduled => "scheduled",
            LockStatus::Cascade => "cascade",
        }
    }
}

/// Event model representing one fight card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub lock_status: LockStatus,
    /// Lock deadline, meaningful only when `lock_status` is `Scheduled`
    pub lock_time: Option<NaiveDateTime>,
    /// Anchor for staggered per-fight locking, meaningful only when
    /// `lock_status` is `Cascade`
    pub cascade_start_time: Option<NaiveDateTime>,
}

impl Event {
    /// Create a new Event, open for picks
    pub fn new(name: String, start_date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            start_date,
            end_date: None,
            lock_status: LockStatus::Open,
            lock_time: None,
            cascade_start_time: None,
        }
    }

    /// Effective end time: explicit end date, or start plus the default
    /// card duration
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end_date
            .unwrap_or(self.start_date + Duration::hours(DEFAULT_EVENT_DURATION_HOURS))
    }

    /// Check if the event has finished as of `now`
    pub fn is_completed(&self, now: NaiveDateTime) -> bool {
        now > self.effective_end()
    }
}
