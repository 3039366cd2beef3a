use crate::models::{Event, Fight, FightLockStatus, LockStatus};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes between consecutive fight lock times under cascade locking
pub const CASCADE_STEP_MINUTES: i64 = 30;

/// Why a fight is not accepting picks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    EventClosed,
    Manual,
    FightClosed,
    Cascade,
}

impl LockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockReason::EventClosed => "event_closed",
            LockReason::Manual => "manual",
            LockReason::FightClosed => "fight_closed",
            LockReason::Cascade => "cascade",
        }
    }
}

impl fmt::Display for LockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a fight currently accepts new or changed picks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Open,
    Locked(LockReason),
}

impl LockState {
    pub fn is_open(&self) -> bool {
        matches!(self, LockState::Open)
    }
}

/// Decide whether picks for `fight` are accepted at `now`.
///
/// Checks run in a fixed order: event-level hard locks override
/// everything, a fight-level manual lock or explicit custom time is more
/// specific than the cascade schedule, and cascade is the fallback that
/// staggers lock times by card position. Reordering the checks changes
/// behavior for events that mix manual and cascade locking.
pub fn resolve_lock(event: &Event, fight: &Fight, now: NaiveDateTime) -> LockState {
    if event.lock_status == LockStatus::Locked {
        return LockState::Locked(LockReason::EventClosed);
    }

    if event.lock_status == LockStatus::Scheduled {
        if let Some(lock_time) = event.lock_time {
            if now > lock_time {
                return LockState::Locked(LockReason::EventClosed);
            }
        }
    }

    if fight.lock_status == FightLockStatus::Locked {
        return LockState::Locked(LockReason::Manual);
    }

    if let Some(custom_lock_time) = fight.custom_lock_time {
        if now > custom_lock_time {
            return LockState::Locked(LockReason::FightClosed);
        }
    }

    if event.lock_status == LockStatus::Cascade {
        if let (Some(start), Some(order)) = (event.cascade_start_time, fight.order) {
            let fight_lock_time =
                start + Duration::minutes(CASCADE_STEP_MINUTES) * (order - 1);
            if now > fight_lock_time {
                return LockState::Locked(LockReason::Cascade);
            }
        }
    }

    LockState::Open
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FightCategory;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event() -> Event {
        Event::new("FP 10".to_string(), dt(20, 0))
    }

    fn fight(event: &Event, order: Option<i32>) -> Fight {
        Fight::new(
            event.id,
            Uuid::new_v4(),
            Uuid::new_v4(),
            FightCategory::MainCard,
            false,
            order,
        )
    }

    #[test]
    fn test_open_by_default() {
        let event = event();
        let fight = fight(&event, Some(1));
        assert_eq!(resolve_lock(&event, &fight, dt(19, 0)), LockState::Open);
    }

    #[test]
    fn test_event_lock_overrides_future_custom_time() {
        let mut event = event();
        event.lock_status = LockStatus::Locked;
        let mut fight = fight(&event, Some(1));
        fight.custom_lock_time = Some(dt(23, 0));
        assert_eq!(
            resolve_lock(&event, &fight, dt(19, 0)),
            LockState::Locked(LockReason::EventClosed)
        );
    }

    #[test]
    fn test_scheduled_lock_time() {
        let mut event = event();
        event.lock_status = LockStatus::Scheduled;
        event.lock_time = Some(dt(19, 30));
        let fight = fight(&event, Some(1));
        assert_eq!(resolve_lock(&event, &fight, dt(19, 0)), LockState::Open);
        assert_eq!(
            resolve_lock(&event, &fight, dt(19, 31)),
            LockState::Locked(LockReason::EventClosed)
        );
    }

    #[test]
    fn test_manual_fight_lock_beats_cascade() {
        let mut event = event();
        event.lock_status = LockStatus::Cascade;
        event.cascade_start_time = Some(dt(20, 0));
        let mut fight = fight(&event, Some(2));
        fight.lock_status = FightLockStatus::Locked;
        assert_eq!(
            resolve_lock(&event, &fight, dt(19, 0)),
            LockState::Locked(LockReason::Manual)
        );
    }

    #[test]
    fn test_custom_lock_time() {
        let event = event();
        let mut fight = fight(&event, Some(1));
        fight.custom_lock_time = Some(dt(19, 15));
        assert_eq!(resolve_lock(&event, &fight, dt(19, 15)), LockState::Open);
        assert_eq!(
            resolve_lock(&event, &fight, dt(19, 16)),
            LockState::Locked(LockReason::FightClosed)
        );
    }

    #[test]
    fn test_cascade_staggers_by_order() {
        let mut event = event();
        event.lock_status = LockStatus::Cascade;
        event.cascade_start_time = Some(dt(20, 0));

        // Orders 1, 2, 3 lock at T, T+30m, T+60m
        let checks = [(1, dt(20, 0)), (2, dt(20, 30)), (3, dt(21, 0))];
        for (order, lock_time) in checks {
            let fight = fight(&event, Some(order));
            assert_eq!(resolve_lock(&event, &fight, lock_time), LockState::Open);
            assert_eq!(
                resolve_lock(&event, &fight, lock_time + Duration::minutes(1)),
                LockState::Locked(LockReason::Cascade)
            );
        }
    }

    #[test]
    fn test_cascade_without_order_stays_open() {
        let mut event = event();
        event.lock_status = LockStatus::Cascade;
        event.cascade_start_time = Some(dt(20, 0));
        let fight = fight(&event, None);
        assert_eq!(resolve_lock(&event, &fight, dt(23, 0)), LockState::Open);
    }
}
