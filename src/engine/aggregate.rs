use crate::error::{AppError, AppResult};
use crate::models::{Event, Pick};
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Rolling point totals for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsSummary {
    pub lifetime: i64,
    pub last_event: i64,
    pub monthly: i64,
    pub yearly: i64,
}

/// Identify the last completed event: the completed event with the most
/// recent start date. Determined globally, not per user. Start-date ties
/// break by event id so the choice is stable across recomputations.
pub fn last_completed_event(events: &HashMap<Uuid, Event>, now: NaiveDateTime) -> Option<Uuid> {
    events
        .values()
        .filter(|event| event.is_completed(now))
        .max_by_key(|event| (event.start_date, event.id))
        .map(|event| event.id)
}

/// Per-user sum of `points_earned` over picks belonging to the last
/// completed event. Feeds both the `last_event` bucket and the rank-delta
/// computation.
pub fn last_event_contributions(
    picks: &[Pick],
    last_completed: Option<Uuid>,
) -> HashMap<Uuid, i64> {
    let mut contributions = HashMap::new();
    if let Some(event_id) = last_completed {
        for pick in picks.iter().filter(|p| p.event_id == event_id) {
            *contributions.entry(pick.user_id).or_insert(0) += pick.points_earned;
        }
    }
    contributions
}

/// Compute a user's rolling totals from their full pick history.
///
/// Monthly and yearly buckets are keyed by the pick's event start date
/// against `now`'s calendar month and year, wall-clock at aggregation
/// time rather than pick-submission time.
pub fn aggregate_user(
    user_id: Uuid,
    picks: &[Pick],
    events: &HashMap<Uuid, Event>,
    last_completed: Option<Uuid>,
    now: NaiveDateTime,
) -> AppResult<PointsSummary> {
    let mut summary = PointsSummary::default();

    for pick in picks.iter().filter(|p| p.user_id == user_id) {
        let event = events.get(&pick.event_id).ok_or_else(|| {
            AppError::MissingReference(format!(
                "Pick {} references unknown event {}",
                pick.id, pick.event_id
            ))
        })?;

        summary.lifetime += pick.points_earned;

        if Some(pick.event_id) == last_completed {
            summary.last_event += pick.points_earned;
        }

        if event.start_date.year() == now.year() {
            summary.yearly += pick.points_earned;
            if event.start_date.month() == now.month() {
                summary.monthly += pick.points_earned;
            }
        }
    }

    Ok(summary)
}
