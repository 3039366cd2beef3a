use crate::error::{AppError, AppResult};
use crate::models::{Event, Pick, User};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Maximum number of entries a leaderboard query returns
pub const LEADERBOARD_LIMIT: usize = 50;

/// Which precomputed points field a rank computation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankField {
    Monthly,
    Yearly,
}

impl RankField {
    fn points(&self, user: &User) -> i64 {
        match self {
            RankField::Monthly => user.monthly_points,
            RankField::Yearly => user.yearly_points,
        }
    }
}

/// Leaderboard time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
    All,
}

impl Period {
    /// Convert from a query string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }

    /// Convert to a query string
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

/// Rank and signed movement for one user
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankMovement {
    pub rank: u32,
    /// Positive when the user moved up compared to the standings without
    /// the last completed event
    pub delta: i64,
}

/// One row of a leaderboard
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub username: String,
    pub points: i64,
    pub rank: u32,
}

/// Standard competition ranking. Scores sort descending; tied entries
/// share the rank of the first of their group and later entries keep
/// their positional rank, so ranks may skip: [50, 50, 30] -> [1, 1, 3].
pub fn competition_ranks(scores: &[(Uuid, i64)]) -> HashMap<Uuid, u32> {
    let mut sorted: Vec<(Uuid, i64)> = scores.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut ranks = HashMap::with_capacity(sorted.len());
    let mut current_rank = 0u32;
    let mut prev_score = None;
    for (position, (user_id, score)) in sorted.into_iter().enumerate() {
        if prev_score != Some(score) {
            current_rank = position as u32 + 1;
            prev_score = Some(score);
        }
        ranks.insert(user_id, current_rank);
    }
    ranks
}

/// Compute every user's rank on `field` and the rank movement
/// attributable to the last completed event.
///
/// Previous standings subtract each user's last-event contribution from
/// the field total, so the delta isolates the most recent event even
/// though the field spans a whole month or year. With no completed event
/// all deltas are zero.
pub fn rank_and_delta(
    users: &[User],
    field: RankField,
    last_event_contrib: &HashMap<Uuid, i64>,
    has_completed_event: bool,
) -> AppResult<HashMap<Uuid, RankMovement>> {
    if users.is_empty() {
        return Err(AppError::MissingReference(
            "Rank computation requires at least one user".to_string(),
        ));
    }

    let current: Vec<(Uuid, i64)> = users.iter().map(|u| (u.id, field.points(u))).collect();
    let current_ranks = competition_ranks(&current);

    if !has_completed_event {
        return Ok(users
            .iter()
            .map(|u| (u.id, RankMovement { rank: current_ranks[&u.id], delta: 0 }))
            .collect());
    }

    let previous: Vec<(Uuid, i64)> = users
        .iter()
        .map(|u| {
            let contribution = last_event_contrib.get(&u.id).copied().unwrap_or(0);
            (u.id, field.points(u) - contribution)
        })
        .collect();
    let previous_ranks = competition_ranks(&previous);

    Ok(users
        .iter()
        .map(|u| {
            let rank = current_ranks[&u.id];
            let delta = previous_ranks[&u.id] as i64 - rank as i64;
            (u.id, RankMovement { rank, delta })
        })
        .collect())
}

/// Build a leaderboard for `period`, at most [`LEADERBOARD_LIMIT`] rows.
///
/// Without `period_id` the precomputed per-user fields are used. With
/// `period_id` the score is summed on the fly from picks matching the
/// period filter, leaving the precomputed fields untouched: `week`
/// filters by exact event id, `month` by a "YYYY-MM" id against the
/// event start date, `year` by "YYYY". Ties order by user id so repeated
/// queries return identical pages. Zero users yield an empty board.
pub fn leaderboard(
    users: &[User],
    picks: &[Pick],
    events: &HashMap<Uuid, Event>,
    period: Period,
    period_id: Option<&str>,
) -> AppResult<Vec<LeaderboardEntry>> {
    let scores: Vec<(Uuid, i64)> = match period_id {
        None => users
            .iter()
            .map(|u| {
                let points = match period {
                    Period::Week => u.last_event_points,
                    Period::Month => u.monthly_points,
                    Period::Year => u.yearly_points,
                    Period::All => u.points,
                };
                (u.id, points)
            })
            .collect(),
        Some(id) => historical_scores(users, picks, events, period, id)?,
    };

    let ranks = competition_ranks(&scores);
    let usernames: HashMap<Uuid, &str> =
        users.iter().map(|u| (u.id, u.username.as_str())).collect();

    let mut sorted = scores;
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    Ok(sorted
        .into_iter()
        .take(LEADERBOARD_LIMIT)
        .map(|(user_id, points)| LeaderboardEntry {
            user_id,
            username: usernames[&user_id].to_string(),
            points,
            rank: ranks[&user_id],
        })
        .collect())
}

/// On-the-fly score for a historical period id
fn historical_scores(
    users: &[User],
    picks: &[Pick],
    events: &HashMap<Uuid, Event>,
    period: Period,
    period_id: &str,
) -> AppResult<Vec<(Uuid, i64)>> {
    let mut by_user: HashMap<Uuid, i64> = users.iter().map(|u| (u.id, 0)).collect();

    let week_event_id = match period {
        Period::Week => Some(Uuid::parse_str(period_id).map_err(|_| {
            AppError::Validation(format!("Invalid event id: {}", period_id))
        })?),
        _ => None,
    };

    for pick in picks {
        let matches = match period {
            Period::Week => Some(pick.event_id) == week_event_id,
            Period::Month | Period::Year => {
                let event = events.get(&pick.event_id).ok_or_else(|| {
                    AppError::MissingReference(format!(
                        "Pick {} references unknown event {}",
                        pick.id, pick.event_id
                    ))
                })?;
                let format = if period == Period::Month { "%Y-%m" } else { "%Y" };
                event.start_date.format(format).to_string() == period_id
            }
            Period::All => true,
        };
        if matches {
            if let Some(total) = by_user.get_mut(&pick.user_id) {
                *total += pick.points_earned;
            }
        }
    }

    Ok(by_user.into_iter().collect())
}
