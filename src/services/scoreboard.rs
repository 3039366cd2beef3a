use crate::engine::aggregate::{aggregate_user, last_completed_event, last_event_contributions};
use crate::engine::lock::{resolve_lock, LockState};
use crate::engine::rank::{leaderboard, rank_and_delta, LeaderboardEntry, Period, RankField};
use crate::engine::scoring::score_fight;
use crate::engine::PointsSummary;
use crate::error::{AppError, AppResult};
use crate::models::{Event, Fight, FightResult, Pick, User};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// In-memory snapshot of the platform's records plus the recompute
/// pipeline the engine requires of its caller: fight scoring, then user
/// aggregation, then global ranking, always in that order over a
/// consistent view of the data.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    events: HashMap<Uuid, Event>,
    fights: HashMap<Uuid, Fight>,
    picks: HashMap<Uuid, Pick>,
    users: HashMap<Uuid, User>,
}

impl Scoreboard {
    /// Create an empty scoreboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event
    pub fn add_event(&mut self, event: Event) {
        self.events.insert(event.id, event);
    }

    /// Register a fight; its event must already exist
    pub fn add_fight(&mut self, fight: Fight) -> AppResult<()> {
        if !self.events.contains_key(&fight.event_id) {
            return Err(AppError::MissingReference(format!(
                "Fight {} references unknown event {}",
                fight.id, fight.event_id
            )));
        }
        self.fights.insert(fight.id, fight);
        Ok(())
    }

    /// Register a user
    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Look up an event
    pub fn event(&self, id: Uuid) -> AppResult<&Event> {
        self.events
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }

    /// Look up a fight
    pub fn fight(&self, id: Uuid) -> AppResult<&Fight> {
        self.fights
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Fight {} not found", id)))
    }

    /// Look up a user
    pub fn user(&self, id: Uuid) -> AppResult<&User> {
        self.users
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// All picks submitted for one fight
    pub fn picks_for_fight(&self, fight_id: Uuid) -> Vec<Pick> {
        self.picks
            .values()
            .filter(|p| p.fight_id == fight_id)
            .cloned()
            .collect()
    }

    /// Submit or replace a user's pick for a fight.
    ///
    /// Validates references and the method/round pairing, then gates on
    /// the lock resolver. At most one pick exists per (user, fight);
    /// resubmitting replaces the earlier one. On success the submitting
    /// user's aggregates and the global rank tables are refreshed.
    pub fn submit_pick(&mut self, pick: Pick, now: NaiveDateTime) -> AppResult<Uuid> {
        self.user(pick.user_id)?;
        let event = self.event(pick.event_id)?;
        let fight = self.fights.get(&pick.fight_id).ok_or_else(|| {
            AppError::NotFound(format!("Fight {} not found", pick.fight_id))
        })?;

        if fight.event_id != pick.event_id {
            return Err(AppError::InvalidState(format!(
                "Fight {} does not belong to event {}",
                fight.id, pick.event_id
            )));
        }
        if !fight.has_fighter(pick.fighter_id) {
            return Err(AppError::MissingReference(format!(
                "Fighter {} is not in fight {}",
                pick.fighter_id, fight.id
            )));
        }
        pick.validate().map_err(AppError::InvalidState)?;

        if fight.is_resolved() {
            return Err(AppError::InvalidState(format!(
                "Fight {} already has a result",
                fight.id
            )));
        }
        if let LockState::Locked(reason) = resolve_lock(event, fight, now) {
            return Err(AppError::Locked(reason));
        }

        // One pick per (user, fight): drop any earlier submission
        let previous: Vec<Uuid> = self
            .picks
            .values()
            .filter(|p| p.user_id == pick.user_id && p.fight_id == pick.fight_id)
            .map(|p| p.id)
            .collect();
        for id in previous {
            self.picks.remove(&id);
        }

        let pick_id = pick.id;
        let user_id = pick.user_id;
        info!(
            "Pick {} submitted: user={}, fight={}, fighter={}",
            pick_id, user_id, pick.fight_id, pick.fighter_id
        );
        self.picks.insert(pick_id, pick);

        // A new pick only moves this user's totals, but rank tables are
        // global and must be rebuilt
        self.refresh_user(user_id, now)?;
        self.refresh_ranks(now)?;

        Ok(pick_id)
    }

    /// Record (or edit) a fight's outcome and run the full recompute
    /// pipeline: rescore the fight's picks, re-aggregate users, rebuild
    /// the rank tables.
    pub fn record_fight_result(
        &mut self,
        fight_id: Uuid,
        result: FightResult,
        winner_id: Option<Uuid>,
        method: String,
        round_end: String,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        let fight = self.fights.get(&fight_id).ok_or_else(|| {
            AppError::NotFound(format!("Fight {} not found", fight_id))
        })?;

        let mut updated = fight.clone();
        updated.result = Some(result);
        updated.winner_id = winner_id;
        updated.method = Some(method);
        updated.round_end = Some(round_end);
        // Reject inconsistent outcomes before anything is stored
        updated.outcome().map_err(AppError::InvalidState)?;

        info!(
            "Result recorded for fight {}: {} ({})",
            fight_id,
            result.as_str(),
            updated.method.as_deref().unwrap_or_default()
        );
        self.fights.insert(fight_id, updated);

        self.rescore_fight(fight_id)?;
        self.refresh_users(now)?;
        self.refresh_ranks(now)?;
        Ok(())
    }

    /// Recompute everything from the current records: every resolved
    /// fight's pick awards, every user's rolling totals, and the global
    /// rank tables. Used after loading a snapshot.
    pub fn refresh(&mut self, now: NaiveDateTime) -> AppResult<()> {
        let resolved: Vec<Uuid> = self
            .fights
            .values()
            .filter(|f| f.is_resolved())
            .map(|f| f.id)
            .collect();
        for fight_id in resolved {
            self.rescore_fight(fight_id)?;
        }
        self.refresh_users(now)?;
        self.refresh_ranks(now)?;
        Ok(())
    }

    /// Leaderboard for a period; see [`crate::engine::rank::leaderboard`]
    pub fn leaderboard(
        &self,
        period: Period,
        period_id: Option<&str>,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let users: Vec<User> = self.users.values().cloned().collect();
        let picks: Vec<Pick> = self.picks.values().cloned().collect();
        leaderboard(&users, &picks, &self.events, period, period_id)
    }

    /// A user's rolling totals computed from the current records
    pub fn user_summary(&self, user_id: Uuid, now: NaiveDateTime) -> AppResult<PointsSummary> {
        self.user(user_id)?;
        let picks: Vec<Pick> = self.picks.values().cloned().collect();
        let last_completed = last_completed_event(&self.events, now);
        aggregate_user(user_id, &picks, &self.events, last_completed, now)
    }

    /// Rescore one fight's picks and store the awards
    fn rescore_fight(&mut self, fight_id: Uuid) -> AppResult<()> {
        let fight = self.fights.get(&fight_id).ok_or_else(|| {
            AppError::NotFound(format!("Fight {} not found", fight_id))
        })?;
        let picks = self.picks_for_fight(fight_id);
        let scored = score_fight(fight, &picks)?;
        for pick in scored {
            self.picks.insert(pick.id, pick);
        }
        Ok(())
    }

    /// Recompute one user's rolling totals
    fn refresh_user(&mut self, user_id: Uuid, now: NaiveDateTime) -> AppResult<()> {
        let picks: Vec<Pick> = self.picks.values().cloned().collect();
        let last_completed = last_completed_event(&self.events, now);
        let summary = aggregate_user(user_id, &picks, &self.events, last_completed, now)?;
        let user = self.users.get_mut(&user_id).ok_or_else(|| {
            AppError::NotFound(format!("User {} not found", user_id))
        })?;
        user.points = summary.lifetime;
        user.last_event_points = summary.last_event;
        user.monthly_points = summary.monthly;
        user.yearly_points = summary.yearly;
        Ok(())
    }

    /// Recompute every user's rolling totals. The last-completed-event
    /// bucket is shared by all users, so this runs as one batch.
    fn refresh_users(&mut self, now: NaiveDateTime) -> AppResult<()> {
        let user_ids: Vec<Uuid> = self.users.keys().copied().collect();
        for user_id in user_ids {
            self.refresh_user(user_id, now)?;
        }
        Ok(())
    }

    /// Rebuild the monthly and yearly rank deltas for all users
    fn refresh_ranks(&mut self, now: NaiveDateTime) -> AppResult<()> {
        if self.users.is_empty() {
            return Ok(());
        }

        let picks: Vec<Pick> = self.picks.values().cloned().collect();
        let last_completed = last_completed_event(&self.events, now);
        let contributions = last_event_contributions(&picks, last_completed);
        let users: Vec<User> = self.users.values().cloned().collect();

        let monthly = rank_and_delta(
            &users,
            RankField::Monthly,
            &contributions,
            last_completed.is_some(),
        )?;
        let yearly = rank_and_delta(
            &users,
            RankField::Yearly,
            &contributions,
            last_completed.is_some(),
        )?;

        for user in self.users.values_mut() {
            user.monthly_rank_delta = monthly[&user.id].delta;
            user.yearly_rank_delta = yearly[&user.id].delta;
        }
        Ok(())
    }
}
