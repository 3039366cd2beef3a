use crate::error::{AppError, AppResult};
use crate::models::{Fight, FightCategory, FightOutcome, Method, Pick};
use tracing::debug;

/// Base award for picking the winner
pub const WINNER_POINTS: i64 = 3;
/// Bonus for a correct pick on a title fight
pub const TITLE_BONUS: i64 = 6;
/// Bonus for a correct pick on a non-title main event
pub const MAIN_EVENT_BONUS: i64 = 3;
/// "Mitada": bonus when a pick is the only one in the fight's whole pick
/// set to name the winner
pub const LONE_PICK_BONUS: i64 = 9;
/// Bonus for predicting the finish method
pub const METHOD_BONUS: i64 = 2;
/// Bonus for predicting the round (or decision type), on top of the method
pub const ROUND_BONUS: i64 = 1;

/// Compute `points_earned` for every pick of one fight.
///
/// Returns new pick records; the caller persists them. An unresolved
/// fight is a defined no-op where every pick scores zero. The lone-pick
/// bonus depends on the complete pick set, so this must be called with
/// all picks for the fight, never per pick. Recomputing from the same
/// inputs always yields the same awards.
pub fn score_fight(fight: &Fight, picks: &[Pick]) -> AppResult<Vec<Pick>> {
    for pick in picks {
        if pick.fight_id != fight.id {
            return Err(AppError::InvalidState(format!(
                "Pick {} belongs to fight {}, not {}",
                pick.id, pick.fight_id, fight.id
            )));
        }
        if pick.event_id != fight.event_id {
            return Err(AppError::InvalidState(format!(
                "Pick {} references event {} but the fight belongs to {}",
                pick.id, pick.event_id, fight.event_id
            )));
        }
        if !fight.has_fighter(pick.fighter_id) {
            return Err(AppError::MissingReference(format!(
                "Pick {} names fighter {} who is not in the fight",
                pick.id, pick.fighter_id
            )));
        }
        pick.validate().map_err(AppError::InvalidState)?;
    }

    let outcome = match fight.outcome().map_err(AppError::InvalidState)? {
        Some(outcome) => outcome,
        None => {
            // Not resolved yet: everything scores zero
            return Ok(picks
                .iter()
                .map(|pick| {
                    let mut pick = pick.clone();
                    pick.points_earned = 0;
                    pick
                })
                .collect());
        }
    };

    debug!(
        "Scoring fight {}: {} picks, method {}",
        fight.id,
        picks.len(),
        outcome.method
    );

    let correct_count = match outcome.winner_id {
        Some(winner_id) => picks.iter().filter(|p| p.fighter_id == winner_id).count(),
        None => 0,
    };

    Ok(picks
        .iter()
        .map(|pick| {
            let mut pick = pick.clone();
            pick.points_earned = score_pick(fight, &outcome, &pick, correct_count);
            pick
        })
        .collect())
}

fn score_pick(fight: &Fight, outcome: &FightOutcome, pick: &Pick, correct_count: usize) -> i64 {
    // Draws and no-contests have no winner; every pick misses
    let winner_id = match outcome.winner_id {
        Some(winner_id) => winner_id,
        None => return 0,
    };
    if pick.fighter_id != winner_id {
        return 0;
    }

    let mut points = WINNER_POINTS;

    // Title and main-event bonuses are mutually exclusive
    if fight.is_title {
        points += TITLE_BONUS;
    } else if fight.category == FightCategory::MainEvent {
        points += MAIN_EVENT_BONUS;
    }

    if correct_count == 1 {
        points += LONE_PICK_BONUS;
    }

    // Method and round match by substring against the canonical label,
    // e.g. "DEC" is contained in "DEC (Unânime)"
    if outcome.method.contains(pick.method.as_str()) {
        points += METHOD_BONUS;

        let round_correct = match pick.method {
            Method::Dec => outcome.method.contains(&pick.round),
            Method::KoTko | Method::Sub => outcome.round_end == pick.round,
        };
        if round_correct {
            points += ROUND_BONUS;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FightResult;
    use uuid::Uuid;

    fn resolved_fight(category: FightCategory, is_title: bool) -> Fight {
        let mut fight = Fight::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            category,
            is_title,
            Some(1),
        );
        fight.result = Some(FightResult::Win);
        fight.winner_id = Some(fight.red_fighter_id);
        fight.method = Some("KO/TKO (Punch)".to_string());
        fight.round_end = Some("R1".to_string());
        fight
    }

    fn pick_for(fight: &Fight, fighter_id: Uuid, method: Method, round: &str) -> Pick {
        Pick::new(
            Uuid::new_v4(),
            fight.event_id,
            fight.id,
            fighter_id,
            method,
            round.to_string(),
        )
    }

    #[test]
    fn test_unresolved_fight_scores_zero() {
        let mut fight = resolved_fight(FightCategory::MainCard, false);
        fight.result = None;
        fight.winner_id = None;
        fight.method = None;
        fight.round_end = None;

        let picks = vec![pick_for(&fight, fight.red_fighter_id, Method::KoTko, "R1")];
        let scored = score_fight(&fight, &picks).unwrap();
        assert_eq!(scored[0].points_earned, 0);
    }

    #[test]
    fn test_partial_outcome_is_rejected() {
        let mut fight = resolved_fight(FightCategory::MainCard, false);
        fight.round_end = None;
        let picks = vec![pick_for(&fight, fight.red_fighter_id, Method::KoTko, "R1")];
        assert!(score_fight(&fight, &picks).is_err());
    }

    #[test]
    fn test_wrong_winner_scores_zero() {
        let fight = resolved_fight(FightCategory::MainCard, false);
        let picks = vec![pick_for(&fight, fight.blue_fighter_id, Method::KoTko, "R1")];
        let scored = score_fight(&fight, &picks).unwrap();
        assert_eq!(scored[0].points_earned, 0);
    }

    #[test]
    fn test_title_fight_full_house() {
        let fight = resolved_fight(FightCategory::MainEvent, true);
        let picks = vec![
            pick_for(&fight, fight.red_fighter_id, Method::KoTko, "R1"),
            pick_for(&fight, fight.blue_fighter_id, Method::Sub, "R2"),
        ];
        let scored = score_fight(&fight, &picks).unwrap();
        // 3 win + 6 title + 9 lone + 2 method + 1 round; no main-event
        // bonus on top of the title bonus
        assert_eq!(scored[0].points_earned, 21);
        assert_eq!(scored[1].points_earned, 0);
    }

    #[test]
    fn test_lone_pick_bonus_requires_exactly_one() {
        let fight = resolved_fight(FightCategory::Prelim, false);
        let solo = vec![pick_for(&fight, fight.red_fighter_id, Method::Sub, "R3")];
        let scored = score_fight(&fight, &solo).unwrap();
        // 3 win + 9 lone; wrong method, no method or round bonus
        assert_eq!(scored[0].points_earned, 12);

        let shared = vec![
            pick_for(&fight, fight.red_fighter_id, Method::Sub, "R3"),
            pick_for(&fight, fight.red_fighter_id, Method::KoTko, "R2"),
        ];
        let scored = score_fight(&fight, &shared).unwrap();
        // Two correct winner picks: nobody gets the lone bonus
        assert_eq!(scored[0].points_earned, 3);
        assert_eq!(scored[1].points_earned, 3 + METHOD_BONUS);
    }

    #[test]
    fn test_decision_round_matches_by_decision_type() {
        let mut fight = resolved_fight(FightCategory::MainEvent, false);
        fight.method = Some("DEC (Unânime)".to_string());
        fight.round_end = Some("Unânime".to_string());

        let picks = vec![
            pick_for(&fight, fight.red_fighter_id, Method::Dec, "Unânime"),
            pick_for(&fight, fight.red_fighter_id, Method::Dec, "Dividida"),
        ];
        let scored = score_fight(&fight, &picks).unwrap();
        // 3 win + 3 main event + 2 method + 1 decision type
        assert_eq!(scored[0].points_earned, 9);
        // Wrong decision type still earns the method bonus
        assert_eq!(scored[1].points_earned, 8);
    }

    #[test]
    fn test_round_bonus_requires_method() {
        let mut fight = resolved_fight(FightCategory::MainCard, false);
        fight.method = Some("SUB (Rear Naked Choke)".to_string());
        // Right round, wrong method: no method bonus, so no round bonus
        let picks = vec![pick_for(&fight, fight.red_fighter_id, Method::KoTko, "R1")];
        let scored = score_fight(&fight, &picks).unwrap();
        assert_eq!(scored[0].points_earned, WINNER_POINTS + LONE_PICK_BONUS);
    }

    #[test]
    fn test_draw_scores_everyone_zero() {
        let mut fight = resolved_fight(FightCategory::MainCard, false);
        fight.result = Some(FightResult::Draw);
        fight.winner_id = None;
        fight.method = Some("DEC (Dividida)".to_string());
        fight.round_end = Some("Dividida".to_string());

        let picks = vec![
            pick_for(&fight, fight.red_fighter_id, Method::Dec, "Dividida"),
            pick_for(&fight, fight.blue_fighter_id, Method::KoTko, "R3"),
        ];
        let scored = score_fight(&fight, &picks).unwrap();
        assert!(scored.iter().all(|p| p.points_earned == 0));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let fight = resolved_fight(FightCategory::MainEvent, true);
        let picks = vec![
            pick_for(&fight, fight.red_fighter_id, Method::KoTko, "R1"),
            pick_for(&fight, fight.blue_fighter_id, Method::Dec, "Unânime"),
        ];
        let once = score_fight(&fight, &picks).unwrap();
        let twice = score_fight(&fight, &once).unwrap();
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.points_earned, b.points_earned);
        }
    }

    #[test]
    fn test_foreign_pick_is_rejected() {
        let fight = resolved_fight(FightCategory::MainCard, false);
        let mut pick = pick_for(&fight, fight.red_fighter_id, Method::KoTko, "R1");
        pick.fight_id = Uuid::new_v4();
        assert!(score_fight(&fight, &[pick]).is_err());
    }

    #[test]
    fn test_unknown_fighter_is_rejected() {
        let fight = resolved_fight(FightCategory::MainCard, false);
        let pick = pick_for(&fight, Uuid::new_v4(), Method::KoTko, "R1");
        let err = score_fight(&fight, &[pick]).unwrap_err();
        assert!(matches!(err, AppError::MissingReference(_)));
    }
}
