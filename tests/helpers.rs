use chrono::{NaiveDate, NaiveDateTime};
use fightpicks_backend::models::*;
use fightpicks_backend::Scoreboard;
use uuid::Uuid;

/// A timestamp on a fixed June 2024 day, for deterministic tests
pub fn june(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Test data fixtures: one card with a title main event and a prelim,
/// and three users
pub struct TestFixtures {
    pub board: Scoreboard,
    pub event: Event,
    pub main_event: Fight,
    pub prelim: Fight,
    pub user1: User,
    pub user2: User,
    pub user3: User,
}

impl TestFixtures {
    /// Create fixtures with sample data; the card starts June 15th 20:00
    pub fn create() -> Self {
        let mut board = Scoreboard::new();

        let event = Event::new("FP 100".to_string(), june(15, 20));
        board.add_event(event.clone());

        let main_event = Fight::new(
            event.id,
            Uuid::new_v4(),
            Uuid::new_v4(),
            FightCategory::MainEvent,
            true,
            Some(12),
        );
        let prelim = Fight::new(
            event.id,
            Uuid::new_v4(),
            Uuid::new_v4(),
            FightCategory::Prelim,
            false,
            Some(2),
        );
        board.add_fight(main_event.clone()).expect("main event");
        board.add_fight(prelim.clone()).expect("prelim");

        let user1 = User::new("user1".to_string(), june(1, 0));
        let user2 = User::new("user2".to_string(), june(1, 0));
        let user3 = User::new("user3".to_string(), june(1, 0));
        board.add_user(user1.clone());
        board.add_user(user2.clone());
        board.add_user(user3.clone());

        Self {
            board,
            event,
            main_event,
            prelim,
            user1,
            user2,
            user3,
        }
    }
}

/// Helper function to build a pick
pub fn make_pick(user: &User, fight: &Fight, fighter_id: Uuid, method: Method, round: &str) -> Pick {
    Pick::new(
        user.id,
        fight.event_id,
        fight.id,
        fighter_id,
        method,
        round.to_string(),
    )
}
