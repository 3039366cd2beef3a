pub mod scoreboard;

pub use scoreboard::Scoreboard;
