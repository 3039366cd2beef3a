//! FightPicks Backend
//!
//! Entry point for offline recomputation: loads a JSON snapshot of
//! events, fights, picks and users, reruns the full scoring, aggregation
//! and ranking pipeline, and prints the current leaderboards.

use anyhow::{anyhow, Context, Result};
use fightpicks_backend::engine::Period;
use fightpicks_backend::{AppConfig, Scoreboard};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow!(e))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| config.snapshot_path.clone())
        .context("Usage: fightpicks-backend <snapshot.json> (or set SNAPSHOT_PATH)")?;

    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read snapshot {}", path))?;
    let mut board: Scoreboard = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse snapshot {}", path))?;

    let now = chrono::Utc::now().naive_utc();
    info!("Recomputing scoreboard from {} as of {}", path, now);
    board.refresh(now)?;

    for period in [Period::Week, Period::Month, Period::Year, Period::All] {
        let entries = board.leaderboard(period, None)?;
        let output = serde_json::json!({
            "period": period.as_str(),
            "entries": entries,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
