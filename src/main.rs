//! Coin Catch entry point
//!
//! Runs a headless demo session: the autopilot plays until the miss limit
//! ends the game, and every notable event is logged.
//! (set `RUST_LOG=debug` to see every spawn)

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use coin_catch::consts::TICK_MS;
use coin_catch::highscores::HighScoreEntry;
use coin_catch::sim::{
    Field, GameEvent, GameState, ManualTimeSource, SystemTimeSource, TickInput, TimeSource, tick,
};
use coin_catch::{HighScores, Tuning};

/// Stop a demo that somehow never ends (one hour of play at 60 Hz)
const MAX_DEMO_TICKS: u64 = 60 * 60 * 60;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// RNG seed; defaults to the current time
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// JSON file with balance overrides
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Leaderboard JSON, read before the session and written after it
    #[arg(long, value_name = "PATH")]
    scores: Option<PathBuf>,

    /// Pace ticks against the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,
}

fn unix_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

fn load_tuning(path: &Path) -> Result<Tuning, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let tuning = Tuning::from_json(&json).map_err(|e| format!("{}: {}", path.display(), e))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

/// A missing board is a fresh one
fn load_scores(path: &Path) -> HighScores {
    match std::fs::read_to_string(path) {
        Ok(json) => HighScores::from_json(&json),
        Err(err) => {
            log::info!("No high scores at {} ({}), starting fresh", path.display(), err);
            HighScores::new()
        }
    }
}

fn save_scores(path: &Path, scores: &HighScores) {
    if let Err(err) = std::fs::write(path, scores.to_json()) {
        log::error!("Failed to save high scores to {}: {}", path.display(), err);
    }
}

/// Drive one autopilot session; returns the final score and level
fn run_session<T: TimeSource>(state: &mut GameState, time: &mut T) -> Option<(u64, u8)> {
    let field = Field::default();
    for step in 0..MAX_DEMO_TICKS {
        let input = TickInput {
            now_ms: time.now_ms(),
            field,
            idle_mode: true,
            ..Default::default()
        };
        let snapshot = tick(state, &input);

        for event in &snapshot.events {
            match event {
                GameEvent::SpeedLevelChanged { level } => {
                    log::info!("Speed level {} (score {})", level, snapshot.score);
                }
                GameEvent::ItemMissed { kind, penalty, .. } => {
                    log::debug!(
                        "Missed {:?} (+{} misses, total {})",
                        kind,
                        penalty,
                        snapshot.miss_count
                    );
                }
                GameEvent::GameOver { final_score } => {
                    return Some((*final_score, snapshot.speed_level));
                }
                GameEvent::ScorePopup { .. } | GameEvent::ItemRemoved { .. } => {}
            }
        }

        if step > 0 && step % 600 == 0 {
            log::info!(
                "t={:.0}s score={} best={} misses={} level={} in-flight={}",
                step as f64 * TICK_MS / 1000.0,
                snapshot.score,
                snapshot.high_score,
                snapshot.miss_count,
                snapshot.speed_level,
                snapshot.objects.len()
            );
        }

        time.wait_ms(TICK_MS);
    }
    None
}

fn main() {
    env_logger::init();
    let args = CliArgs::parse();

    let tuning = match args.tuning.as_deref().map(load_tuning).transpose() {
        Ok(tuning) => tuning.unwrap_or_default(),
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(2);
        }
    };
    let mut high_scores = args
        .scores
        .as_deref()
        .map(load_scores)
        .unwrap_or_default();

    let seed = args.seed.unwrap_or_else(|| unix_ms() as u64);
    log::info!("Coin Catch (headless demo) starting with seed {}", seed);
    let mut state = GameState::with_tuning(seed, tuning);
    state.set_high_score(high_scores.best());

    let result = if args.realtime {
        run_session(&mut state, &mut SystemTimeSource::new())
    } else {
        run_session(&mut state, &mut ManualTimeSource::default())
    };

    match result {
        Some((score, level)) => {
            let rank = high_scores.record(HighScoreEntry {
                score,
                speed_level: level,
                timestamp: unix_ms(),
            });
            println!(
                "Final score: {} (best {}, speed level {}, {} ticks){}",
                score,
                state.high_score,
                level,
                state.time_ticks,
                rank.map(|r| format!(", leaderboard rank #{}", r))
                    .unwrap_or_default()
            );
            match args.scores.as_deref() {
                Some(path) => save_scores(path, &high_scores),
                None => println!("{}", high_scores.to_json()),
            }
        }
        None => {
            log::warn!("Demo hit the tick limit without a game over");
            println!("Score after {} ticks: {}", MAX_DEMO_TICKS, state.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("coin-catch-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_cli_accepts_equals_and_flags() {
        let args =
            CliArgs::try_parse_from(["coin-catch", "--seed=5", "--realtime", "--scores", "s.json"])
                .unwrap();
        assert_eq!(args.seed, Some(5));
        assert!(args.realtime);
        assert_eq!(args.scores, Some(PathBuf::from("s.json")));
        assert_eq!(args.tuning, None);
    }

    #[test]
    fn test_cli_rejects_bad_seed_and_unknown_flag() {
        assert!(CliArgs::try_parse_from(["coin-catch", "--seed", "abc"]).is_err());
        assert!(CliArgs::try_parse_from(["coin-catch", "--fast"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_load_tuning_reports_invalid_file() {
        let path = scratch_path("bad-tuning.json");
        std::fs::write(&path, r#"{"miss_limit": 0}"#).unwrap();
        let err = load_tuning(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.contains("miss_limit"), "{}", err);
        assert!(load_tuning(&scratch_path("missing-tuning.json")).is_err());
    }

    #[test]
    fn test_scores_file_seeds_best_score() {
        let path = scratch_path("scores.json");
        let mut board = HighScores::new();
        board.record(HighScoreEntry {
            score: 77,
            speed_level: 3,
            timestamp: 0.0,
        });
        save_scores(&path, &board);

        let loaded = load_scores(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, board);

        let mut state = GameState::new(1);
        state.set_high_score(loaded.best());
        assert_eq!(state.snapshot().high_score, 77);

        assert!(load_scores(&scratch_path("missing-scores.json")).is_empty());
    }
}
