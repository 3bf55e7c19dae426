//! Coin Catch - a falling-object arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, catching, session state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best-score leaderboard
//! - `error`: Error types for the fallible surfaces (tuning loads)

pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate of the external driver (60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;

    /// Milliseconds between spawns while playing
    pub const SPAWN_INTERVAL_MS: f64 = 300.0;

    /// Spawn weights, in draw order: big coin, small coin, stone
    pub const BIG_COIN_WEIGHT: f64 = 0.25;
    pub const SMALL_COIN_WEIGHT: f64 = 0.45;
    pub const STONE_WEIGHT: f64 = 0.30;

    /// Item sizes (square, pixels)
    pub const BIG_COIN_SIZE: f32 = 40.0;
    pub const SMALL_COIN_SIZE: f32 = 25.0;
    pub const STONE_SIZE: f32 = 35.0;

    /// Points awarded on catch
    pub const BIG_COIN_POINTS: i64 = 2;
    pub const SMALL_COIN_POINTS: i64 = 1;
    pub const STONE_POINTS: i64 = -1;

    /// Misses charged when a coin reaches the floor
    pub const BIG_COIN_MISS: u32 = 2;
    pub const SMALL_COIN_MISS: u32 = 1;
    /// Session ends once this many misses accumulate
    pub const MISS_LIMIT: u32 = 50;

    /// Fall speed (pixels per tick) at level 1
    pub const BASE_FALL_SPEED: f32 = 2.0;
    /// Multiplicative fall speed growth per level
    pub const FALL_SPEED_GROWTH: f32 = 1.3;
    /// Active play minutes per speed level
    pub const MINUTES_PER_LEVEL: f64 = 2.5;
    pub const MAX_SPEED_LEVEL: u8 = 5;

    /// Catcher hitbox
    pub const CATCHER_WIDTH: f32 = 120.0;
    /// Catcher band top, measured up from the field floor
    pub const CATCHER_TOP_OFFSET: f32 = 100.0;
    /// Catcher band bottom, measured up from the field floor
    pub const CATCHER_BOTTOM_OFFSET: f32 = 20.0;
    /// Catcher centre clamp, percent of field width
    pub const CATCHER_MIN_PERCENT: f32 = 5.0;
    pub const CATCHER_MAX_PERCENT: f32 = 95.0;
    pub const CATCHER_START_PERCENT: f32 = 50.0;
}
