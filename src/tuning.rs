//! Data-driven game balance
//!
//! [`Tuning`] mirrors every balance constant in [`crate::consts`]. A JSON
//! document may override any subset of fields; missing keys keep the
//! compile-time default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::ItemKind;

/// Runtime-tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    pub spawn_interval_ms: f64,
    pub big_coin_weight: f64,
    pub small_coin_weight: f64,
    pub stone_weight: f64,

    // === Item geometry ===
    pub big_coin_size: f32,
    pub small_coin_size: f32,
    pub stone_size: f32,

    // === Scoring ===
    pub big_coin_points: i64,
    pub small_coin_points: i64,
    pub stone_points: i64,
    pub big_coin_miss: u32,
    pub small_coin_miss: u32,
    pub miss_limit: u32,

    // === Difficulty ===
    pub base_fall_speed: f32,
    pub fall_speed_growth: f32,
    pub minutes_per_level: f64,
    pub max_speed_level: u8,

    // === Catcher ===
    pub catcher_width: f32,
    pub catcher_top_offset: f32,
    pub catcher_bottom_offset: f32,
    pub catcher_min_percent: f32,
    pub catcher_max_percent: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            big_coin_weight: BIG_COIN_WEIGHT,
            small_coin_weight: SMALL_COIN_WEIGHT,
            stone_weight: STONE_WEIGHT,

            big_coin_size: BIG_COIN_SIZE,
            small_coin_size: SMALL_COIN_SIZE,
            stone_size: STONE_SIZE,

            big_coin_points: BIG_COIN_POINTS,
            small_coin_points: SMALL_COIN_POINTS,
            stone_points: STONE_POINTS,
            big_coin_miss: BIG_COIN_MISS,
            small_coin_miss: SMALL_COIN_MISS,
            miss_limit: MISS_LIMIT,

            base_fall_speed: BASE_FALL_SPEED,
            fall_speed_growth: FALL_SPEED_GROWTH,
            minutes_per_level: MINUTES_PER_LEVEL,
            max_speed_level: MAX_SPEED_LEVEL,

            catcher_width: CATCHER_WIDTH,
            catcher_top_offset: CATCHER_TOP_OFFSET,
            catcher_bottom_offset: CATCHER_BOTTOM_OFFSET,
            catcher_min_percent: CATCHER_MIN_PERCENT,
            catcher_max_percent: CATCHER_MAX_PERCENT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the effective table)
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(name: &'static str, value: f64, expected: &'static str) -> TuningError {
            TuningError::Invalid {
                name,
                value,
                expected,
            }
        }

        if !(self.spawn_interval_ms > 0.0) {
            return Err(invalid("spawn_interval_ms", self.spawn_interval_ms, "> 0"));
        }
        for (name, weight) in [
            ("big_coin_weight", self.big_coin_weight),
            ("small_coin_weight", self.small_coin_weight),
            ("stone_weight", self.stone_weight),
        ] {
            if !(weight >= 0.0) {
                return Err(invalid(name, weight, ">= 0"));
            }
        }
        // Weights are probabilities; any remainder below 1 goes to the small coin
        let total = self.total_weight();
        if !(total > 0.0 && total <= 1.0 + 1e-9) {
            return Err(invalid("total weight", total, "in (0, 1]"));
        }
        for (name, size) in [
            ("big_coin_size", self.big_coin_size),
            ("small_coin_size", self.small_coin_size),
            ("stone_size", self.stone_size),
            ("catcher_width", self.catcher_width),
        ] {
            if !(size > 0.0) {
                return Err(invalid(name, size as f64, "> 0"));
            }
        }
        if self.miss_limit == 0 {
            return Err(invalid("miss_limit", 0.0, ">= 1"));
        }
        if !(self.base_fall_speed > 0.0) {
            return Err(invalid("base_fall_speed", self.base_fall_speed as f64, "> 0"));
        }
        if !(self.fall_speed_growth >= 1.0) {
            return Err(invalid(
                "fall_speed_growth",
                self.fall_speed_growth as f64,
                ">= 1",
            ));
        }
        if !(self.minutes_per_level > 0.0) {
            return Err(invalid("minutes_per_level", self.minutes_per_level, "> 0"));
        }
        if self.max_speed_level == 0 {
            return Err(invalid("max_speed_level", 0.0, ">= 1"));
        }
        if !(self.catcher_top_offset > self.catcher_bottom_offset) {
            return Err(invalid(
                "catcher_top_offset",
                self.catcher_top_offset as f64,
                "> catcher_bottom_offset",
            ));
        }
        if !(self.catcher_min_percent >= 0.0
            && self.catcher_min_percent <= self.catcher_max_percent
            && self.catcher_max_percent <= 100.0)
        {
            return Err(invalid(
                "catcher_min_percent",
                self.catcher_min_percent as f64,
                "0 <= min <= max <= 100",
            ));
        }
        Ok(())
    }

    pub fn total_weight(&self) -> f64 {
        self.big_coin_weight + self.small_coin_weight + self.stone_weight
    }

    /// Spawn weights in draw order
    pub fn weights(&self) -> [(ItemKind, f64); 3] {
        [
            (ItemKind::BigCoin, self.big_coin_weight),
            (ItemKind::SmallCoin, self.small_coin_weight),
            (ItemKind::Stone, self.stone_weight),
        ]
    }

    /// Square edge length of an item
    pub fn size_of(&self, kind: ItemKind) -> f32 {
        match kind {
            ItemKind::BigCoin => self.big_coin_size,
            ItemKind::SmallCoin => self.small_coin_size,
            ItemKind::Stone => self.stone_size,
        }
    }

    /// Signed score change for catching an item
    pub fn points_of(&self, kind: ItemKind) -> i64 {
        match kind {
            ItemKind::BigCoin => self.big_coin_points,
            ItemKind::SmallCoin => self.small_coin_points,
            ItemKind::Stone => self.stone_points,
        }
    }

    /// Misses charged when the item reaches the floor (stones are free)
    pub fn miss_penalty(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::BigCoin => self.big_coin_miss,
            ItemKind::SmallCoin => self.small_coin_miss,
            ItemKind::Stone => 0,
        }
    }
}
