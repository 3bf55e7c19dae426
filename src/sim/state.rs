//! Game state and core simulation types
//!
//! Everything the tick loop mutates lives in [`GameState`]; the renderer only
//! ever sees [`Snapshot`]s.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SessionClock;
use super::collision::Aabb;
use super::registry::ItemRegistry;
use super::spawner::Spawner;
use crate::consts::CATCHER_START_PERCENT;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Game is paused (clock and spawner frozen)
    Paused,
    /// Miss limit reached
    GameOver,
}

impl GamePhase {
    /// A session exists (playing or paused)
    pub fn is_running(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Paused)
    }
}

/// Falling item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    BigCoin,
    SmallCoin,
    Stone,
}

impl ItemKind {
    pub fn is_coin(self) -> bool {
        !matches!(self, ItemKind::Stone)
    }
}

/// A falling item
#[derive(Debug, Clone, PartialEq)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// x = horizontal centre, y = top edge
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick, fixed at spawn
    pub fall_speed: f32,
    /// Catch or miss already applied, pending removal
    pub resolved: bool,
}

impl FallingItem {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top_y(&self) -> f32 {
        self.pos.y
    }

    /// Axis-aligned bounds (y grows downward)
    pub fn bounds(&self) -> Aabb {
        let half_w = self.size.x / 2.0;
        Aabb::new(
            Vec2::new(self.pos.x - half_w, self.pos.y),
            Vec2::new(self.pos.x + half_w, self.pos.y + self.size.y),
        )
    }

    pub fn view(&self) -> ObjectView {
        ObjectView {
            id: self.id,
            kind: self.kind,
            x: self.pos.x,
            y: self.pos.y,
            width: self.size.x,
            height: self.size.y,
        }
    }
}

/// Play field dimensions in pixels, supplied by the host every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Finite, non-negative dimensions
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// The player's catcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Catcher {
    /// Horizontal centre as a percentage of field width
    pub percent: f32,
}

impl Default for Catcher {
    fn default() -> Self {
        Self {
            percent: CATCHER_START_PERCENT,
        }
    }
}

impl Catcher {
    /// Centre in field pixels
    pub fn center_x(&self, field: &Field) -> f32 {
        self.percent / 100.0 * field.width
    }

    /// Hitbox for the current field
    pub fn hitbox(&self, field: &Field, tuning: &Tuning) -> Aabb {
        let cx = self.center_x(field);
        let half_w = tuning.catcher_width / 2.0;
        Aabb::new(
            Vec2::new(cx - half_w, field.height - tuning.catcher_top_offset),
            Vec2::new(cx + half_w, field.height - tuning.catcher_bottom_offset),
        )
    }
}

/// Events emitted during a tick, for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Item caught; show the signed delta at the item's position
    ScorePopup { x: f32, y: f32, delta: i64 },
    /// Coin reached the floor
    ItemMissed { id: u32, kind: ItemKind, penalty: u32 },
    /// Item left the registry
    ItemRemoved { id: u32 },
    /// Difficulty changed
    SpeedLevelChanged { level: u8 },
    /// Session ended
    GameOver { final_score: u64 },
}

/// Render-facing view of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: u32,
    pub kind: ItemKind,
    /// Horizontal centre
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Per-tick output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub miss_count: u32,
    pub speed_level: u8,
    pub catcher_percent: f32,
    pub objects: Vec<ObjectView>,
    pub events: Vec<GameEvent>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    /// Best score seen (updated live as the score climbs)
    pub high_score: u64,
    pub miss_count: u32,
    /// 1..=max_speed_level
    pub speed_level: u8,
    /// Simulation ticks advanced while playing
    pub time_ticks: u64,
    pub clock: SessionClock,
    pub spawner: Spawner,
    pub items: ItemRegistry,
    pub catcher: Catcher,
    /// Last field dimensions supplied by the host
    pub field: Field,
    /// Timestamp of the previous tick
    pub last_tick_ms: Option<f64>,
    /// Events collected this tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            miss_count: 0,
            speed_level: 1,
            time_ticks: 0,
            clock: SessionClock::default(),
            spawner: Spawner::default(),
            items: ItemRegistry::new(),
            catcher: Catcher::default(),
            field: Field::default(),
            last_tick_ms: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed the best score (e.g. from a stored leaderboard)
    pub fn set_high_score(&mut self, high_score: u64) {
        self.high_score = self.high_score.max(high_score);
    }

    /// Drop every in-flight item, reporting each removal
    pub fn clear_items(&mut self) {
        for id in self.items.clear() {
            self.events.push(GameEvent::ItemRemoved { id });
        }
    }

    /// Build the render snapshot, draining this tick's events
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            miss_count: self.miss_count,
            speed_level: self.speed_level,
            catcher_percent: self.catcher.percent,
            objects: self.items.iter().map(FallingItem::view).collect(),
            events: std::mem::take(&mut self.events),
        }
    }
}

/// `max(0, score + delta)` without overflow
pub fn clamp_score(score: u64, delta: i64) -> u64 {
    if delta >= 0 {
        score.saturating_add(delta as u64)
    } else {
        score.saturating_sub(delta.unsigned_abs())
    }
}
