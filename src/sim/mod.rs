//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps come in through `TickInput`, never from the system clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod registry;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{ManualTimeSource, SessionClock, SystemTimeSource, TimeSource};
pub use collision::{Aabb, Resolution, resolve_items};
pub use difficulty::{fall_speed_for, speed_level_for};
pub use registry::ItemRegistry;
pub use session::Command;
pub use spawner::{Spawner, choose_kind};
pub use state::{
    Catcher, FallingItem, Field, GameEvent, GamePhase, GameState, ItemKind, ObjectView, Snapshot,
};
pub use tick::{TickInput, tick};
