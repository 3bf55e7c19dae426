//! Catch and floor-exit resolution
//!
//! Screen coordinates: y grows downward, the floor is at `field.height`.

use glam::Vec2;

use super::state::{GameEvent, GameState, clamp_score};

/// Axis-aligned box, `min` top-left and `max` bottom-right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Overlap test with inclusive edges (touching counts)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}

/// What happened to one item this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Overlapped the catcher; signed score delta applied
    Caught { delta: i64 },
    /// Coin fell past the floor; misses charged
    Missed { penalty: u32 },
    /// Stone fell past the floor; no penalty
    Discarded,
}

/// Test every unresolved item against the catcher, then the floor
///
/// Items are only marked resolved here; removal happens in the compact pass.
/// Returns true once the miss limit is reached, at which point the remaining
/// items are left untouched.
pub fn resolve_items(state: &mut GameState) -> bool {
    let hitbox = state.catcher.hitbox(&state.field, &state.tuning);
    let floor_y = state.field.height;
    let miss_limit = state.tuning.miss_limit;

    for item in state.items.iter_mut() {
        if item.resolved {
            continue;
        }

        let resolution = if item.bounds().overlaps(&hitbox) {
            Resolution::Caught {
                delta: state.tuning.points_of(item.kind),
            }
        } else if item.top_y() > floor_y {
            match state.tuning.miss_penalty(item.kind) {
                0 => Resolution::Discarded,
                penalty => Resolution::Missed { penalty },
            }
        } else {
            continue;
        };

        item.resolved = true;
        match resolution {
            Resolution::Caught { delta } => {
                state.score = clamp_score(state.score, delta);
                state.high_score = state.high_score.max(state.score);
                state.events.push(GameEvent::ScorePopup {
                    x: item.center_x(),
                    y: item.top_y(),
                    delta,
                });
            }
            Resolution::Missed { penalty } => {
                state.miss_count = state.miss_count.saturating_add(penalty);
                state.events.push(GameEvent::ItemMissed {
                    id: item.id,
                    kind: item.kind,
                    penalty,
                });
                if state.miss_count >= miss_limit {
                    return true;
                }
            }
            Resolution::Discarded => {}
        }
    }

    false
}
