//! Fixed-rate simulation tick
//!
//! Per tick: command → pointer → spawn → advance → resolve/compact →
//! difficulty. Deterministic for a given seed and input sequence.

use super::collision::resolve_items;
use super::difficulty::{fall_speed_for, speed_level_for};
use super::session::Command;
use super::spawner::roll_item;
use super::state::{Field, GameEvent, GamePhase, GameState, ItemKind, Snapshot};

/// Maximum catcher travel per tick in idle/demo mode (pixels)
const AUTOPILOT_MAX_STEP: f32 = 9.0;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic timestamp of this tick (ms)
    pub now_ms: f64,
    /// Current play field size
    pub field: Field,
    /// Latest pointer x in field pixels
    pub pointer_x: Option<f32>,
    /// At most one UI command per tick
    pub command: Option<Command>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game by one tick and return the render snapshot
pub fn tick(state: &mut GameState, input: &TickInput) -> Snapshot {
    let now_ms = input.now_ms;
    if input.field.is_valid() {
        state.field = input.field;
    }

    // Idle/demo mode starts a session on its own
    let command = match input.command {
        None if input.idle_mode && !state.phase.is_running() => Some(Command::Start),
        command => command,
    };
    if let Some(command) = command {
        state.apply_command(command, now_ms);
    }

    let pointer_x = if input.idle_mode {
        autopilot_pointer(state).or(input.pointer_x)
    } else {
        input.pointer_x
    };
    if let Some(x) = pointer_x {
        state.set_pointer(x);
    }

    let elapsed_ms = state
        .last_tick_ms
        .map(|last| (now_ms - last).max(0.0))
        .unwrap_or(0.0);
    state.last_tick_ms = Some(now_ms);

    // Paused, idle and game over freeze everything
    if state.phase != GamePhase::Playing {
        return state.snapshot();
    }

    state.time_ticks += 1;

    if state
        .spawner
        .advance(elapsed_ms, state.tuning.spawn_interval_ms)
    {
        spawn_item(state);
    }

    state.items.advance();

    let limit_reached = resolve_items(state);
    for id in state.items.compact(state.field.height) {
        state.events.push(GameEvent::ItemRemoved { id });
    }
    if limit_reached {
        state.game_over();
        return state.snapshot();
    }

    update_speed_level(state, now_ms);

    state.snapshot()
}

/// Spawn one item using the speed level in effect right now
fn spawn_item(state: &mut GameState) {
    let id = state.items.next_entity_id();
    let fall_speed = fall_speed_for(state.speed_level, &state.tuning);
    let item = roll_item(&mut state.rng, id, &state.field, &state.tuning, fall_speed);
    log::debug!(
        "Spawned {:?} #{} at x={:.1} (speed {:.2})",
        item.kind,
        id,
        item.center_x(),
        fall_speed
    );
    state.items.insert(item);
}

fn update_speed_level(state: &mut GameState, now_ms: f64) {
    let Some(active_ms) = state.clock.active_elapsed_ms(now_ms) else {
        return;
    };
    let level = speed_level_for(active_ms, &state.tuning);
    if level != state.speed_level {
        state.speed_level = level;
        state.events.push(GameEvent::SpeedLevelChanged { level });
        log::info!("Speed level {} after {:.0}s active", level, active_ms / 1000.0);
    }
}

/// Steer toward the lowest coin still above the catcher's bottom edge
///
/// Big coins win ties; stones are ignored.
fn autopilot_pointer(state: &GameState) -> Option<f32> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    let band_bottom = state.field.height - state.tuning.catcher_bottom_offset;
    let target = state
        .items
        .iter()
        .filter(|item| !item.resolved && item.kind.is_coin() && item.top_y() <= band_bottom)
        .max_by(|a, b| {
            let a_bottom = a.bounds().max.y;
            let b_bottom = b.bounds().max.y;
            a_bottom
                .partial_cmp(&b_bottom)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    (a.kind == ItemKind::BigCoin).cmp(&(b.kind == ItemKind::BigCoin))
                })
        })?;

    let current = state.catcher.center_x(&state.field);
    let step = (target.center_x() - current).clamp(-AUTOPILOT_MAX_STEP, AUTOPILOT_MAX_STEP);
    Some(current + step)
}
