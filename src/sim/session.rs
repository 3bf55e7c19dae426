//! Session state machine
//!
//! Idle → Playing ⇄ Paused → GameOver → Playing. Every command is valid in
//! every phase; the ones that make no sense are no-ops.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};

/// Commands from the host UI, consumed once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Begin a session from Idle or GameOver
    Start,
    /// Playing ⇄ Paused
    TogglePause,
    /// Begin a fresh session from any phase
    Restart,
}

impl GameState {
    pub fn apply_command(&mut self, command: Command, now_ms: f64) {
        match command {
            Command::Start => self.start(now_ms),
            Command::TogglePause => self.toggle_pause(now_ms),
            Command::Restart => self.restart(now_ms),
        }
    }

    /// Idle/GameOver → Playing with a fresh session
    pub fn start(&mut self, now_ms: f64) {
        match self.phase {
            GamePhase::Idle | GamePhase::GameOver => self.begin_session(now_ms),
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }

    /// Any phase → Playing with a fresh session
    pub fn restart(&mut self, now_ms: f64) {
        self.begin_session(now_ms);
    }

    /// Playing ⇄ Paused; ignored when no session is running
    pub fn toggle_pause(&mut self, now_ms: f64) {
        match self.phase {
            GamePhase::Playing => {
                self.clock.pause(now_ms);
                self.phase = GamePhase::Paused;
                log::info!("Paused at score {}", self.score);
            }
            GamePhase::Paused => {
                self.clock.resume(now_ms);
                self.phase = GamePhase::Playing;
                // Time spent paused never reaches the spawner
                self.last_tick_ms = Some(now_ms);
                log::info!("Resumed");
            }
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    /// End the session once the miss limit is reached
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver || self.miss_count < self.tuning.miss_limit {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.clear_items();
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!(
            "Game over: score {} (level {}, {} misses)",
            self.score,
            self.speed_level,
            self.miss_count
        );
    }

    /// Pointer x in field pixels → catcher centre, clamped to the allowed band
    ///
    /// Non-finite input, a degenerate field, or a session that isn't actively
    /// playing leave the catcher where it is.
    pub fn set_pointer(&mut self, x: f32) {
        if self.phase != GamePhase::Playing || !x.is_finite() || !(self.field.width > 0.0) {
            return;
        }
        let percent = x / self.field.width * 100.0;
        self.catcher.percent = percent.clamp(
            self.tuning.catcher_min_percent,
            self.tuning.catcher_max_percent,
        );
    }

    fn begin_session(&mut self, now_ms: f64) {
        self.clear_items();
        self.score = 0;
        self.miss_count = 0;
        self.speed_level = 1;
        self.time_ticks = 0;
        self.spawner.reset();
        self.clock.start(now_ms);
        self.last_tick_ms = Some(now_ms);
        self.phase = GamePhase::Playing;
        log::info!("Session started (seed {})", self.seed);
    }
}
