//! Game and player state machine
//!
//! Two orthogonal axes: `GameState` decides whether the world simulates at
//! all, `PlayerState` decides which update branch runs. Requests that are not
//! allowed from the current state are ignored.

use serde::{Deserialize, Serialize};

/// Whether the simulation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Running,
    Paused,
    /// Terminal until the next level load
    GameOver,
}

/// Whether the player is steering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No touch held; only enemies move
    Frozen,
    /// Touch held; the player moves and collides
    Moving,
}

/// Clock and state machine for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub game_state: GameState,
    pub player_state: PlayerState,
    /// Seconds since the last player state change (renderer frame lookup only)
    pub state_time: f32,
    /// Seconds simulated while running
    pub game_time: f32,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            game_state: GameState::Paused,
            player_state: PlayerState::Frozen,
            state_time: 0.0,
            game_time: 0.0,
        }
    }
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.game_state == GameState::Running
    }

    /// Running -> Paused; also drops the player to Frozen
    pub fn pause(&mut self) {
        if self.game_state != GameState::Running {
            log::trace!("pause ignored in {:?}", self.game_state);
            return;
        }
        self.game_state = GameState::Paused;
        self.set_player_state(PlayerState::Frozen);
        log::info!("Game paused at {:.2}s", self.game_time);
    }

    /// Paused -> Running
    pub fn resume(&mut self) {
        if self.game_state != GameState::Paused {
            log::trace!("resume ignored in {:?}", self.game_state);
            return;
        }
        self.game_state = GameState::Running;
        log::info!("Game running");
    }

    /// Running -> GameOver
    pub fn set_game_over(&mut self) {
        if self.game_state != GameState::Running {
            log::trace!("game over ignored in {:?}", self.game_state);
            return;
        }
        self.game_state = GameState::GameOver;
        log::info!("Game over at {:.2}s", self.game_time);
    }

    /// Player released the screen. Returns false if not running.
    pub fn set_frozen(&mut self) -> bool {
        self.request_player_state(PlayerState::Frozen)
    }

    /// Player touched the screen. Returns false if not running.
    pub fn set_moving(&mut self) -> bool {
        self.request_player_state(PlayerState::Moving)
    }

    fn request_player_state(&mut self, next: PlayerState) -> bool {
        if !self.is_running() {
            log::trace!("{next:?} ignored in {:?}", self.game_state);
            return false;
        }
        self.set_player_state(next);
        true
    }

    fn set_player_state(&mut self, next: PlayerState) {
        self.player_state = next;
        self.state_time = 0.0;
    }

    /// Advance the clocks. Returns the step the world should simulate, or
    /// `None` when it should not simulate at all.
    ///
    /// Negative or non-finite `dt` counts as zero.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if !self.is_running() {
            return None;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.game_time += dt;
        self.state_time += dt;
        Some(dt)
    }
}
