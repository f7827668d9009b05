//! Per-frame simulation update
//!
//! `World` is the context object the host owns: the state machine, the
//! player and the active level. The host calls `tick` once per frame and
//! forwards touch input; the renderer reads positions back out.

use glam::Vec2;

use super::collision::{blocking_wall, resolve_enemy_collisions};
use super::entity::Mobile;
use super::level::{Level, LevelData, LevelError, PrototypeTable};
use super::rect::Rect;
use super::state::{GameState, PlayerState, SimulationState};
use crate::tuning::Tuning;
use crate::{clamp_or_center, drag_heading};

/// Everything the simulation owns
#[derive(Debug, Clone)]
pub struct World {
    state: SimulationState,
    player: Mobile,
    level: Option<Level>,
    tuning: Tuning,
    /// Where the current touch started (screen coordinates)
    press_origin: Option<Vec2>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl World {
    /// An empty world; call `load_level` before ticking
    pub fn new(tuning: Tuning) -> Self {
        let player = Mobile::player(tuning.player_width, tuning.player_height, tuning.max_speed);
        Self {
            state: SimulationState::new(),
            player,
            level: None,
            tuning,
            press_origin: None,
        }
    }

    /// Build and swap in a new level
    ///
    /// On error the current level, player and state are left untouched.
    /// On success the player is moved to the spawn point (pulled inside the
    /// map) and stopped, and the state machine restarts Paused/Frozen with
    /// its clocks at zero.
    pub fn load_level(&mut self, data: &LevelData, prototypes: &PrototypeTable) -> Result<(), LevelError> {
        let (level, spawn) = Level::build(data, prototypes)
            .and_then(|level| {
                let spawn = level.spawn_rect(self.player.rect.size())?;
                Ok((level, spawn))
            })
            .inspect_err(|e| {
                log::warn!("Level load rejected: {e}");
            })?;
        log::info!(
            "Level loaded: {}x{} map, {} patterns, {} enemies, {} walls",
            level.map_size.x,
            level.map_size.y,
            level.patterns.len(),
            level.enemies.len(),
            level.walls.len()
        );

        self.player.rect = spawn;
        self.player.stop();
        self.state = SimulationState::new();
        self.press_origin = None;
        self.level = Some(level);
        Ok(())
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let Some(dt) = self.state.advance(dt) else {
            return;
        };

        match self.state.player_state {
            PlayerState::Frozen => {
                for enemy in &mut level.enemies {
                    enemy.advance(dt);
                }
            }
            PlayerState::Moving => {
                let before = self.player.position();
                self.player.advance(dt);
                self.player.rect.clamp_within(level.map_size);
                if let Some(wall) = blocking_wall(&self.player.rect, &level.walls) {
                    log::debug!("Player move blocked by wall {wall}");
                    self.player.rect.set_position(before);
                }

                let frozen = resolve_enemy_collisions(&self.player.rect, &mut level.enemies);
                if frozen > 0 {
                    log::debug!("{frozen} enemies frozen at {:.2}s", self.state.game_time);
                }
                for enemy in &mut level.enemies {
                    enemy.advance(dt);
                }
            }
        }
    }

    // === State transitions ===

    pub fn pause(&mut self) {
        self.state.pause();
    }

    pub fn resume(&mut self) {
        self.state.resume();
    }

    pub fn set_game_over(&mut self) {
        self.state.set_game_over();
    }

    // === Input ===

    /// Touch down at `pos` (screen coordinates); ignored unless running
    pub fn on_press_start(&mut self, pos: Vec2) {
        if self.state.set_moving() {
            self.press_origin = Some(pos);
        }
    }

    /// Touch dragged to `pos`, having started at `origin`
    pub fn on_drag(&mut self, pos: Vec2, origin: Vec2) {
        if !self.state.is_running() {
            return;
        }
        let (angle, fraction) = drag_heading(pos, origin, self.tuning.max_drag_distance);
        self.player.set_direction(angle, fraction);
    }

    /// Touch dragged to `pos`, measured from the last `on_press_start`
    pub fn on_drag_from_press(&mut self, pos: Vec2) {
        if let Some(origin) = self.press_origin {
            self.on_drag(pos, origin);
        }
    }

    /// Touch released
    pub fn on_press_end(&mut self) {
        self.press_origin = None;
        if self.state.set_frozen() {
            self.player.stop();
        }
    }

    // === Read access ===

    /// Copy of the clocks and states
    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn game_state(&self) -> GameState {
        self.state.game_state
    }

    pub fn player_state(&self) -> PlayerState {
        self.state.player_state
    }

    pub fn player(&self) -> &Mobile {
        &self.player
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.position()
    }

    pub fn player_velocity(&self) -> Vec2 {
        self.player.velocity()
    }

    pub fn player_rotation(&self) -> f32 {
        self.player.rotation_degrees()
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn enemies(&self) -> &[Mobile] {
        self.level.as_ref().map(|l| l.enemies.as_slice()).unwrap_or(&[])
    }

    pub fn walls(&self) -> &[Rect] {
        self.level.as_ref().map(|l| l.walls.as_slice()).unwrap_or(&[])
    }

    /// Map bounds, zero before the first level load
    pub fn map_size(&self) -> Vec2 {
        self.level.as_ref().map_or(Vec2::ZERO, |l| l.map_size)
    }

    /// Camera centre following the player without showing outside the map
    pub fn camera_focus(&self, viewport: Vec2) -> Vec2 {
        let map = self.map_size();
        let half = viewport / 2.0;
        let pos = self.player.position();
        Vec2::new(
            clamp_or_center(pos.x, half.x, map.x - half.x),
            clamp_or_center(pos.y, half.y, map.y - half.y),
        )
    }
}
