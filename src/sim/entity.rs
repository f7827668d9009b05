//! Moving entities: the player and path-following enemies
//!
//! Every mobile entity is a `Rect` plus a motion variant. The player
//! integrates a velocity set from drag input; enemies sample a shared
//! `PathPattern` with their own accumulated time.

use std::sync::Arc;

use glam::Vec2;

use super::pattern::PathPattern;
use super::rect::Rect;
use crate::consts::{MAX_SPEED, SPRITE_FORWARD_OFFSET_DEG};

/// Velocity-driven motion from touch input
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMotion {
    pub velocity: Vec2,
    /// Sprite facing (degrees)
    pub rotation_degrees: f32,
    pub max_speed: f32,
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            rotation_degrees: 0.0,
            max_speed: MAX_SPEED,
        }
    }
}

/// Path-following motion
#[derive(Debug, Clone)]
pub struct EnemyMotion {
    /// `None` once the enemy has been frozen by the player
    pattern: Option<Arc<PathPattern>>,
    /// Origin the pattern offsets are applied to
    pub start_point: Vec2,
    /// Seconds accumulated since the pattern was assigned
    pub move_time: f32,
    /// A `Once` pattern ran out; the enemy holds its last position
    finished: bool,
    /// Prototype animation id for the renderer
    pub animation_id: u32,
}

/// What drives a mobile entity
#[derive(Debug, Clone)]
pub enum Motion {
    Player(PlayerMotion),
    Enemy(EnemyMotion),
}

/// A rectangle that moves
#[derive(Debug, Clone)]
pub struct Mobile {
    pub rect: Rect,
    pub motion: Motion,
}

impl Mobile {
    /// A stationary player of the given size
    pub fn player(width: f32, height: f32, max_speed: f32) -> Self {
        Self {
            rect: Rect::with_size(width, height),
            motion: Motion::Player(PlayerMotion {
                max_speed,
                ..Default::default()
            }),
        }
    }

    /// An enemy placed at `start_point`, following `pattern` if any
    pub fn enemy(
        start_point: Vec2,
        width: f32,
        height: f32,
        animation_id: u32,
        pattern: Option<Arc<PathPattern>>,
    ) -> Self {
        Self {
            rect: Rect::new(start_point.x, start_point.y, width, height),
            motion: Motion::Enemy(EnemyMotion {
                pattern,
                start_point,
                move_time: 0.0,
                finished: false,
                animation_id,
            }),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.rect.position()
    }

    /// Advance motion by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        match &mut self.motion {
            // Tug control: the drag vector points away from the travel direction
            Motion::Player(p) => self.rect.translate(-p.velocity * dt),
            Motion::Enemy(e) => {
                let Some(pattern) = e.pattern.as_ref() else {
                    return;
                };
                if e.finished {
                    return;
                }
                e.move_time += dt;
                match pattern.sample(e.move_time) {
                    Some(offset) => self.rect.set_position(e.start_point + offset),
                    None => e.finished = true,
                }
            }
        }
    }

    // === Player ===

    /// Point the player along `angle` (radians) at `speed_fraction` of top speed
    ///
    /// Ignored for enemies.
    pub fn set_direction(&mut self, angle: f32, speed_fraction: f32) {
        if let Motion::Player(p) = &mut self.motion {
            let speed = p.max_speed * speed_fraction.clamp(0.0, 1.0);
            p.velocity = Vec2::from_angle(angle) * speed;
            p.rotation_degrees = angle.to_degrees() + SPRITE_FORWARD_OFFSET_DEG;
        }
    }

    /// Zero the velocity; facing is kept
    pub fn stop(&mut self) {
        if let Motion::Player(p) = &mut self.motion {
            p.velocity = Vec2::ZERO;
        }
    }

    /// Player velocity, zero for enemies
    pub fn velocity(&self) -> Vec2 {
        match &self.motion {
            Motion::Player(p) => p.velocity,
            Motion::Enemy(_) => Vec2::ZERO,
        }
    }

    /// Player facing in degrees, zero for enemies
    pub fn rotation_degrees(&self) -> f32 {
        match &self.motion {
            Motion::Player(p) => p.rotation_degrees,
            Motion::Enemy(_) => 0.0,
        }
    }

    // === Enemy ===

    /// Replace the enemy's pattern; `None` freezes it in place for good
    ///
    /// Assigning a pattern restarts its clock. Once frozen, later patterns
    /// are ignored. Ignored for the player.
    pub fn assign_pattern(&mut self, pattern: Option<Arc<PathPattern>>) {
        let Motion::Enemy(e) = &mut self.motion else {
            return;
        };
        if e.pattern.is_none() {
            if pattern.is_some() {
                log::trace!("pattern ignored on frozen enemy");
            }
            return;
        }
        if pattern.is_some() {
            e.move_time = 0.0;
            e.finished = false;
        }
        e.pattern = pattern;
    }

    /// True once an enemy's pattern has been cleared
    pub fn is_pattern_frozen(&self) -> bool {
        matches!(&self.motion, Motion::Enemy(e) if e.pattern.is_none())
    }

    /// True once an enemy's `Once` pattern has played out
    pub fn is_pattern_finished(&self) -> bool {
        matches!(&self.motion, Motion::Enemy(e) if e.finished)
    }

    pub fn pattern(&self) -> Option<&Arc<PathPattern>> {
        match &self.motion {
            Motion::Enemy(e) => e.pattern.as_ref(),
            Motion::Player(_) => None,
        }
    }

    pub fn animation_id(&self) -> Option<u32> {
        match &self.motion {
            Motion::Enemy(e) => Some(e.animation_id),
            Motion::Player(_) => None,
        }
    }
}
