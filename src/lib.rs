//! Switch State - simulation core of a top-down touch-controlled action game
//!
//! Core modules:
//! - `sim`: Simulation (path patterns, entities, collisions, game state)
//! - `tuning`: Data-driven player control parameters

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed timestep used by the demo driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player top speed (units/s)
    pub const MAX_SPEED: f32 = 25.0;
    /// Drag distance (screen px) from the press origin that maps to full speed
    pub const MAX_DRAG_DISTANCE: f32 = 40.0;
    /// Player box edge length
    pub const PLAYER_SIZE: f32 = 3.0;

    /// Sprite art faces up, headings are measured from +X
    pub const SPRITE_FORWARD_OFFSET_DEG: f32 = 90.0;

    /// Tolerance for float comparisons on pattern timing
    pub const TIME_EPSILON: f32 = 1e-5;
}

/// Heading and speed fraction for a drag from `origin` to `pos` (screen coordinates)
///
/// The heading points from the current touch back toward the origin on the X
/// axis, matching the player's inverted `advance`.
#[inline]
pub fn drag_heading(pos: Vec2, origin: Vec2, max_distance: f32) -> (f32, f32) {
    let angle = (pos.y - origin.y).atan2(origin.x - pos.x);
    let fraction = if max_distance > 0.0 {
        pos.distance(origin).clamp(0.0, max_distance) / max_distance
    } else {
        0.0
    };
    (angle, fraction)
}

/// Clamp `value` into `[min, max]`, collapsing to the midpoint when the range is inverted
#[inline]
pub fn clamp_or_center(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        (min + max) / 2.0
    } else {
        value.clamp(min, max)
    }
}
