//! Player control tuning
//!
//! Defaults come from `consts`; a level pack may ship a JSON override.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player control parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    /// Player top speed (units/s)
    pub max_speed: f32,
    /// Drag distance that maps to full speed
    pub max_drag_distance: f32,
    /// Player box width
    pub player_width: f32,
    /// Player box height
    pub player_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            max_drag_distance: MAX_DRAG_DISTANCE,
            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, falling back to defaults for missing fields
    /// and for values that are not usable (non-finite or negative).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Replace unusable values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: f32, fallback: f32| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                log::warn!("Ignoring invalid tuning value {value}, using {fallback}");
                fallback
            }
        };
        self.max_speed = fix(self.max_speed, defaults.max_speed);
        self.max_drag_distance = fix(self.max_drag_distance, defaults.max_drag_distance);
        self.player_width = fix(self.player_width, defaults.player_width);
        self.player_height = fix(self.player_height, defaults.player_height);
        self
    }
}
