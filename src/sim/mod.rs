//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio or storage:
//! - The host drives `World::tick` once per frame
//! - Level data arrives already deserialized
//! - Path patterns are immutable and shared between enemies

pub mod collision;
pub mod entity;
pub mod level;
pub mod pattern;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{blocking_wall, resolve_enemy_collisions};
pub use entity::{EnemyMotion, Mobile, Motion, PlayerMotion};
pub use level::{
    EnemyData, EnemyPrototype, Level, LevelData, LevelError, MovePatternData, PrototypeTable,
    WallData,
};
pub use pattern::{LoopMode, PathPattern, PatternError};
pub use rect::Rect;
pub use state::{GameState, PlayerState, SimulationState};
pub use tick::World;
