//! Level description and level building
//!
//! `LevelData` is the already-deserialized level file. `Level::build`
//! validates all of it up front and either returns a complete level or an
//! error; nothing is partially applied.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::blocking_wall;
use super::entity::Mobile;
use super::pattern::{LoopMode, PathPattern, PatternError};
use super::rect::Rect;

/// Reasons a level cannot be loaded
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("map size must be positive, got {width} x {height}")]
    InvalidMapSize { width: f32, height: f32 },
    #[error("player spawn ({x}, {y}) is not a finite position")]
    InvalidSpawn { x: f32, y: f32 },
    #[error("move pattern {index}: {source}")]
    Pattern {
        index: usize,
        #[source]
        source: PatternError,
    },
    #[error("move pattern {index}: {xs} x coordinates but {ys} y coordinates")]
    PointCountMismatch { index: usize, xs: usize, ys: usize },
    #[error("enemy {enemy} uses move pattern {pattern}, but the level has {available}")]
    UnknownPattern {
        enemy: usize,
        pattern: i32,
        available: usize,
    },
    #[error("enemy {enemy} uses prototype {prototype}, but only {available} are defined")]
    UnknownPrototype {
        enemy: usize,
        prototype: i32,
        available: usize,
    },
    #[error("enemy {enemy} has a non-finite start position")]
    InvalidEnemyStart { enemy: usize },
    #[error("wall {index} has an invalid position or size")]
    InvalidWall { index: usize },
    #[error("player spawn is inside wall {wall}")]
    SpawnInWall { wall: usize },
}

/// A movement pattern as written in the level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePatternData {
    pub duration: f32,
    /// 1 = once, 2 = circular, 3 = ping-pong
    pub loop_mode: u8,
    pub points_x: Vec<f32>,
    pub points_y: Vec<f32>,
}

/// An enemy placement as written in the level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyData {
    /// Index into the prototype table
    pub id: i32,
    pub start_x: f32,
    pub start_y: f32,
    /// Index into the level's move patterns
    pub move_pattern_id: i32,
}

/// A static wall as written in the level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallData {
    #[serde(alias = "startX")]
    pub x: f32,
    #[serde(alias = "startY")]
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    #[serde(alias = "mapW")]
    pub map_width: f32,
    #[serde(alias = "mapH")]
    pub map_height: f32,
    pub player_x: f32,
    pub player_y: f32,
    #[serde(default, alias = "movePatternData")]
    pub move_patterns: Vec<MovePatternData>,
    #[serde(default, alias = "enemyData")]
    pub enemies: Vec<EnemyData>,
    #[serde(default, alias = "wallData")]
    pub walls: Vec<WallData>,
}

impl LevelData {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Size and look shared by every enemy of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyPrototype {
    pub width: f32,
    pub height: f32,
    pub animation_id: u32,
}

/// Enemy prototypes indexed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrototypeTable {
    pub prototypes: Vec<EnemyPrototype>,
}

impl PrototypeTable {
    pub fn new(prototypes: Vec<EnemyPrototype>) -> Self {
        Self { prototypes }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, id: i32) -> Option<&EnemyPrototype> {
        usize::try_from(id).ok().and_then(|i| self.prototypes.get(i))
    }

    /// Create an enemy from prototype `id` at `start`
    pub fn spawn(&self, id: i32, start: Vec2, pattern: Option<Arc<PathPattern>>) -> Option<Mobile> {
        let proto = self.get(id)?;
        Some(Mobile::enemy(start, proto.width, proto.height, proto.animation_id, pattern))
    }
}

/// A fully built level
#[derive(Debug, Clone)]
pub struct Level {
    pub map_size: Vec2,
    pub player_spawn: Vec2,
    /// Built patterns, shared with the enemies that use them
    pub patterns: Vec<Arc<PathPattern>>,
    pub enemies: Vec<Mobile>,
    pub walls: Vec<Rect>,
}

impl Level {
    /// Validate `data` and build every pattern, enemy and wall
    pub fn build(data: &LevelData, prototypes: &PrototypeTable) -> Result<Self, LevelError> {
        let valid_extent = |v: f32| v.is_finite() && v > 0.0;
        if !valid_extent(data.map_width) || !valid_extent(data.map_height) {
            return Err(LevelError::InvalidMapSize {
                width: data.map_width,
                height: data.map_height,
            });
        }
        if !(data.player_x.is_finite() && data.player_y.is_finite()) {
            return Err(LevelError::InvalidSpawn {
                x: data.player_x,
                y: data.player_y,
            });
        }

        let patterns = data
            .move_patterns
            .iter()
            .enumerate()
            .map(|(index, p)| build_pattern(index, p).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        let enemies = data
            .enemies
            .iter()
            .enumerate()
            .map(|(enemy, e)| {
                let pattern = usize::try_from(e.move_pattern_id)
                    .ok()
                    .and_then(|i| patterns.get(i))
                    .ok_or(LevelError::UnknownPattern {
                        enemy,
                        pattern: e.move_pattern_id,
                        available: patterns.len(),
                    })?;
                let start = Vec2::new(e.start_x, e.start_y);
                if !start.is_finite() {
                    return Err(LevelError::InvalidEnemyStart { enemy });
                }
                prototypes
                    .spawn(e.id, start, Some(Arc::clone(pattern)))
                    .ok_or(LevelError::UnknownPrototype {
                        enemy,
                        prototype: e.id,
                        available: prototypes.prototypes.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let walls = data
            .walls
            .iter()
            .enumerate()
            .map(|(index, w)| {
                let finite = [w.x, w.y, w.width, w.height].iter().all(|v| v.is_finite());
                if !finite || w.width < 0.0 || w.height < 0.0 {
                    return Err(LevelError::InvalidWall { index });
                }
                Ok(Rect::new(w.x, w.y, w.width, w.height))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            map_size: Vec2::new(data.map_width, data.map_height),
            player_spawn: Vec2::new(data.player_x, data.player_y),
            patterns,
            enemies,
            walls,
        })
    }

    /// Where a player of `size` starts, pulled inside the map
    ///
    /// Fails if that spot is inside a wall, since the player could never
    /// move out of it.
    pub fn spawn_rect(&self, size: Vec2) -> Result<Rect, LevelError> {
        let mut rect = Rect::new(self.player_spawn.x, self.player_spawn.y, size.x, size.y);
        rect.clamp_within(self.map_size);
        if rect.position() != self.player_spawn {
            log::warn!(
                "Player spawn ({}, {}) is outside the map, using ({}, {})",
                self.player_spawn.x,
                self.player_spawn.y,
                rect.x,
                rect.y
            );
        }
        match blocking_wall(&rect, &self.walls) {
            Some(wall) => Err(LevelError::SpawnInWall { wall }),
            None => Ok(rect),
        }
    }
}

fn build_pattern(index: usize, data: &MovePatternData) -> Result<PathPattern, LevelError> {
    if data.points_x.len() != data.points_y.len() {
        return Err(LevelError::PointCountMismatch {
            index,
            xs: data.points_x.len(),
            ys: data.points_y.len(),
        });
    }
    let wrap = |source| LevelError::Pattern { index, source };
    let loop_mode = LoopMode::try_from(data.loop_mode).map_err(wrap)?;
    PathPattern::from_axes(loop_mode, &data.points_x, &data.points_y, data.duration).map_err(wrap)
}

/// Square enemies of size 3 with distinct animation ids
#[cfg(test)]
pub(crate) fn test_prototypes() -> PrototypeTable {
    PrototypeTable::new(vec![
        EnemyPrototype {
            width: 3.0,
            height: 3.0,
            animation_id: 0,
        },
        EnemyPrototype {
            width: 5.0,
            height: 2.0,
            animation_id: 1,
        },
    ])
}

/// The first playtest level: three patterns, four enemies, no walls
#[cfg(test)]
pub(crate) fn sample_level_data() -> LevelData {
    LevelData {
        map_width: 500.0,
        map_height: 500.0,
        player_x: 10.0,
        player_y: 15.0,
        move_patterns: vec![
            MovePatternData {
                duration: 3.0,
                loop_mode: 1,
                points_x: vec![0.0, 10.0, 13.0],
                points_y: vec![0.0, 0.0, 15.0],
            },
            MovePatternData {
                duration: 4.0,
                loop_mode: 2,
                points_x: vec![0.0, 0.0, 9.0],
                points_y: vec![0.0, 15.0, 10.0],
            },
            MovePatternData {
                duration: 5.0,
                loop_mode: 3,
                points_x: vec![0.0, 14.0, 10.0],
                points_y: vec![0.0, 14.0, 18.0],
            },
        ],
        enemies: (0..4)
            .map(|i| EnemyData {
                id: 0,
                start_x: 10.0 * i as f32 + 10.0,
                start_y: 15.0 * i as f32,
                move_pattern_id: if i == 3 { 0 } else { i },
            })
            .collect(),
        walls: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sample_level() {
        let level = Level::build(&sample_level_data(), &test_prototypes()).unwrap();
        assert_eq!(level.map_size, Vec2::new(500.0, 500.0));
        assert_eq!(level.player_spawn, Vec2::new(10.0, 15.0));
        assert_eq!(level.patterns.len(), 3);
        assert_eq!(level.enemies.len(), 4);
        assert_eq!(level.patterns[1].loop_mode(), LoopMode::Circular);
        assert_eq!(level.patterns[2].points().len(), 5);

        // Enemies 0 and 3 share the first pattern
        let p0 = level.enemies[0].pattern().unwrap();
        let p3 = level.enemies[3].pattern().unwrap();
        assert!(Arc::ptr_eq(p0, p3));
        assert!(Arc::ptr_eq(p0, &level.patterns[0]));
        assert_eq!(level.enemies[2].position(), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_from_json_legacy_field_names() {
        let json = r#"{
            "mapW": 200, "mapH": 100, "playerX": 5, "playerY": 6,
            "movePatternData": [
                { "duration": 2, "loopMode": 2, "pointsX": [0, 5], "pointsY": [0, 0] }
            ],
            "enemyData": [ { "id": 1, "startX": 20, "startY": 30, "movePatternId": 0 } ],
            "wallData": [ { "startX": 50, "startY": 0, "width": 4, "height": 60 } ]
        }"#;
        let data = LevelData::from_json(json).unwrap();
        let level = Level::build(&data, &test_prototypes()).unwrap();
        assert_eq!(level.map_size, Vec2::new(200.0, 100.0));
        assert_eq!(level.walls[0], Rect::new(50.0, 0.0, 4.0, 60.0));
        assert_eq!(level.enemies[0].rect.size(), Vec2::new(5.0, 2.0));
        assert_eq!(level.enemies[0].animation_id(), Some(1));
    }

    #[test]
    fn test_bundled_sample_level() {
        let data = LevelData::from_json(include_str!("../../levels/sample.json")).unwrap();
        let prototypes =
            PrototypeTable::from_json(include_str!("../../levels/enemy_prototypes.json")).unwrap();
        let level = Level::build(&data, &prototypes).unwrap();
        assert_eq!(level.enemies.len(), 4);
        assert_eq!(level.walls.len(), 1);
        assert_eq!(level.enemies[2].rect.size(), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(LevelData::from_json("{"), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_rejects_mismatched_points() {
        let mut data = sample_level_data();
        data.move_patterns[1].points_y.pop();
        let err = Level::build(&data, &test_prototypes()).unwrap_err();
        assert!(matches!(
            err,
            LevelError::PointCountMismatch { index: 1, xs: 3, ys: 2 }
        ));
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let mut data = sample_level_data();
        data.move_patterns[2].duration = 0.0;
        let err = Level::build(&data, &test_prototypes()).unwrap_err();
        assert!(matches!(
            err,
            LevelError::Pattern {
                index: 2,
                source: PatternError::InvalidDuration(_)
            }
        ));
    }

    #[test]
    fn test_rejects_unknown_loop_mode() {
        let mut data = sample_level_data();
        data.move_patterns[0].loop_mode = 7;
        let err = Level::build(&data, &test_prototypes()).unwrap_err();
        assert!(matches!(
            err,
            LevelError::Pattern {
                index: 0,
                source: PatternError::UnknownLoopMode(7)
            }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_pattern_index() {
        let mut data = sample_level_data();
        data.enemies[1].move_pattern_id = 3;
        let err = Level::build(&data, &test_prototypes()).unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownPattern { enemy: 1, pattern: 3, available: 3 }
        ));

        data.enemies[1].move_pattern_id = -1;
        assert!(matches!(
            Level::build(&data, &test_prototypes()),
            Err(LevelError::UnknownPattern { pattern: -1, .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_prototype() {
        let mut data = sample_level_data();
        data.enemies[0].id = 9;
        let err = Level::build(&data, &test_prototypes()).unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownPrototype { enemy: 0, prototype: 9, available: 2 }
        ));
    }

    #[test]
    fn test_rejects_bad_map_and_walls() {
        let mut data = sample_level_data();
        data.map_width = 0.0;
        assert!(matches!(
            Level::build(&data, &test_prototypes()),
            Err(LevelError::InvalidMapSize { .. })
        ));

        let mut data = sample_level_data();
        data.walls.push(WallData {
            x: 0.0,
            y: 0.0,
            width: -1.0,
            height: 4.0,
        });
        assert!(matches!(
            Level::build(&data, &test_prototypes()),
            Err(LevelError::InvalidWall { index: 0 })
        ));
    }

    #[test]
    fn test_spawn_inside_wall_rejected() {
        let mut data = sample_level_data();
        data.player_x = 100.0;
        data.player_y = 100.0;
        data.walls.push(WallData {
            x: 99.0,
            y: 99.0,
            width: 2.0,
            height: 2.0,
        });
        let level = Level::build(&data, &test_prototypes()).unwrap();
        assert!(matches!(
            level.spawn_rect(Vec2::new(3.0, 3.0)),
            Err(LevelError::SpawnInWall { wall: 0 })
        ));

        // Touching the wall edge is fine
        data.walls[0].x = 103.0;
        let level = Level::build(&data, &test_prototypes()).unwrap();
        let rect = level.spawn_rect(Vec2::new(3.0, 3.0)).unwrap();
        assert_eq!(rect.position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_spawn_outside_map_is_clamped() {
        let mut data = sample_level_data();
        data.player_x = 600.0;
        data.player_y = -20.0;
        let level = Level::build(&data, &test_prototypes()).unwrap();
        let rect = level.spawn_rect(Vec2::new(3.0, 3.0)).unwrap();
        assert_eq!(rect.position(), Vec2::new(497.0, 0.0));
        assert_eq!(rect.size(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_error_messages() {
        let err = LevelError::UnknownPattern {
            enemy: 2,
            pattern: 5,
            available: 3,
        };
        let msg = format!("{err}");
        assert!(msg.contains("enemy 2"), "got: {msg}");
        assert!(msg.contains("pattern 5"), "got: {msg}");

        let err = LevelError::Pattern {
            index: 1,
            source: PatternError::TooFewPoints(1),
        };
        let msg = format!("{err}");
        assert!(msg.contains("at least 2 points"), "got: {msg}");
    }

    #[test]
    fn test_prototype_table_json() {
        let table = PrototypeTable::from_json(
            r#"[ { "width": 3, "height": 3, "animationId": 4 } ]"#,
        )
        .unwrap();
        assert_eq!(table.prototypes.len(), 1);
        assert_eq!(table.get(0).unwrap().animation_id, 4);
        assert!(table.get(-1).is_none());
        assert!(table.spawn(1, Vec2::ZERO, None).is_none());
    }
}
