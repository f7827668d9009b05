//! Collision checks between the player, enemies and walls
//!
//! Everything is axis-aligned box overlap. Enemy contact freezes the enemy;
//! wall contact cancels the player's move for the tick.

use super::entity::Mobile;
use super::rect::Rect;

/// Freeze every enemy touching the player
///
/// Returns how many enemies were newly frozen this call. Already frozen
/// enemies still overlap but are not counted again.
pub fn resolve_enemy_collisions(player: &Rect, enemies: &mut [Mobile]) -> usize {
    let mut frozen = 0;
    for (i, enemy) in enemies.iter_mut().enumerate() {
        if enemy.is_pattern_frozen() || !enemy.rect.overlaps(player) {
            continue;
        }
        enemy.assign_pattern(None);
        frozen += 1;
        log::debug!("Enemy {i} frozen at ({:.2}, {:.2})", enemy.rect.x, enemy.rect.y);
    }
    frozen
}

/// First wall the player has moved into, if any
///
/// Touching a wall edge is allowed so the player can slide along it.
pub fn blocking_wall(player: &Rect, walls: &[Rect]) -> Option<usize> {
    walls.iter().position(|wall| wall.overlaps_interior(player))
}
