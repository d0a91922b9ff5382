//! Adversary behavior
//!
//! Each adversary carries a monotonic timer that accumulates dt and is
//! never reset, so cadence comes from modulo phase, not event triggers.
//! Behavior only derives a velocity intent; the motion resolver does the
//! actual movement.

use crate::consts::*;

use super::grid::{Tile, TileGrid};
use super::state::{Enemy, EnemyKind};

/// Update one adversary's timer and velocity intent for this tick
///
/// `player_x` is the avatar's current x, used by hoppers to pick a
/// direction when they fire.
pub fn steer(enemy: &mut Enemy, player_x: f32, grid: &TileGrid, dt: f32) {
    enemy.timer += dt;
    match enemy.kind {
        EnemyKind::Patrol => steer_patrol(enemy, grid),
        EnemyKind::Hopper => steer_hopper(enemy, player_x),
    }
}

/// Constant walk, flipping at walls and ledges
///
/// The probe sits just past the leading edge: `w + 2` ahead when moving
/// right, `-2` when moving left (measured from the left face). It is
/// checked at mid-body height for walls and at foot height for ledges.
fn steer_patrol(enemy: &mut Enemy, grid: &TileGrid) {
    enemy.body.vel.x = enemy.direction * enemy.speed;

    let edge_x = enemy.body.pos.x
        + if enemy.direction > 0.0 {
            enemy.body.size.x + 2.0
        } else {
            -2.0
        };
    let ahead = (edge_x / TILE_SIZE).floor() as i32;
    let foot = ((enemy.body.feet_y() + 2.0) / TILE_SIZE).floor() as i32;
    let waist = ((enemy.body.pos.y + enemy.body.size.y / 2.0) / TILE_SIZE).floor() as i32;

    let wall_ahead = grid.tile_at(ahead, waist) == Tile::Solid;
    let ledge_ahead = grid.tile_at(ahead, foot) == Tile::Empty;
    if wall_ahead || ledge_ahead {
        enemy.direction = -enemy.direction;
    }
}

/// Hop-and-pause cadence: a short lunge at the start of each speed
/// cycle, a creep otherwise, and a grounded jump toward the avatar once
/// per fire cycle.
fn steer_hopper(enemy: &mut Enemy, player_x: f32) {
    let lunging = enemy.timer % HOPPER_SPEED_CYCLE < HOPPER_LUNGE_TIME;
    let factor = if lunging {
        HOPPER_LUNGE_FACTOR
    } else {
        HOPPER_CREEP_FACTOR
    };
    enemy.body.vel.x = enemy.direction * enemy.speed * factor;

    if enemy.body.grounded && enemy.timer % HOPPER_FIRE_CYCLE < HOPPER_FIRE_WINDOW {
        enemy.body.vel.y = HOPPER_IMPULSE;
        enemy.direction = if player_x > enemy.body.pos.x { 1.0 } else { -1.0 };
    }
}
