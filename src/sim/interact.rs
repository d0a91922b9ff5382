//! Interaction rules
//!
//! Runs once per tick after every body has been resolved. The order is
//! fixed and observable through the emitted events: adversaries, then
//! collectibles, then hazards, then the exit. A terminal phase reached
//! by an earlier stage stops the later ones.

use crate::aabb_overlap;
use crate::consts::*;
use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState};

/// Apply all avatar-vs-world interaction rules for this tick
pub fn process_interactions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    resolve_enemy_contacts(state, events);
    if state.phase != GamePhase::Playing {
        return;
    }
    collect_items(state, events);
    resolve_hazards(state, events);
    if state.phase != GamePhase::Playing {
        return;
    }
    check_exit(state, events);
}

/// Stomp or damage, mutually exclusive per adversary per tick
///
/// A stomp needs downward avatar motion with shallow foot penetration
/// into the adversary's top. Anything else is a hit, gated by the
/// avatar's invulnerability window.
fn resolve_enemy_contacts(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        if !aabb_overlap(
            player.body.pos,
            player.body.size,
            enemy.body.pos,
            enemy.body.size,
        ) {
            continue;
        }
        let stomp = player.body.vel.y > 0.0
            && player.body.feet_y() - enemy.body.pos.y < STOMP_DEPTH;
        if stomp {
            enemy.alive = false;
            player.body.vel.y = STOMP_BOUNCE;
            events.push(GameEvent::EnemyDefeated);
        } else if player.invuln <= 0.0 {
            player.hearts = player.hearts.saturating_sub(1);
            player.invuln = HIT_INVULN;
            events.push(GameEvent::AvatarHit {
                hearts_left: player.hearts,
                respawned: false,
            });
            if player.hearts == 0 {
                state.phase = GamePhase::GameOver;
                events.push(GameEvent::GameOver);
                return;
            }
        }
    }
}

/// One-shot pickups, tested as their bounding squares
fn collect_items(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &state.player;
    for item in state.collectibles.iter_mut().filter(|c| !c.collected) {
        let half = Vec2::splat(item.radius);
        if aabb_overlap(
            player.body.pos,
            player.body.size,
            item.pos - half,
            half * 2.0,
        ) {
            item.collected = true;
            events.push(GameEvent::ItemCollected {
                value: item.value,
                secret: item.secret,
            });
        }
    }
}

/// Hazard tiles and falling out of the world
///
/// Unlike an adversary hit, this path teleports the avatar back to the
/// level spawn so it cannot sit inside the hazard through the window.
fn resolve_hazards(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    let touching_hazard = state.level.grid.hazard_in_rect(
        player.body.pos.x,
        player.body.pos.y,
        player.body.size.x,
        player.body.size.y,
    );
    let fell_out =
        player.body.pos.y > state.level.height_cells as f32 * TILE_SIZE + FALL_OUT_SLACK;
    if (touching_hazard || fell_out) && player.invuln <= 0.0 {
        player.hearts = player.hearts.saturating_sub(1);
        player.invuln = HAZARD_INVULN;
        player.body.pos = state.level.spawn;
        player.body.vel = Vec2::ZERO;
        events.push(GameEvent::AvatarHit {
            hearts_left: player.hearts,
            respawned: true,
        });
        if player.hearts == 0 {
            state.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver);
        }
    }
}

/// Exit overlap completes the level; terminal for the attempt
fn check_exit(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &state.player;
    if aabb_overlap(
        player.body.pos,
        player.body.size,
        state.level.exit_pos,
        state.level.exit_size,
    ) {
        state.phase = GamePhase::LevelComplete;
        events.push(GameEvent::LevelComplete {
            time: state.elapsed,
        });
    }
}
