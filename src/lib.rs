//! Scrap Runner - a tile-based retro platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation kernel (tile collision, motion, enemies, interactions)
//! - `levels`: Level templates and the level interchange format
//! - `input`: Abstract button-state snapshots for the kernel
//! - `run`: Score and time bookkeeping built from simulation events
//! - `progress`: Persisted progress record and top-10 leaderboard
//! - `audio`: Sound cue collaborator
//! - `render`: Stateless draw-list builder
//! - `platform`: Browser/native abstraction (time, blob storage)

pub mod audio;
pub mod input;
pub mod levels;
pub mod platform;
pub mod progress;
pub mod render;
pub mod run;
pub mod sim;

pub use input::{InputState, InputTracker};
pub use levels::LevelDefinition;
pub use progress::{Leaderboard, ProgressData};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Tile cell size in world units
    pub const TILE_SIZE: f32 = 16.0;
    /// Gravity acceleration (units/s²)
    pub const GRAVITY: f32 = 900.0;
    /// Frame delta cap supplied to the kernel, bounds collision tunneling
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Viewport dimensions (world units)
    pub const VIEW_WIDTH: f32 = 768.0;
    pub const VIEW_HEIGHT: f32 = 320.0;

    /// Avatar body size
    pub const PLAYER_WIDTH: f32 = 12.0;
    pub const PLAYER_HEIGHT: f32 = 14.0;
    /// Hearts on a fresh run
    pub const PLAYER_HEARTS: u8 = 3;
    pub const WALK_SPEED: f32 = 95.0;
    pub const SPRINT_SPEED: f32 = 130.0;
    pub const JUMP_VELOCITY: f32 = -305.0;
    /// Horizontal damping per tick when no direction is held
    pub const IDLE_FRICTION: f32 = 0.75;
    /// Below this horizontal speed the avatar snaps to a stop
    pub const STOP_SPEED: f32 = 4.0;
    /// Grounded speed threshold that advances the walk animation
    pub const WALK_ANIM_SPEED: f32 = 15.0;
    /// Walk animation phase advance per second
    pub const WALK_ANIM_RATE: f32 = 8.0;

    /// Maximum foot penetration into an adversary's top that still counts as a stomp
    pub const STOMP_DEPTH: f32 = 8.0;
    /// Upward bounce applied to the avatar after a stomp
    pub const STOMP_BOUNCE: f32 = -180.0;
    /// Invulnerability window after an adversary hit (seconds)
    pub const HIT_INVULN: f32 = 1.2;
    /// Invulnerability window after hazard contact (seconds)
    pub const HAZARD_INVULN: f32 = 1.0;

    /// Hopper jump impulse
    pub const HOPPER_IMPULSE: f32 = -250.0;
    /// Hopper fires once per this cycle (seconds)
    pub const HOPPER_FIRE_CYCLE: f32 = 2.2;
    /// Width of the firing window within the cycle (seconds)
    pub const HOPPER_FIRE_WINDOW: f32 = 0.05;
    /// Hopper horizontal speed modulation cycle (seconds)
    pub const HOPPER_SPEED_CYCLE: f32 = 2.5;
    /// Lunge portion at the start of each speed cycle (seconds)
    pub const HOPPER_LUNGE_TIME: f32 = 0.45;
    pub const HOPPER_LUNGE_FACTOR: f32 = 1.8;
    pub const HOPPER_CREEP_FACTOR: f32 = 0.35;

    /// Score for a defeated adversary
    pub const ENEMY_DEFEAT_SCORE: u64 = 200;
    /// Flat bonus for completing a level
    pub const COMPLETION_BONUS: u64 = 500;
    /// Points per second under the level's time target
    pub const TIME_BONUS_RATE: f32 = 10.0;

    /// Slack below the world bottom before a fall counts as out of bounds
    pub const FALL_OUT_SLACK: f32 = 40.0;

    /// Residual distance accepted by the back-off resolver (units)
    pub const BACKOFF_SLACK: f32 = 0.5;
    /// Height of the probe strip beneath a body's feet for ride detection
    pub const RIDE_PROBE_HEIGHT: f32 = 2.0;
    /// Carry band around a platform's top surface: feet within
    /// [top - CARRY_BAND_ABOVE, top + CARRY_BAND_BELOW] snap onto it
    pub const CARRY_BAND_ABOVE: f32 = 2.0;
    pub const CARRY_BAND_BELOW: f32 = 8.0;
}

/// Axis-aligned bounding-box overlap test (strict on all edges)
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
