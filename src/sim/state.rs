//! Simulation state and entity types
//!
//! The orchestrator owns one working copy of everything here for the
//! duration of a level attempt; templates in `levels` stay untouched.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::levels::LevelDefinition;

use super::grid::TileGrid;

/// Phase of a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advances every tick
    Playing,
    /// Exit reached; terminal for this attempt
    LevelComplete,
    /// Hearts depleted; terminal for this attempt
    GameOver,
}

/// Discrete signals emitted by one tick, in emission order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Avatar left the ground from a jump input
    Jumped,
    /// An adversary was stomped
    EnemyDefeated,
    /// A collectible was consumed
    ItemCollected { value: u32, secret: bool },
    /// Avatar took damage; `respawned` is true for the hazard path,
    /// which also teleports the avatar back to spawn
    AvatarHit { hearts_left: u8, respawned: bool },
    /// Avatar reached the exit zone
    LevelComplete { time: f32 },
    /// Hearts reached zero
    GameOver,
}

/// Shared moving-body shape for the avatar and adversaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub vel: Vec2,
    #[serde(default)]
    pub grounded: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            grounded: false,
        }
    }

    /// World y of the body's feet
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// The controllable avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub hearts: u8,
    /// Facing direction, ±1
    pub facing: f32,
    pub sprinting: bool,
    /// Invulnerability window remaining (seconds)
    pub invuln: f32,
    /// Walk animation phase
    pub walk_frame: f32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            hearts: PLAYER_HEARTS,
            facing: 1.0,
            sprinting: false,
            invuln: 0.0,
            walk_frame: 0.0,
        }
    }
}

/// Adversary behavior types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Walks back and forth, turning at walls and ledges
    Patrol,
    /// Hops toward the avatar on a fixed cadence
    Hopper,
}

/// An adversary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    #[serde(flatten)]
    pub body: Body,
    pub kind: EnemyKind,
    /// Facing/movement direction, ±1
    pub direction: f32,
    /// Base horizontal speed
    pub speed: f32,
    /// Dead adversaries stay in the collection but are skipped everywhere
    #[serde(default = "default_alive")]
    pub alive: bool,
    /// Monotonic behavior clock, accumulated every tick and never reset
    #[serde(default)]
    pub timer: f32,
}

fn default_alive() -> bool {
    true
}

/// A pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub radius: f32,
    pub value: u32,
    /// Cosmetic tag; secret shards render differently
    #[serde(default)]
    pub secret: bool,
    /// One-way for the lifetime of the attempt
    #[serde(default)]
    pub collected: bool,
    /// Animation pulse accumulator
    #[serde(default)]
    pub pulse: f32,
}

/// A platform oscillating between fixed horizontal bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub pos: Vec2,
    pub size: Vec2,
    pub min_x: f32,
    pub max_x: f32,
    pub speed: f32,
    /// Travel direction, ±1; flips exactly at the bounds
    #[serde(default = "default_dir")]
    pub dir: f32,
}

fn default_dir() -> f32 {
    1.0
}

impl MovingPlatform {
    /// Horizontal displacement over one tick at the current direction
    #[inline]
    pub fn displacement(&self, dt: f32) -> f32 {
        self.speed * self.dir * dt
    }
}

/// Static stage data the working copy keeps from its template
///
/// The template's entity lists are not carried here; the attempt's
/// mutable copies in `GameState` are the only ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelInfo {
    pub name: String,
    pub grid: TileGrid,
    pub spawn: Vec2,
    pub exit_pos: Vec2,
    pub exit_size: Vec2,
    pub width_cells: usize,
    pub height_cells: usize,
    pub time_target: f32,
}

impl From<&LevelDefinition> for LevelInfo {
    fn from(template: &LevelDefinition) -> Self {
        Self {
            name: template.name.clone(),
            grid: template.grid.clone(),
            spawn: template.spawn,
            exit_pos: template.exit_pos,
            exit_size: template.exit_size,
            width_cells: template.width_cells,
            height_cells: template.height_cells,
            time_target: template.time_target,
        }
    }
}

/// Working state of one level attempt
///
/// Instantiated from a level template by deep clone; the template is
/// never mutated, so repeated attempts always start identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level: LevelInfo,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub platforms: Vec<MovingPlatform>,
    /// Horizontal camera offset, clamped to the world
    pub camera_x: f32,
    /// Seconds of simulated time since the attempt started
    pub elapsed: f32,
    pub phase: GamePhase,
}

impl GameState {
    /// Instantiate a fresh attempt from a level template
    ///
    /// `carried_hearts` keeps the avatar's hearts across a level
    /// transition within one run; `None` starts at full hearts.
    pub fn new(template: &LevelDefinition, carried_hearts: Option<u8>) -> Self {
        let mut player = Player::new(template.spawn);
        if let Some(hearts) = carried_hearts {
            player.hearts = hearts;
        }
        Self {
            level: LevelInfo::from(template),
            player,
            enemies: template.enemies.clone(),
            collectibles: template.collectibles.clone(),
            platforms: template.platforms.clone(),
            camera_x: 0.0,
            elapsed: 0.0,
            phase: GamePhase::Playing,
        }
    }

    /// World height in units, below which (plus slack) the avatar is out of bounds
    #[inline]
    pub fn world_bottom(&self) -> f32 {
        self.level.height_cells as f32 * TILE_SIZE
    }
}
