//! Deterministic simulation kernel
//!
//! Pure and synchronous: no platform calls, no randomness, no clocks.
//! The embedding drives it through [`tick`] with a pre-clamped dt and an
//! input snapshot, and reacts to the returned [`GameEvent`]s. Identical
//! inputs always replay to identical states.

pub mod enemy;
pub mod grid;
pub mod interact;
pub mod motion;
pub mod platforms;
pub mod state;
pub mod tick;

pub use enemy::steer;
pub use grid::{Tile, TileGrid};
pub use motion::resolve_motion;
pub use platforms::advance_platforms;
pub use state::{
    Body, Collectible, Enemy, EnemyKind, GameEvent, GamePhase, GameState, LevelInfo,
    MovingPlatform, Player,
};
pub use tick::tick;
