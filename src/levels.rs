//! Level templates and the level interchange format
//!
//! A level is a read-only template: tile grid, spawn, exit zone, time
//! target and the initial entity lists. Attempts deep-clone it into a
//! `GameState`, so the templates here are never mutated at runtime.
//!
//! Tile rows are authored as ASCII digit strings (`0` empty, `1` solid,
//! `2` hazard), one character per cell.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Collectible, Enemy, EnemyKind, MovingPlatform, TileGrid};
use crate::sim::Body;

/// Read-only level template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub grid: TileGrid,
    pub spawn: Vec2,
    pub exit_pos: Vec2,
    pub exit_size: Vec2,
    pub width_cells: usize,
    pub height_cells: usize,
    /// Completing under this time (seconds) earns a time bonus
    pub time_target: f32,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub platforms: Vec<MovingPlatform>,
}

impl LevelDefinition {
    /// Deserialize a level from its JSON interchange form
    ///
    /// Malformed data logs and yields `None`; callers fall back to the
    /// built-in set.
    pub fn from_json(data: &str) -> Option<Self> {
        match serde_json::from_str(data) {
            Ok(level) => Some(level),
            Err(err) => {
                log::warn!("discarding malformed level data: {err}");
                None
            }
        }
    }
}

/// Parse ASCII tile rows into a grid; non-digit characters read as empty
pub fn parse_tile_rows(rows: &[&str]) -> TileGrid {
    TileGrid::new(
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|c| c.to_digit(10).unwrap_or(0) as u8)
                    .collect()
            })
            .collect(),
    )
}

fn patrol(x: f32, y: f32, speed: f32) -> Enemy {
    Enemy {
        body: Body::new(Vec2::new(x, y), Vec2::new(14.0, 14.0)),
        kind: EnemyKind::Patrol,
        direction: 1.0,
        speed,
        alive: true,
        timer: 0.0,
    }
}

fn hopper(x: f32, y: f32, speed: f32) -> Enemy {
    Enemy {
        body: Body::new(Vec2::new(x, y), Vec2::new(14.0, 14.0)),
        kind: EnemyKind::Hopper,
        direction: -1.0,
        speed,
        alive: true,
        timer: 0.0,
    }
}

fn shard(x: f32, y: f32, value: u32, secret: bool) -> Collectible {
    Collectible {
        pos: Vec2::new(x, y),
        radius: 6.0,
        value,
        secret,
        collected: false,
        pulse: 0.0,
    }
}

fn platform(x: f32, y: f32, min_x: f32, max_x: f32, speed: f32) -> MovingPlatform {
    MovingPlatform {
        pos: Vec2::new(x, y),
        size: Vec2::new(48.0, 8.0),
        min_x,
        max_x,
        speed,
        dir: 1.0,
    }
}

/// The built-in level set, in play order
pub fn builtin() -> Vec<LevelDefinition> {
    vec![scrapyard_gate(), conveyor_chasm(), furnace_core()]
}

/// Level 1: flat yard, one patrol, one hazard pit bridged by a platform
fn scrapyard_gate() -> LevelDefinition {
    #[rustfmt::skip]
    let rows = [
        "000000000000000000000000000000000000000000000000",
        "000000000000000000000000000000000000000000000000",
        "000000000000000000000000000000000000000000000000",
        "000000000000000000000000000000000000000000000000",
        "000000000000000000000000000000000000000000000000",
        "000000000000000000000000000000000000000000000000",
        "000000000000000000000000000000000000000000000000",
        "000000000011110000000000000000000000000000000000",
        "000000000000000000000000000000000000000000000000",
        "000000000000000000000000000000000000000000000000",
        "111111111111111111112222111111111111111111111111",
        "111111111111111111111111111111111111111111111111",
    ];
    LevelDefinition {
        name: "Scrapyard Gate".into(),
        grid: parse_tile_rows(&rows),
        spawn: Vec2::new(32.0, 140.0),
        exit_pos: Vec2::new(720.0, 112.0),
        exit_size: Vec2::new(16.0, 48.0),
        width_cells: 48,
        height_cells: 12,
        time_target: 45.0,
        enemies: vec![patrol(448.0, 146.0, 40.0)],
        collectibles: vec![shard(120.0, 140.0, 100, false), shard(352.0, 96.0, 100, false)],
        platforms: vec![platform(312.0, 120.0, 304.0, 400.0, 40.0)],
    }
}

/// Level 2: hazard channels, a hopper ambush and two ferry platforms
fn conveyor_chasm() -> LevelDefinition {
    #[rustfmt::skip]
    let rows = [
        "00000000000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000000000000000000000000000",
        "00000000000000000000001111000000000000000000000000000000",
        "00000000000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000000000000000000000000000",
        "00000011110000000000000000000000000000001111000000000000",
        "00000000000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000000000000000000000000000",
        "11111111112222222222111111111122222222221111111111111111",
        "11111111111111111111111111111111111111111111111111111111",
    ];
    LevelDefinition {
        name: "Conveyor Chasm".into(),
        grid: parse_tile_rows(&rows),
        spawn: Vec2::new(32.0, 140.0),
        exit_pos: Vec2::new(864.0, 112.0),
        exit_size: Vec2::new(16.0, 48.0),
        width_cells: 56,
        height_cells: 12,
        time_target: 60.0,
        enemies: vec![patrol(368.0, 146.0, 45.0), hopper(720.0, 146.0, 50.0)],
        collectibles: vec![
            shard(128.0, 96.0, 100, false),
            shard(416.0, 140.0, 100, false),
            shard(360.0, 48.0, 250, true),
        ],
        platforms: vec![
            platform(168.0, 128.0, 160.0, 320.0, 45.0),
            platform(488.0, 128.0, 480.0, 640.0, 55.0),
        ],
    }
}

/// Level 3: stacked ledges over a hazard floor, mixed patrol pressure
fn furnace_core() -> LevelDefinition {
    #[rustfmt::skip]
    let rows = [
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000011111000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000001111100000000000000000000001111100000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "1111110000000000000000000000000000000000000000000000000011111111",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "1111112222222222222222222222222222222222222222222222222211111111",
        "1111111111111111111111111111111111111111111111111111111111111111",
    ];
    LevelDefinition {
        name: "Furnace Core".into(),
        grid: parse_tile_rows(&rows),
        spawn: Vec2::new(32.0, 92.0),
        exit_pos: Vec2::new(976.0, 64.0),
        exit_size: Vec2::new(16.0, 48.0),
        width_cells: 64,
        height_cells: 12,
        time_target: 75.0,
        enemies: vec![
            patrol(208.0, 66.0, 50.0),
            patrol(640.0, 66.0, 55.0),
            hopper(928.0, 98.0, 55.0),
        ],
        collectibles: vec![
            shard(232.0, 56.0, 100, false),
            shard(440.0, 40.0, 100, false),
            shard(672.0, 56.0, 100, false),
            shard(24.0, 48.0, 250, true),
        ],
        platforms: vec![
            platform(120.0, 96.0, 112.0, 272.0, 50.0),
            platform(472.0, 88.0, 464.0, 624.0, 55.0),
            platform(760.0, 96.0, 752.0, 904.0, 60.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;

    #[test]
    fn test_parse_tile_rows_codes() {
        let grid = parse_tile_rows(&["012", "x10"]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.solid_at(1, 0));
        assert!(grid.hazard_in_rect(32.0, 0.0, 16.0, 16.0));
        // Unknown characters read as empty
        assert!(!grid.solid_at(0, 1));
    }

    #[test]
    fn test_builtin_levels_are_consistent() {
        for level in builtin() {
            assert_eq!(level.grid.width(), level.width_cells, "{}", level.name);
            assert_eq!(level.grid.height(), level.height_cells, "{}", level.name);
            // Spawn sits in open space inside the world
            assert!(!level.grid.solid_in_rect(level.spawn.x, level.spawn.y, 12.0, 14.0));
            assert!(level.spawn.x >= 0.0);
            assert!(level.exit_pos.x + level.exit_size.x <= level.width_cells as f32 * TILE_SIZE);
        }
    }

    #[test]
    fn test_builtin_levels_have_entities() {
        for level in builtin() {
            assert!(!level.enemies.is_empty(), "{}", level.name);
            assert!(!level.collectibles.is_empty(), "{}", level.name);
        }
    }

    #[test]
    fn test_json_round_trip_and_corrupt_fallback() {
        let level = &builtin()[0];
        let json = serde_json::to_string(level).unwrap();
        let parsed = LevelDefinition::from_json(&json).unwrap();
        assert_eq!(parsed.name, level.name);
        assert_eq!(parsed.enemies.len(), level.enemies.len());
        assert!(LevelDefinition::from_json("{not json").is_none());
    }
}
