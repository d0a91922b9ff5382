//! Stateless frame builder
//!
//! Consumes the full per-tick state and produces an ordered,
//! backend-agnostic draw list in screen space. The kernel never sees
//! this module; a canvas or terminal backend replays the commands.

use crate::consts::*;
use crate::sim::{GameState, Tile};

/// One draw command, in paint order within the frame list
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background {
        width: f32,
        height: f32,
    },
    /// Scrolling backdrop strip; higher layers scroll faster
    ParallaxStrip {
        layer: u8,
        offset_x: f32,
    },
    Tile {
        x: f32,
        y: f32,
        tile: Tile,
    },
    Platform {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Collectible {
        x: f32,
        y: f32,
        radius: f32,
        /// Pulse scale applied to the sprite
        scale: f32,
        secret: bool,
    },
    Enemy {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        facing: f32,
    },
    Player {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        facing: f32,
        /// False on invulnerability blink-off frames
        visible: bool,
        walk_frame: u32,
    },
    ExitZone {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState) -> Vec<DrawCommand> {
    let cam = state.camera_x;
    let mut out = Vec::new();

    out.push(DrawCommand::Background {
        width: VIEW_WIDTH,
        height: VIEW_HEIGHT,
    });
    out.push(DrawCommand::ParallaxStrip {
        layer: 0,
        offset_x: -cam * 0.3,
    });
    out.push(DrawCommand::ParallaxStrip {
        layer: 1,
        offset_x: -cam * 0.6,
    });

    // Only the visible tile columns
    let first_col = (cam / TILE_SIZE).floor().max(0.0) as usize;
    let last_col = (((cam + VIEW_WIDTH) / TILE_SIZE).ceil() as usize).min(state.level.width_cells);
    for ty in 0..state.level.height_cells {
        for tx in first_col..last_col {
            let tile = state.level.grid.tile_at(tx as i32, ty as i32);
            if tile != Tile::Empty {
                out.push(DrawCommand::Tile {
                    x: tx as f32 * TILE_SIZE - cam,
                    y: ty as f32 * TILE_SIZE,
                    tile,
                });
            }
        }
    }

    out.push(DrawCommand::ExitZone {
        x: state.level.exit_pos.x - cam,
        y: state.level.exit_pos.y,
        w: state.level.exit_size.x,
        h: state.level.exit_size.y,
    });

    for platform in &state.platforms {
        out.push(DrawCommand::Platform {
            x: platform.pos.x - cam,
            y: platform.pos.y,
            w: platform.size.x,
            h: platform.size.y,
        });
    }

    for item in state.collectibles.iter().filter(|c| !c.collected) {
        out.push(DrawCommand::Collectible {
            x: item.pos.x - cam,
            y: item.pos.y,
            radius: item.radius,
            scale: 1.0 + (item.pulse * 7.0).sin() * 0.2,
            secret: item.secret,
        });
    }

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        out.push(DrawCommand::Enemy {
            x: enemy.body.pos.x - cam,
            y: enemy.body.pos.y,
            w: enemy.body.size.x,
            h: enemy.body.size.y,
            facing: enemy.direction,
        });
    }

    let player = &state.player;
    let blinking = player.invuln > 0.0 && (state.elapsed * 20.0).floor() as i64 % 2 == 1;
    out.push(DrawCommand::Player {
        x: player.body.pos.x - cam,
        y: player.body.pos.y,
        w: player.body.size.x,
        h: player.body.size.y,
        facing: player.facing,
        visible: !blinking,
        walk_frame: player.walk_frame.floor() as u32 % 2,
    });

    out
}
