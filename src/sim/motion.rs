//! Axis-separated motion resolution
//!
//! Integrates gravity, then resolves horizontal and vertical movement
//! against the tile grid one axis at a time. Blocked movement is backed
//! off one unit at a time toward the last clear position, so a resolved
//! body never ends a step inside solid geometry (beyond the sub-unit
//! slack of the back-off).

use crate::aabb_overlap;
use crate::consts::*;
use glam::Vec2;

use super::grid::TileGrid;
use super::state::{Body, MovingPlatform};

/// Advance one body by `dt`, mutating it in place
///
/// `dt` must be pre-clamped by the caller (`consts::MAX_FRAME_DT`);
/// the resolver does not subdivide large steps. Bodies spawned inside
/// geometry are the caller's responsibility.
pub fn resolve_motion(body: &mut Body, grid: &TileGrid, dt: f32, platforms: &[MovingPlatform]) {
    body.grounded = false;
    body.vel.y += GRAVITY * dt;

    // Horizontal axis
    let next_x = body.pos.x + body.vel.x * dt;
    if !grid.solid_in_rect(next_x, body.pos.y, body.size.x, body.size.y) {
        body.pos.x = next_x;
    } else {
        let step = body.vel.x.signum();
        while (body.pos.x - next_x).abs() > BACKOFF_SLACK {
            let try_x = body.pos.x + step;
            if grid.solid_in_rect(try_x, body.pos.y, body.size.x, body.size.y) {
                break;
            }
            body.pos.x = try_x;
        }
        body.vel.x = 0.0;
    }

    // Ride detection happens between the axes so the carry below can
    // override a "falling past the platform" vertical result.
    let ride = find_ride(body, platforms);

    // Vertical axis
    let next_y = body.pos.y + body.vel.y * dt;
    if !grid.solid_in_rect(body.pos.x, next_y, body.size.x, body.size.y) {
        body.pos.y = next_y;
    } else {
        let step = body.vel.y.signum();
        while (body.pos.y - next_y).abs() > BACKOFF_SLACK {
            let try_y = body.pos.y + step;
            if grid.solid_in_rect(body.pos.x, try_y, body.size.x, body.size.y) {
                break;
            }
            body.pos.y = try_y;
        }
        if body.vel.y > 0.0 {
            body.grounded = true;
        }
        body.vel.y = 0.0;
    }

    // Platform carry: snap the feet onto the top surface and piggyback
    // the platform's own displacement this tick.
    if let Some(idx) = ride {
        let platform = &platforms[idx];
        if body.vel.y >= 0.0 {
            let feet = body.feet_y();
            if feet >= platform.pos.y - CARRY_BAND_ABOVE && feet <= platform.pos.y + CARRY_BAND_BELOW
            {
                body.pos.y = platform.pos.y - body.size.y;
                body.vel.y = 0.0;
                body.grounded = true;
                body.pos.x += platform.displacement(dt);
            }
        }
    }
}

/// Index of the first platform whose rect overlaps the probe strip
/// directly beneath the body's feet, if any
fn find_ride(body: &Body, platforms: &[MovingPlatform]) -> Option<usize> {
    let probe_pos = Vec2::new(body.pos.x, body.feet_y() + 1.0);
    let probe_size = Vec2::new(body.size.x, RIDE_PROBE_HEIGHT);
    platforms
        .iter()
        .position(|p| aabb_overlap(probe_pos, probe_size, p.pos, p.size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 12x8-cell room: solid border, empty interior, floor on row 6
    fn room() -> TileGrid {
        let mut rows = vec![vec![0u8; 12]; 8];
        for x in 0..12 {
            rows[0][x] = 1;
            rows[6][x] = 1;
            rows[7][x] = 1;
        }
        for row in rows.iter_mut() {
            row[0] = 1;
            row[11] = 1;
        }
        TileGrid::new(rows)
    }

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    #[test]
    fn test_settles_on_floor_and_holds() {
        let grid = room();
        let mut body = body_at(40.0, 96.0 - PLAYER_HEIGHT);
        // Let the body reach its resting contact with the floor row
        for _ in 0..10 {
            resolve_motion(&mut body, &grid, 0.016, &[]);
        }
        assert!(body.grounded);
        let rest_y = body.pos.y;
        resolve_motion(&mut body, &grid, 0.016, &[]);
        assert_eq!(body.pos.y, rest_y);
        assert!(body.grounded);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_wall_stops_horizontal_and_zeroes_vx() {
        let grid = room();
        let mut body = body_at(40.0, 60.0);
        body.vel.x = 400.0;
        for _ in 0..30 {
            resolve_motion(&mut body, &grid, 1.0 / 30.0, &[]);
        }
        assert_eq!(body.vel.x, 0.0);
        // Stopped just short of the right wall at x=176, within the
        // one-unit slack of the back-off
        assert!(body.pos.x + body.size.x < 177.0);
        assert!(!grid.solid_in_rect(body.pos.x, body.pos.y, body.size.x, body.size.y));
    }

    #[test]
    fn test_ceiling_blocks_upward_without_grounding() {
        let grid = room();
        let mut body = body_at(40.0, 24.0);
        body.vel.y = -500.0;
        resolve_motion(&mut body, &grid, 1.0 / 30.0, &[]);
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_platform_carry_snaps_and_displaces() {
        let grid = TileGrid::new(vec![vec![0u8; 32]; 16]);
        let platform = MovingPlatform {
            pos: Vec2::new(100.0, 120.0),
            size: Vec2::new(48.0, 8.0),
            min_x: 80.0,
            max_x: 240.0,
            speed: 40.0,
            dir: 1.0,
        };
        let mut body = body_at(110.0, 120.0 - PLAYER_HEIGHT - 1.0);
        body.vel.y = 30.0;
        let dt = 0.016;
        resolve_motion(&mut body, &grid, dt, &[platform.clone()]);
        // Feet snapped exactly onto the platform top, carried sideways
        assert_eq!(body.feet_y(), platform.pos.y);
        assert!(body.grounded);
        assert_eq!(body.vel.y, 0.0);
        assert!((body.pos.x - (110.0 + platform.displacement(dt))).abs() < 1e-4);
    }

    #[test]
    fn test_no_carry_when_moving_upward() {
        let grid = TileGrid::new(vec![vec![0u8; 32]; 16]);
        let platform = MovingPlatform {
            pos: Vec2::new(100.0, 120.0),
            size: Vec2::new(48.0, 8.0),
            min_x: 80.0,
            max_x: 240.0,
            speed: 40.0,
            dir: 1.0,
        };
        let mut body = body_at(110.0, 120.0 - PLAYER_HEIGHT - 1.0);
        body.vel.y = -300.0;
        resolve_motion(&mut body, &grid, 0.016, &[platform]);
        assert!(!body.grounded);
        assert!(body.vel.y < 0.0);
    }

    proptest! {
        /// Penetration invariant: a body starting clear of solids is
        /// still clear of solids after any resolved step.
        #[test]
        fn prop_no_penetration_after_resolve(
            x in 20.0f32..150.0,
            y in 20.0f32..70.0,
            vx in -300.0f32..300.0,
            vy in -300.0f32..300.0,
        ) {
            let grid = room();
            let mut body = body_at(x, y);
            prop_assume!(!grid.solid_in_rect(body.pos.x, body.pos.y, body.size.x, body.size.y));
            body.vel = Vec2::new(vx, vy);
            for _ in 0..8 {
                resolve_motion(&mut body, &grid, 1.0 / 30.0, &[]);
                prop_assert!(!grid.solid_in_rect(
                    body.pos.x,
                    body.pos.y,
                    body.size.x,
                    body.size.y
                ));
            }
        }
    }
}
