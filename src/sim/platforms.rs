//! Moving-platform kinematics
//!
//! Platforms oscillate between fixed horizontal bounds with instant
//! reversal. The clamp-on-flip is exact so replays stay deterministic.

use super::state::MovingPlatform;

/// Advance every platform by `dt`, independent of any riders
pub fn advance_platforms(platforms: &mut [MovingPlatform], dt: f32) {
    for platform in platforms.iter_mut() {
        platform.pos.x += platform.speed * platform.dir * dt;
        if platform.pos.x <= platform.min_x {
            platform.pos.x = platform.min_x;
            platform.dir = 1.0;
        }
        if platform.pos.x + platform.size.x >= platform.max_x {
            platform.pos.x = platform.max_x - platform.size.x;
            platform.dir = -1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn platform(x: f32, dir: f32) -> MovingPlatform {
        MovingPlatform {
            pos: Vec2::new(x, 100.0),
            size: Vec2::new(48.0, 8.0),
            min_x: 64.0,
            max_x: 256.0,
            speed: 40.0,
            dir,
        }
    }

    #[test]
    fn test_clamps_and_flips_at_min() {
        let mut platforms = vec![platform(64.0, -1.0)];
        advance_platforms(&mut platforms, 1.0 / 30.0);
        assert_eq!(platforms[0].pos.x, 64.0);
        assert_eq!(platforms[0].dir, 1.0);
    }

    #[test]
    fn test_clamps_and_flips_at_max() {
        let mut platforms = vec![platform(250.0, 1.0)];
        advance_platforms(&mut platforms, 1.0 / 30.0);
        assert_eq!(platforms[0].pos.x, 256.0 - 48.0);
        assert_eq!(platforms[0].dir, -1.0);
    }

    proptest! {
        /// Position stays within [min_x, max_x - width] forever
        #[test]
        fn prop_position_bounded(
            start in 64.0f32..208.0,
            dir in prop::sample::select(vec![-1.0f32, 1.0]),
            ticks in 1usize..600,
        ) {
            let mut platforms = vec![platform(start, dir)];
            for _ in 0..ticks {
                advance_platforms(&mut platforms, 1.0 / 30.0);
                let p = &platforms[0];
                prop_assert!(p.pos.x >= p.min_x);
                prop_assert!(p.pos.x + p.size.x <= p.max_x);
            }
        }
    }
}
