//! Shared scene setup for the benchmarks.

use frustum_bounds::{Camera, Eye, FULL_TURN};
use glam::{IVec3, Vec2, Vec3};

/// `n` points on a slightly irregular ring, so every point is on the hull.
pub fn ring_points(n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let angle = i as f32 / n as f32 * std::f32::consts::TAU;
            let radius = 100.0 + (i % 7) as f32;
            Vec2::new(angle.cos() * 1.5, angle.sin()) * radius
        })
        .collect()
}

/// `n` points on a grid, so most of them are interior.
pub fn grid_points(n: usize) -> Vec<Vec2> {
    let side = (n as f32).sqrt().ceil() as usize;
    (0..n)
        .map(|i| Vec2::new((i % side) as f32 * 3.0, (i / side) as f32 * 2.0))
        .collect()
}

/// RTS-style camera: looking down at the map from far above.
pub fn strategy_camera() -> Camera {
    let eye = Eye::new(
        IVec3::new(4096, 0, 4096),
        IVec3::new(-FULL_TURN / 10, FULL_TURN / 8, 0),
        2500.0,
        1.0,
    );
    let mut camera = Camera::new(eye);
    camera.set_as_perspective(60.0, 16.0 / 9.0, 16.0, 30000.0);
    camera
}

/// `n` sphere centres scattered over an 8192 x 8192 map.
pub fn scattered_spheres(n: usize) -> Vec<Vec3> {
    (0..n)
        .map(|i| {
            // Weyl sequence, evenly spread without a random number generator
            let x = (i as f32 * 0.618_034).fract() * 8192.0;
            let z = (i as f32 * 0.754_877_7).fract() * 8192.0;
            Vec3::new(x + 16.0, 32.0, z + 16.0)
        })
        .collect()
}
