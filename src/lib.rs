//! Frustum bounds
//!
//! Camera frustum geometry for a real-time 3D renderer.
//!
//! # Architecture
//!
//! Everything lives under [`renderer`]:
//!
//! 1. **plane** - Oriented planes and three-plane intersection
//! 2. **geometry** - 2D bounding boxes, convex hull and minimum-area
//!    oriented rectangle (rotating calipers)
//! 3. **eye** - Camera pose with fixed-point angles and view matrices
//! 4. **culling** - Frustum extraction, ground-plane footprint and
//!    point and sphere tests
//! 5. **viewer** - Configured camera, screen projection and GPU uniform
//! 6. **settings** - Validated camera configuration
//!
//! Degenerate geometry is never reported as an error: it falls back to a
//! safe value and is logged through `tracing`.

pub mod renderer;

// Re-export commonly used types
pub use renderer::{
    fixed_to_radians, ground_bounds, intersect_three_planes, radians_to_fixed, Aabb2d, Basis,
    Camera, CameraError, CameraSettings, CameraUniform, Eye, Frustum, FrustumPlane, FrustumShape,
    Intersection, Obb2d, Plane, Projection, ProjectionSettings, ScreenPoint, Sides,
    ViewMatrixType, Viewport, FULL_TURN,
};

// Re-export glam for convenience
pub use glam;
