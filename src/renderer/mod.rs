//! Camera geometry for the renderer
//!
//! This module provides the camera pose, its view frustum and the bounds
//! derived from it for visibility culling.

pub mod culling;
pub mod eye;
pub mod geometry;
pub mod plane;
pub mod settings;
pub mod viewer;

pub use culling::{
    ground_bounds, Frustum, FrustumPlane, FrustumShape, Intersection, Projection, Sides,
};
pub use eye::{fixed_to_radians, radians_to_fixed, Basis, Eye, ViewMatrixType, FULL_TURN};
pub use geometry::{convex_hull, Aabb2d, Obb2d};
pub use plane::{intersect_three_planes, Plane};
pub use settings::{CameraError, CameraSettings, ProjectionSettings};
pub use viewer::{Camera, CameraUniform, ScreenPoint, Viewport};
