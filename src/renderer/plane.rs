//! Oriented planes
//!
//! Provides the plane primitive shared by the frustum code: construction from
//! points, normals or raw coefficients, signed distance and three-plane
//! intersection.

use glam::Vec3;

/// Normals shorter than this are treated as degenerate.
const DEGENERATE_NORMAL_EPSILON: f32 = f32::EPSILON * 6.0;

/// Determinants at or below this magnitude mean the planes have no single
/// common point.
const PARALLEL_EPSILON: f32 = f32::EPSILON * 12.0;

/// A plane in 3D space: the set of points `p` with `normal · p + offset = 0`.
///
/// The normal is unit length. Degenerate construction input resets the plane
/// to [`Plane::default`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::NEG_Z,
            offset: 0.0,
        }
    }
}

impl Plane {
    /// Create a plane from a normal that is already unit length and an offset.
    pub fn new(normal: Vec3, offset: f32) -> Self {
        debug_assert!(
            (normal.length_squared() - 1.0).abs() < 1e-3,
            "plane normal must be unit length"
        );
        Self { normal, offset }
    }

    /// Plane through three points.
    ///
    /// The normal is `(p2 - p0) × (p1 - p0)`, so the winding of the points
    /// decides which side is positive.
    pub fn from_three_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self::from_normal_and_point((p2 - p0).cross(p1 - p0), p0)
    }

    /// Plane with the given (not necessarily unit) normal passing through `point`.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let length = normal.length();
        if length <= DEGENERATE_NORMAL_EPSILON {
            tracing::warn!(?normal, "degenerate plane normal, using default plane");
            return Self::default();
        }
        let normal = normal / length;
        Self {
            normal,
            offset: -normal.dot(point),
        }
    }

    /// Plane from the equation `a·x + b·y + c·z + d = 0`, rescaled so the
    /// normal is unit length.
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Self {
        let normal = Vec3::new(a, b, c);
        let length = normal.length();
        if length <= DEGENERATE_NORMAL_EPSILON {
            tracing::warn!(a, b, c, d, "degenerate plane coefficients, using default plane");
            return Self::default();
        }
        Self {
            normal: normal / length,
            offset: d / length,
        }
    }

    /// Unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Offset term of the plane equation.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Move the plane along its normal so it passes through `point`.
    pub fn set_offset_from_point(&mut self, point: Vec3) {
        self.offset = -self.normal.dot(point);
    }

    /// The same plane with its orientation reversed.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Signed distance from a point to the plane.
    /// Positive = on the side the normal points to.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }
}

/// Common point of three planes, or `None` when two or more of them are
/// (nearly) parallel.
pub fn intersect_three_planes(p0: &Plane, p1: &Plane, p2: &Plane) -> Option<Vec3> {
    let n12 = p1.normal.cross(p2.normal);
    let det = p0.normal.dot(n12);
    if det.abs() <= PARALLEL_EPSILON {
        return None;
    }
    let n20 = p2.normal.cross(p0.normal);
    let n01 = p0.normal.cross(p1.normal);
    Some(-(n12 * p0.offset + n20 * p1.offset + n01 * p2.offset) / det)
}
