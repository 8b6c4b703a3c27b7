//! Frustum culling for visibility determination
//!
//! Provides frustum extraction from a camera basis and projection, the
//! ground-plane footprint of a frustum, and point and sphere tests both in
//! eye space and against the world-space planes.

use glam::{Mat4, Vec2, Vec3, Vec3Swizzles, Vec4};

use super::eye::Basis;
use super::geometry::{Aabb2d, Obb2d};
use super::plane::{intersect_three_planes, Plane};

const FAR_BIT: usize = 4;
const RIGHT_BIT: usize = 2;
const TOP_BIT: usize = 1;

/// The six clipping planes, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumPlane {
    Left,
    Right,
    Bottom,
    Top,
    Far,
    Near,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Far,
        FrustumPlane::Near,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Result of a frustum intersection test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    /// Completely outside the frustum.
    Disjoint,
    /// Crossing at least one boundary.
    Partial,
    /// Completely inside the frustum.
    Contained,
}

/// One value per side of the frustum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sides {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

/// `1 / cos(atan(tangent))`: how much a radius widens a side at unit depth.
#[inline]
fn radius_factor(tangent: f32) -> f32 {
    (1.0 + tangent * tangent).sqrt()
}

/// Opening of a frustum, as tangents of the half-angles.
///
/// Each side's tangent is its offset from the view axis at unit depth,
/// positive for a frustum that contains its own axis. The radius factors
/// let sphere tests widen a side by a radius without trigonometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrustumShape {
    /// Same opening on opposite sides.
    Symmetric {
        vertical: f32,
        horizontal: f32,
        vertical_radius: f32,
        horizontal_radius: f32,
    },
    /// Independent opening on every side.
    Asymmetric { tangents: Sides, radii: Sides },
}

impl FrustumShape {
    fn from_tangents(vertical: f32, horizontal: f32) -> Self {
        FrustumShape::Symmetric {
            vertical,
            horizontal,
            vertical_radius: radius_factor(vertical),
            horizontal_radius: radius_factor(horizontal),
        }
    }

    /// Symmetric shape from a vertical field of view (radians) and a
    /// width / height aspect ratio.
    pub fn perspective(fov_y: f32, aspect: f32) -> Self {
        let vertical = (fov_y * 0.5).tan();
        Self::from_tangents(vertical, vertical * aspect)
    }

    /// Symmetric shape whose near rectangle has the given size.
    pub fn symmetric(near_width: f32, near_height: f32, near: f32) -> Self {
        Self::from_tangents(near_height / (2.0 * near), near_width / (2.0 * near))
    }

    /// Asymmetric shape from near-plane extents, as in `glFrustum`.
    pub fn asymmetric(left: f32, right: f32, bottom: f32, top: f32, near: f32) -> Self {
        let tangents = Sides {
            left: -left / near,
            right: right / near,
            bottom: -bottom / near,
            top: top / near,
        };
        let radii = Sides {
            left: radius_factor(tangents.left),
            right: radius_factor(tangents.right),
            bottom: radius_factor(tangents.bottom),
            top: radius_factor(tangents.top),
        };
        FrustumShape::Asymmetric { tangents, radii }
    }

    /// Per-side tangents.
    pub fn tangents(&self) -> Sides {
        match *self {
            FrustumShape::Symmetric {
                vertical,
                horizontal,
                ..
            } => Sides {
                left: horizontal,
                right: horizontal,
                bottom: vertical,
                top: vertical,
            },
            FrustumShape::Asymmetric { tangents, .. } => tangents,
        }
    }

    /// Per-side radius factors.
    pub fn radii(&self) -> Sides {
        match *self {
            FrustumShape::Symmetric {
                vertical_radius,
                horizontal_radius,
                ..
            } => Sides {
                left: horizontal_radius,
                right: horizontal_radius,
                bottom: vertical_radius,
                top: vertical_radius,
            },
            FrustumShape::Asymmetric { radii, .. } => radii,
        }
    }
}

/// A perspective projection: frustum shape plus clip distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub shape: FrustumShape,
    pub near: f32,
    pub far: f32,
}

/// Eye-relative coordinates of a point: depth along forward, then offsets
/// along left and up.
struct EyeCoords {
    depth: f32,
    horizontal: f32,
    vertical: f32,
}

impl Projection {
    /// Symmetric perspective from a vertical field of view in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            shape: FrustumShape::perspective(fov_y, aspect),
            near,
            far,
        }
    }

    /// Symmetric frustum from the size of its near rectangle.
    pub fn symmetric(near_width: f32, near_height: f32, near: f32, far: f32) -> Self {
        Self {
            shape: FrustumShape::symmetric(near_width, near_height, near),
            near,
            far,
        }
    }

    /// Symmetric frustum with the same near rectangle size as the extents.
    /// The rectangle is recentred on the view axis.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::symmetric(right - left, top - bottom, near, far)
    }

    /// Asymmetric frustum from near-plane extents.
    pub fn general(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            shape: FrustumShape::asymmetric(left, right, bottom, top, near),
            near,
            far,
        }
    }

    /// Update the aspect ratio. Asymmetric projections are left unchanged.
    pub fn set_aspect(&mut self, aspect: f32) {
        if let FrustumShape::Symmetric { vertical, .. } = self.shape {
            self.shape = FrustumShape::from_tangents(vertical, vertical * aspect);
        }
    }

    /// Near-plane extents as passed to `glFrustum`.
    pub fn extents(&self) -> Sides {
        let tangents = self.shape.tangents();
        Sides {
            left: -tangents.left * self.near,
            right: tangents.right * self.near,
            bottom: -tangents.bottom * self.near,
            top: tangents.top * self.near,
        }
    }

    /// OpenGL `glFrustum` projection matrix (clip depth in `[-w, w]`).
    pub fn matrix(&self) -> Mat4 {
        let Sides {
            left: l,
            right: r,
            bottom: b,
            top: t,
        } = self.extents();
        let (n, f) = (self.near, self.far);

        Mat4::from_cols(
            Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
            Vec4::new(
                (r + l) / (r - l),
                (t + b) / (t - b),
                -(f + n) / (f - n),
                -1.0,
            ),
            Vec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
        )
    }

    fn eye_coords<B: Basis + ?Sized>(basis: &B, point: Vec3) -> EyeCoords {
        let op = point - basis.eye_position();
        EyeCoords {
            depth: op.dot(basis.forward()),
            horizontal: op.dot(basis.left()),
            vertical: op.dot(basis.up()),
        }
    }

    /// Check if a point is inside the frustum seen from `basis`.
    pub fn contains_point<B: Basis + ?Sized>(&self, basis: &B, point: Vec3) -> bool {
        let p = Self::eye_coords(basis, point);
        if p.depth < self.near || p.depth > self.far {
            return false;
        }

        let t = self.shape.tangents();
        p.horizontal >= -t.right * p.depth
            && p.horizontal <= t.left * p.depth
            && p.vertical >= -t.bottom * p.depth
            && p.vertical <= t.top * p.depth
    }

    /// Check if a sphere is at least partially inside the frustum seen from
    /// `basis`.
    ///
    /// Each side is tested independently, so a sphere just outside a corner
    /// edge may still be reported as inside.
    pub fn contains_sphere<B: Basis + ?Sized>(&self, basis: &B, center: Vec3, radius: f32) -> bool {
        let p = Self::eye_coords(basis, center);
        if p.depth < self.near - radius || p.depth > self.far + radius {
            return false;
        }

        let t = self.shape.tangents();
        let r = self.shape.radii();
        p.horizontal >= -t.right * p.depth - radius * r.right
            && p.horizontal <= t.left * p.depth + radius * r.left
            && p.vertical >= -t.bottom * p.depth - radius * r.bottom
            && p.vertical <= t.top * p.depth + radius * r.top
    }

    /// Classify a sphere against the frustum seen from `basis`.
    pub fn test_sphere<B: Basis + ?Sized>(&self, basis: &B, center: Vec3, radius: f32) -> Intersection {
        if !self.contains_sphere(basis, center, radius) {
            return Intersection::Disjoint;
        }

        let p = Self::eye_coords(basis, center);
        let t = self.shape.tangents();
        let r = self.shape.radii();
        let crosses = p.depth > self.far - radius
            || p.depth < self.near + radius
            || p.horizontal < -t.right * p.depth + radius * r.right
            || p.horizontal > t.left * p.depth - radius * r.left
            || p.vertical < -t.bottom * p.depth + radius * r.bottom
            || p.vertical > t.top * p.depth - radius * r.top;

        if crosses {
            Intersection::Partial
        } else {
            Intersection::Contained
        }
    }
}

#[inline]
fn corner_index(far: bool, right: bool, top: bool) -> usize {
    usize::from(far) * FAR_BIT + usize::from(right) * RIGHT_BIT + usize::from(top) * TOP_BIT
}

/// Outward planes through the corner triples of each face.
fn planes_from_vertices(v: &[Vec3; 8]) -> [Plane; 6] {
    let c = |far, right, top| v[corner_index(far, right, top)];
    [
        Plane::from_three_points(c(false, false, false), c(true, false, false), c(false, false, true)),
        Plane::from_three_points(c(false, true, false), c(false, true, true), c(true, true, false)),
        Plane::from_three_points(c(false, false, false), c(false, true, false), c(true, false, false)),
        Plane::from_three_points(c(false, false, true), c(true, false, true), c(false, true, true)),
        Plane::from_three_points(c(true, false, false), c(true, true, false), c(true, false, true)),
        Plane::from_three_points(c(false, false, false), c(false, false, true), c(false, true, false)),
    ]
}

/// Footprint of a frustum on the ground plane (y = 0), keeping only what
/// lies at or above it.
///
/// Corners with `y >= 0` are kept, and every box edge running from such a
/// corner to one below ground contributes its crossing point. The points
/// are reduced to the optimal oriented rectangle and its axis-aligned box,
/// both in (x, z).
pub fn ground_bounds(vertices: &[Vec3; 8]) -> (Obb2d, Aabb2d) {
    let mut points: Vec<Vec2> = Vec::with_capacity(12);

    for (i, &a) in vertices.iter().enumerate() {
        if a.y < 0.0 {
            continue;
        }
        points.push(a.xz());

        for bit in [TOP_BIT, RIGHT_BIT, FAR_BIT] {
            let b = vertices[i ^ bit];
            if b.y < 0.0 {
                let t = a.y / (a.y - b.y);
                points.push(a.lerp(b, t).xz());
            }
        }
    }

    Obb2d::create_optimal(&points)
}

/// View frustum: 8 corners, 6 outward planes and the ground footprint.
///
/// Corners are indexed by `far * 4 + right * 2 + top`. A point is inside
/// when its signed distance to every plane is at most zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
    vertices: [Vec3; 8],
    obb: Obb2d,
    aabb: Aabb2d,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            planes: [Plane::default(); 6],
            vertices: [Vec3::ZERO; 8],
            obb: Obb2d::default(),
            aabb: Aabb2d::default(),
        }
    }
}

impl Frustum {
    /// Build the frustum of `projection` seen from `basis`.
    ///
    /// Corners are placed analytically along the basis, and the planes are
    /// derived from them.
    pub fn extract<B: Basis + ?Sized>(basis: &B, projection: &Projection) -> Self {
        let eye = basis.eye_position();
        let (left, up, forward) = (basis.left(), basis.up(), basis.forward());
        let tangents = projection.shape.tangents();

        let mut vertices = [Vec3::ZERO; 8];
        for (index, vertex) in vertices.iter_mut().enumerate() {
            let depth = if index & FAR_BIT != 0 {
                projection.far
            } else {
                projection.near
            };
            let horizontal = if index & RIGHT_BIT != 0 {
                -tangents.right
            } else {
                tangents.left
            };
            let vertical = if index & TOP_BIT != 0 {
                tangents.top
            } else {
                -tangents.bottom
            };
            *vertex = eye + (forward + left * horizontal + up * vertical) * depth;
        }

        let planes = planes_from_vertices(&vertices);
        let (obb, aabb) = ground_bounds(&vertices);
        tracing::trace!(?eye, ?forward, near = projection.near, far = projection.far, "extracted frustum");

        Self {
            planes,
            vertices,
            obb,
            aabb,
        }
    }

    /// Build a frustum from its planes, in [`FrustumPlane`] order.
    ///
    /// Corners are the intersections of the three planes meeting there. A
    /// corner whose planes do not meet in a single point is logged and left
    /// at the origin.
    pub fn from_planes(planes: [Plane; 6]) -> Self {
        let mut frustum = Self::default();
        frustum.set_planes(planes);
        frustum
    }

    /// Replace the planes and rebuild the corners and the footprint.
    ///
    /// A corner whose planes do not meet keeps its previous position.
    pub fn set_planes(&mut self, planes: [Plane; 6]) {
        self.planes = planes;

        for (index, vertex) in self.vertices.iter_mut().enumerate() {
            let depth = if index & FAR_BIT != 0 {
                FrustumPlane::Far
            } else {
                FrustumPlane::Near
            };
            let horizontal = if index & RIGHT_BIT != 0 {
                FrustumPlane::Right
            } else {
                FrustumPlane::Left
            };
            let vertical = if index & TOP_BIT != 0 {
                FrustumPlane::Top
            } else {
                FrustumPlane::Bottom
            };

            match intersect_three_planes(
                &planes[depth.index()],
                &planes[horizontal.index()],
                &planes[vertical.index()],
            ) {
                Some(point) => *vertex = point,
                None => tracing::error!(
                    corner = index,
                    ?depth,
                    ?horizontal,
                    ?vertical,
                    "frustum planes do not intersect, keeping previous corner"
                ),
            }
        }

        (self.obb, self.aabb) = ground_bounds(&self.vertices);
    }

    /// The six planes in `FrustumPlane` order.
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// One plane by name.
    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which.index()]
    }

    /// Corners indexed `far * 4 + right * 2 + top`.
    pub fn vertices(&self) -> &[Vec3; 8] {
        &self.vertices
    }

    /// One corner by its sides.
    pub fn vertex(&self, far: bool, right: bool, top: bool) -> Vec3 {
        self.vertices[corner_index(far, right, top)]
    }

    /// The 12 box edges as corner pairs, for debug line rendering.
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let mut edges = [(Vec3::ZERO, Vec3::ZERO); 12];
        let mut n = 0;
        for i in 0..8 {
            for bit in [TOP_BIT, RIGHT_BIT, FAR_BIT] {
                if i & bit == 0 {
                    edges[n] = (self.vertices[i], self.vertices[i | bit]);
                    n += 1;
                }
            }
        }
        edges
    }

    /// Oriented footprint on the ground plane, in (x, z).
    pub fn obb_2d(&self) -> &Obb2d {
        &self.obb
    }

    /// Axis-aligned footprint on the ground plane, in (x, z).
    pub fn aabb_2d(&self) -> &Aabb2d {
        &self.aabb
    }

    /// Test if a point is inside the frustum.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance(point) <= 0.0)
    }

    /// Test if a sphere is at least partially inside the frustum.
    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes.iter().all(|plane| plane.distance(center) <= radius)
    }

    /// Classify a sphere against the frustum planes.
    pub fn test_sphere(&self, center: Vec3, radius: f32) -> Intersection {
        let mut result = Intersection::Contained;

        for plane in &self.planes {
            let distance = plane.distance(center);
            if distance > radius {
                return Intersection::Disjoint;
            }
            if distance > -radius {
                result = Intersection::Partial;
            }
        }

        result
    }
}
