//! Frustum camera
//!
//! Provides the frustum camera: an [`Eye`] pose plus an optional projection.
//! The frustum, its planes and its ground footprint are rebuilt whenever
//! either changes.

use glam::{IVec3, Mat4, Vec2, Vec3, Vec4};

use super::culling::{Frustum, FrustumPlane, Intersection, Projection};
use super::eye::{Basis, Eye, ViewMatrixType};
use super::geometry::{Aabb2d, Obb2d};
use super::plane::Plane;
use super::settings::{CameraError, CameraSettings};

/// Pixel rectangle the camera draws into, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Viewport {
    /// Viewport of the given size anchored at the screen origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Width over height, `None` for a zero-height viewport.
    pub fn aspect(&self) -> Option<f32> {
        (self.height > 0).then(|| self.width as f32 / self.height as f32)
    }

    /// Map normalized device coordinates to pixels. NDC `y = 1` is the top row.
    pub fn to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.x as f32 + (ndc.x + 1.0) * 0.5 * self.width as f32,
            self.y as f32 + (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }
}

/// A world point projected to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Pixel position, origin at the top-left corner of the screen.
    pub position: Vec2,
    /// Window depth, 0 on the near plane and 1 on the far plane.
    pub depth: f32,
}

/// A perspective camera with a cached frustum.
///
/// Starts unconfigured: until a projection is set, the frustum is the
/// default one and the projection matrix is the identity.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Eye,
    projection: Option<Projection>,
    frustum: Frustum,
    viewport: Viewport,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Eye::default())
    }
}

impl Camera {
    /// Create a new unconfigured camera at the given pose.
    pub fn new(eye: Eye) -> Self {
        Self {
            eye,
            projection: None,
            frustum: Frustum::default(),
            viewport: Viewport::default(),
        }
    }

    /// Create a configured camera from validated settings.
    pub fn from_settings(settings: &CameraSettings) -> Result<Self, CameraError> {
        let projection = settings.to_projection()?;
        let eye = Eye::new(
            settings.observed_position,
            settings.rotation,
            settings.distance,
            settings.scale,
        );

        let mut camera = Self::new(eye);
        camera.set_projection(projection);
        Ok(camera)
    }

    /// Set the projection and rebuild the frustum.
    pub fn set_projection(&mut self, projection: Projection) {
        tracing::debug!(?projection, "camera projection changed");
        self.projection = Some(projection);
        self.extract_frustum();
    }

    /// Symmetric perspective projection.
    pub fn set_as_perspective(&mut self, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) {
        self.set_projection(Projection::perspective(
            fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        ));
    }

    /// Symmetric projection from the size of the near rectangle.
    pub fn set_as_symmetric_frustum(&mut self, near_height: f32, near_width: f32, near: f32, far: f32) {
        self.set_projection(Projection::symmetric(near_width, near_height, near, far));
    }

    /// Symmetric projection with the near rectangle size of the extents.
    pub fn set_as_frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.set_projection(Projection::frustum(left, right, bottom, top, near, far));
    }

    /// Asymmetric projection from near-plane extents.
    pub fn set_as_general_frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        self.set_projection(Projection::general(left, right, bottom, top, near, far));
    }

    /// Move the eye to a new orbit pose.
    pub fn set_pose(&mut self, observed: IVec3, rotation: IVec3, distance: f32, scale: f32) {
        self.eye.set_pose(observed, rotation, distance, scale);
        self.extract_frustum();
    }

    /// Place the eye at `eye` looking at `target`.
    pub fn set_as_look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.eye.set_as_look_at(eye, target, up);
        self.extract_frustum();
    }

    /// Move the observed point, keeping the orientation.
    pub fn set_observed_position(&mut self, observed: IVec3) {
        self.eye.set_observed_position(observed);
        self.extract_frustum();
    }

    /// Set the fixed-point pitch, yaw and roll.
    pub fn set_rotation(&mut self, rotation: IVec3) {
        self.eye.set_rotation(rotation);
        self.extract_frustum();
    }

    /// Set the uniform view scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.eye.set_scale(scale);
        self.extract_frustum();
    }

    /// Set the distance from the observed point to the eye.
    pub fn set_distance(&mut self, distance: f32) {
        self.eye.set_distance(distance);
        self.extract_frustum();
    }

    /// Set the viewport. A symmetric projection follows its aspect ratio.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let Some(aspect) = viewport.aspect() else {
            return;
        };
        if let Some(projection) = self.projection.as_mut() {
            projection.set_aspect(aspect);
            self.extract_frustum();
        }
    }

    fn extract_frustum(&mut self) {
        if let Some(projection) = &self.projection {
            self.frustum = Frustum::extract(&self.eye, projection);
        }
    }

    /// Current pose.
    pub fn eye(&self) -> &Eye {
        &self.eye
    }

    /// Point the eye orbits.
    pub fn observed_position(&self) -> Vec3 {
        self.eye.observed_position()
    }

    /// Fixed-point pitch, yaw and roll.
    pub fn rotation(&self) -> IVec3 {
        self.eye.rotation()
    }

    /// Uniform view scale.
    pub fn scale(&self) -> f32 {
        self.eye.scale()
    }

    /// Distance from the observed point to the eye.
    pub fn distance(&self) -> f32 {
        self.eye.distance()
    }

    /// Whether a projection has been set.
    pub fn is_configured(&self) -> bool {
        self.projection.is_some()
    }

    /// Current projection, if any.
    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    /// Near clip distance. Zero when unconfigured.
    pub fn near_distance(&self) -> f32 {
        debug_assert!(self.is_configured(), "camera has no projection");
        self.projection.map_or(0.0, |projection| projection.near)
    }

    /// Far clip distance. Zero when unconfigured.
    pub fn far_distance(&self) -> f32 {
        debug_assert!(self.is_configured(), "camera has no projection");
        self.projection.map_or(0.0, |projection| projection.far)
    }

    /// Cached world-space frustum.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// One of the six outward-facing frustum planes.
    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        self.frustum.plane(which)
    }

    /// Frustum corner selected by far/near, right/left and top/bottom.
    pub fn vertex(&self, far: bool, right: bool, top: bool) -> Vec3 {
        self.frustum.vertex(far, right, top)
    }

    /// Oriented ground footprint of the frustum.
    pub fn obb_2d(&self) -> &Obb2d {
        self.frustum.obb_2d()
    }

    /// Axis-aligned ground footprint of the frustum.
    pub fn aabb_2d(&self) -> &Aabb2d {
        self.frustum.aabb_2d()
    }

    /// Check if a point is inside the frustum. Always false when unconfigured.
    pub fn contains_point(&self, point: Vec3) -> bool {
        debug_assert!(self.is_configured(), "camera has no projection");
        self.projection
            .is_some_and(|projection| projection.contains_point(&self.eye, point))
    }

    /// Check if a sphere is at least partially inside the frustum.
    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        debug_assert!(self.is_configured(), "camera has no projection");
        self.projection
            .is_some_and(|projection| projection.contains_sphere(&self.eye, center, radius))
    }

    /// Classify a sphere against the frustum.
    pub fn test_sphere(&self, center: Vec3, radius: f32) -> Intersection {
        debug_assert!(self.is_configured(), "camera has no projection");
        self.projection.map_or(Intersection::Disjoint, |projection| {
            projection.test_sphere(&self.eye, center, radius)
        })
    }

    /// View matrix for the given coordinate convention.
    pub fn view_matrix_of_type(&self, view_type: ViewMatrixType) -> Mat4 {
        self.eye.view_matrix(view_type)
    }

    /// View matrix in world coordinates.
    pub fn view_matrix(&self) -> Mat4 {
        self.eye.view_matrix(ViewMatrixType::Normal)
    }

    /// Projection matrix, the identity when unconfigured.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
            .map_or(Mat4::IDENTITY, |projection| projection.matrix())
    }

    /// Projection times view.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Project a world point to the screen, like `gluProject` but with the
    /// origin at the top-left corner of the viewport.
    ///
    /// Returns `None` for points in the plane of the eye, where the
    /// perspective divide is undefined.
    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        if clip.w == 0.0 {
            return None;
        }
        let ndc = clip / clip.w;

        Some(ScreenPoint {
            position: self.viewport.to_screen(ndc.truncate().truncate()),
            depth: (ndc.z + 1.0) * 0.5,
        })
    }
}

impl Basis for Camera {
    fn eye_position(&self) -> Vec3 {
        self.eye.eye_position()
    }

    fn left(&self) -> Vec3 {
        self.eye.left()
    }

    fn up(&self) -> Vec3 {
        self.eye.up()
    }

    fn forward(&self) -> Vec3 {
        self.eye.forward()
    }
}

/// Per-frame camera block laid out for a GPU uniform buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Projection times view, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// Eye position, w set to 1.
    pub eye: [f32; 4],
    /// Forward direction, w set to 0.
    pub forward: [f32; 4],
}

impl CameraUniform {
    /// Snapshot the camera's matrices and basis.
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            eye: camera.eye_position().extend(1.0).to_array(),
            forward: Vec4::from((camera.forward(), 0.0)).to_array(),
        }
    }
}
