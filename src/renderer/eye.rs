//! Camera referential frame
//!
//! The eye orbits an observed position: it is rotated by yaw, pitch and roll
//! (fixed-point angles), scaled, and pushed back along its view axis by a
//! distance. Every setter recomputes the derived basis immediately.

use std::f64::consts::TAU;

use glam::{Affine3A, DMat3, DMat4, DVec3, IVec3, Mat4, Vec3};

/// Fixed-point angle units in a full turn.
pub const FULL_TURN: i32 = 65536;

/// Convert a fixed-point angle to radians.
#[inline]
pub fn fixed_to_radians(angle: i32) -> f64 {
    f64::from(angle) * TAU / f64::from(FULL_TURN)
}

/// Convert radians to the nearest fixed-point angle.
#[inline]
pub fn radians_to_fixed(radians: f64) -> i32 {
    (radians * f64::from(FULL_TURN) / TAU).round() as i32
}

/// Anything exposing a camera position and an orthonormal view basis.
pub trait Basis {
    /// Actual position of the eye.
    fn eye_position(&self) -> Vec3;

    /// Unit vector pointing to the left of the view.
    fn left(&self) -> Vec3;

    /// Unit vector pointing up in the view.
    fn up(&self) -> Vec3;

    /// Unit viewing direction.
    fn forward(&self) -> Vec3;
}

/// Which coordinates a view matrix expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMatrixType {
    /// Render everything in world coordinates.
    #[default]
    Normal,
    /// Render geometry whose x and z have already been made relative to the
    /// eye's x and z; only the eye height is removed.
    XzRelative,
}

/// Camera pose and the view basis derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Eye {
    observed: Vec3,
    /// Pitch (x), yaw (y) and roll (z) in fixed-point units.
    rotation: IVec3,
    distance: f32,
    scale: f32,

    eye: Vec3,
    left: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl Default for Eye {
    fn default() -> Self {
        Self::new(IVec3::ZERO, IVec3::ZERO, 0.0, 1.0)
    }
}

impl Eye {
    /// Create an eye looking at `observed` from `distance` away.
    pub fn new(observed: IVec3, rotation: IVec3, distance: f32, scale: f32) -> Self {
        let mut eye = Self {
            observed: observed.as_vec3(),
            rotation,
            distance,
            scale,
            eye: Vec3::ZERO,
            left: Vec3::X,
            up: Vec3::Y,
            forward: Vec3::Z,
        };
        eye.update_ref_frame();
        eye
    }

    /// Create an eye from a position, a target and an up hint.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut result = Self::default();
        result.set_as_look_at(eye, target, up);
        result
    }

    /// Set the whole pose at once.
    pub fn set_pose(&mut self, observed: IVec3, rotation: IVec3, distance: f32, scale: f32) {
        self.observed = observed.as_vec3();
        self.rotation = rotation;
        self.distance = distance;
        self.scale = scale;
        self.update_ref_frame();
    }

    /// Place the eye at `eye` looking at `target`, `up` giving the vertical.
    ///
    /// The basis is taken directly from the look vector. The fixed-point
    /// rotation is recovered afterwards with `asin`/`acos`, which loses
    /// precision close to straight up or down. A target on the eye keeps the
    /// previous pose; an `up` parallel to the look vector is replaced by an
    /// arbitrary perpendicular.
    pub fn set_as_look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        let to_target = (target - eye).as_dvec3();
        let forward = to_target.normalize_or_zero();
        if forward == DVec3::ZERO {
            tracing::warn!(?eye, ?target, "look-at target coincides with the eye, keeping pose");
            return;
        }

        let mut left = up.as_dvec3().cross(forward).normalize_or_zero();
        if left == DVec3::ZERO {
            tracing::warn!(?up, ?forward, "up vector parallel to the view direction");
            left = forward.any_orthonormal_vector();
        }
        let up = forward.cross(left);

        self.eye = eye;
        self.observed = target;
        self.forward = forward.as_vec3();
        self.left = left.as_vec3();
        self.up = up.as_vec3();
        self.distance = to_target.length() as f32;
        self.scale = 1.0;

        // Both yaw and roll are divided by cos(pitch) and take their sign
        // from the basis, so negative angles survive the acos.
        let pitch = forward.y.clamp(-1.0, 1.0).asin();
        let cos_pitch = pitch.cos();
        let yaw = (-forward.z / cos_pitch)
            .clamp(-1.0, 1.0)
            .acos()
            .copysign(-forward.x);
        let roll = (up.y / cos_pitch)
            .clamp(-1.0, 1.0)
            .acos()
            .copysign(-left.y);

        self.rotation = IVec3::new(
            radians_to_fixed(pitch),
            radians_to_fixed(yaw),
            radians_to_fixed(roll),
        );
    }

    /// Move the observed position, keeping rotation and distance.
    ///
    /// The basis does not change, so the eye is simply translated along.
    pub fn set_observed_position(&mut self, observed: IVec3) {
        let observed = observed.as_vec3();
        self.eye += observed - self.observed;
        self.observed = observed;
    }

    /// Set pitch, yaw and roll in fixed-point units.
    pub fn set_rotation(&mut self, rotation: IVec3) {
        self.rotation = rotation;
        self.update_ref_frame();
    }

    /// Set the uniform view scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.update_ref_frame();
    }

    /// Set the distance from the observed position to the eye.
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
        self.update_ref_frame();
    }

    /// Point the eye looks at.
    pub fn observed_position(&self) -> Vec3 {
        self.observed
    }

    /// Pitch (x), yaw (y) and roll (z) in fixed-point units.
    pub fn rotation(&self) -> IVec3 {
        self.rotation
    }

    /// Uniform view scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Distance from the observed position to the eye, before scaling.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Yaw, pitch and roll in radians.
    fn angles(&self) -> (f64, f64, f64) {
        (
            fixed_to_radians(self.rotation.y),
            fixed_to_radians(self.rotation.x),
            fixed_to_radians(self.rotation.z),
        )
    }

    /// `RotY(yaw) * RotX(pitch) * RotZ(roll)`
    fn rotation_matrix(&self) -> DMat3 {
        let (yaw, pitch, roll) = self.angles();
        DMat3::from_rotation_y(yaw) * DMat3::from_rotation_x(pitch) * DMat3::from_rotation_z(roll)
    }

    /// Recompute the basis and the eye position from the pose.
    ///
    /// forward = Trans(observed) * Rot * Scale(scale) * Trans(0, 0, distance).
    /// The camera looks down -Z untransformed, so the first and third columns
    /// of the rotation are negated to get left and forward.
    fn update_ref_frame(&mut self) {
        let rot = self.rotation_matrix();
        self.left = (-rot.x_axis).as_vec3();
        self.up = rot.y_axis.as_vec3();
        self.forward = (-rot.z_axis).as_vec3();

        let push = f64::from(self.scale) * f64::from(self.distance);
        self.eye = (self.observed.as_dvec3() + rot.z_axis * push).as_vec3();
    }

    /// Point that the inverse transform moves to the origin before rotating.
    fn view_origin(&self, view_type: ViewMatrixType) -> DVec3 {
        match view_type {
            ViewMatrixType::Normal => self.eye.as_dvec3(),
            ViewMatrixType::XzRelative => DVec3::new(0.0, f64::from(self.eye.y), 0.0),
        }
    }

    /// View matrix in double precision.
    ///
    /// View = Trans(0, 0, -distance) * Scale(1 / scale) * RotZ(-roll)
    ///      * RotX(-pitch) * RotY(-yaw) * Trans(-eye).
    /// The eye position lands on `(0, 0, -distance)` in view space.
    pub fn view_matrix_f64(&self, view_type: ViewMatrixType) -> DMat4 {
        let (yaw, pitch, roll) = self.angles();
        DMat4::from_translation(DVec3::new(0.0, 0.0, -f64::from(self.distance)))
            * DMat4::from_scale(DVec3::splat(1.0 / f64::from(self.scale)))
            * DMat4::from_rotation_z(-roll)
            * DMat4::from_rotation_x(-pitch)
            * DMat4::from_rotation_y(-yaw)
            * DMat4::from_translation(-self.view_origin(view_type))
    }

    /// View matrix in single precision.
    pub fn view_matrix(&self, view_type: ViewMatrixType) -> Mat4 {
        self.view_matrix_f64(view_type).as_mat4()
    }

    /// Compact view matrix (implicit last row `[0 0 0 1]`).
    pub fn view_matrix_3x4(&self, view_type: ViewMatrixType) -> Affine3A {
        Affine3A::from_mat4(self.view_matrix(view_type))
    }
}

impl Basis for Eye {
    fn eye_position(&self) -> Vec3 {
        self.eye
    }

    fn left(&self) -> Vec3 {
        self.left
    }

    fn up(&self) -> Vec3 {
        self.up
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }
}
