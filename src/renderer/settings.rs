//! Camera settings
//!
//! Configuration for camera creation, validated before it reaches the
//! frustum code.

use glam::IVec3;
use thiserror::Error;

use super::culling::Projection;

/// Invalid camera configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CameraError {
    #[error("Invalid clip range: near {near}, far {far} (expected 0 < near < far)")]
    InvalidClipRange { near: f32, far: f32 },

    #[error("Vertical field of view {0}° is outside (0, 180)")]
    InvalidFieldOfView(f32),

    #[error("Aspect ratio {0} is not positive")]
    InvalidAspect(f32),

    #[error("Frustum near rectangle is empty: {width} x {height}")]
    EmptyFrustum { width: f32, height: f32 },

    #[error("Scale {0} is not positive")]
    InvalidScale(f32),
}

/// Shape of the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionSettings {
    /// Symmetric perspective.
    Perspective {
        /// Vertical field of view in degrees.
        fov_y_degrees: f32,
        /// Width / height.
        aspect: f32,
    },
    /// Symmetric frustum given by the size of its near rectangle.
    Symmetric { near_width: f32, near_height: f32 },
    /// Asymmetric frustum given by its near-plane extents.
    Frustum {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    },
}

/// Settings for creating a camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    /// Point the camera orbits.
    /// Default: origin
    pub observed_position: IVec3,
    /// Pitch, yaw and roll in fixed-point units (65536 per turn).
    /// Default: zero
    pub rotation: IVec3,
    /// Distance from the observed point to the eye.
    /// Default: 0.0
    pub distance: f32,
    /// Uniform scale of the view.
    /// Default: 1.0
    pub scale: f32,
    /// Projection shape.
    /// Default: 60° perspective at 4:3
    pub projection: ProjectionSettings,
    /// Near clip distance.
    /// Default: 1.0
    pub near: f32,
    /// Far clip distance.
    /// Default: 10000.0
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            observed_position: IVec3::ZERO,
            rotation: IVec3::ZERO,
            distance: 0.0,
            scale: 1.0,
            projection: ProjectionSettings::Perspective {
                fov_y_degrees: 60.0,
                aspect: 4.0 / 3.0,
            },
            near: 1.0,
            far: 10000.0,
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl CameraSettings {
    /// Create new camera settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the observed position.
    pub fn observed_position(mut self, observed_position: IVec3) -> Self {
        self.observed_position = observed_position;
        self
    }

    /// Set the fixed-point rotation.
    pub fn rotation(mut self, rotation: IVec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the eye distance.
    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// Set the view scale.
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Use a symmetric perspective.
    pub fn perspective(mut self, fov_y_degrees: f32, aspect: f32) -> Self {
        self.projection = ProjectionSettings::Perspective {
            fov_y_degrees,
            aspect,
        };
        self
    }

    /// Use a symmetric frustum with the given near rectangle.
    pub fn symmetric(mut self, near_width: f32, near_height: f32) -> Self {
        self.projection = ProjectionSettings::Symmetric {
            near_width,
            near_height,
        };
        self
    }

    /// Use an asymmetric frustum.
    pub fn frustum(mut self, left: f32, right: f32, bottom: f32, top: f32) -> Self {
        self.projection = ProjectionSettings::Frustum {
            left,
            right,
            bottom,
            top,
        };
        self
    }

    /// Set the clip distances.
    pub fn clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Check the settings without building anything.
    pub fn validate(&self) -> Result<(), CameraError> {
        if !positive(self.near) || !self.far.is_finite() || self.far <= self.near {
            return Err(CameraError::InvalidClipRange {
                near: self.near,
                far: self.far,
            });
        }
        if !positive(self.scale) {
            return Err(CameraError::InvalidScale(self.scale));
        }

        match self.projection {
            ProjectionSettings::Perspective {
                fov_y_degrees,
                aspect,
            } => {
                if !positive(fov_y_degrees) || fov_y_degrees >= 180.0 {
                    return Err(CameraError::InvalidFieldOfView(fov_y_degrees));
                }
                if !positive(aspect) {
                    return Err(CameraError::InvalidAspect(aspect));
                }
            }
            ProjectionSettings::Symmetric {
                near_width,
                near_height,
            } => {
                if !positive(near_width) || !positive(near_height) {
                    return Err(CameraError::EmptyFrustum {
                        width: near_width,
                        height: near_height,
                    });
                }
            }
            ProjectionSettings::Frustum {
                left,
                right,
                bottom,
                top,
            } => {
                let (width, height) = (right - left, top - bottom);
                if !positive(width) || !positive(height) {
                    return Err(CameraError::EmptyFrustum { width, height });
                }
            }
        }

        Ok(())
    }

    /// Validate and build the projection.
    pub fn to_projection(&self) -> Result<Projection, CameraError> {
        self.validate()?;

        let (near, far) = (self.near, self.far);
        Ok(match self.projection {
            ProjectionSettings::Perspective {
                fov_y_degrees,
                aspect,
            } => Projection::perspective(fov_y_degrees.to_radians(), aspect, near, far),
            ProjectionSettings::Symmetric {
                near_width,
                near_height,
            } => Projection::symmetric(near_width, near_height, near, far),
            ProjectionSettings::Frustum {
                left,
                right,
                bottom,
                top,
            } => Projection::general(left, right, bottom, top, near, far),
        })
    }
}
