//! Interaction transform targets and 3D transformation utilities

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::gesture::GestureSet;

/// A homogeneous 3D transformation handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Compose the object pose: translate, then rotate about x and y, then scale
    pub fn from_pose(rotation: Vector2<f32>, position: Vector2<f32>, scale: f32) -> Self {
        Self::translation(Vector3::new(position.x, position.y, 0.0))
            * Self::rotation(UnitQuaternion::from_euler_angles(rotation.x, rotation.y, 0.0))
            * Self::uniform_scaling(scale)
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

/// Whether gestures are currently allowed to move the targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Gestures mutate the targets.
    #[default]
    Active,
    /// Entered by a sustained fist; targets are held until another gesture or a reset.
    Frozen,
}

/// Bounds applied to the position and scale targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformLimits {
    pub position_min: Vector2<f32>,
    pub position_max: Vector2<f32>,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl TransformLimits {
    /// Limits for a gesture set: the basic set's absolute pinch mapping uses a
    /// narrower scale range than the stepped zoom of the extended set.
    pub fn for_gesture_set(set: GestureSet) -> Self {
        let (min_scale, max_scale) = match set {
            GestureSet::Basic => (0.5, 2.0),
            GestureSet::Extended => (0.3, 3.0),
        };
        Self {
            position_min: Vector2::new(-3.0, -2.0),
            position_max: Vector2::new(3.0, 2.0),
            min_scale,
            max_scale,
        }
    }

    pub fn clamp_position(&self, position: Vector2<f32>) -> Vector2<f32> {
        Vector2::new(
            position.x.clamp(self.position_min.x, self.position_max.x),
            position.y.clamp(self.position_min.y, self.position_max.y),
        )
    }

    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    pub fn contains_position(&self, position: &Vector2<f32>) -> bool {
        (self.position_min.x..=self.position_max.x).contains(&position.x)
            && (self.position_min.y..=self.position_max.y).contains(&position.y)
    }

    pub fn contains_scale(&self, scale: f32) -> bool {
        (self.min_scale..=self.max_scale).contains(&scale)
    }
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self::for_gesture_set(GestureSet::default())
    }
}

/// Target pose owned by the interaction controller.
///
/// Renderers interpolate toward these values; they never write them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Rotation about the x and y axes in radians, unbounded
    pub rotation: Vector2<f32>,
    pub position: Vector2<f32>,
    pub scale: f32,
    pub mode: InteractionMode,
}

impl TransformState {
    pub fn is_frozen(&self) -> bool {
        self.mode == InteractionMode::Frozen
    }

    /// Homogeneous transform for the target pose
    pub fn to_transform(&self) -> Transform3D {
        Transform3D::from_pose(self.rotation, self.position, self.scale)
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            rotation: Vector2::zeros(),
            position: Vector2::zeros(),
            scale: 1.0,
            mode: InteractionMode::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_state() {
        let state = TransformState::default();
        assert_eq!(state.rotation, Vector2::zeros());
        assert_eq!(state.position, Vector2::zeros());
        assert_eq!(state.scale, 1.0);
        assert!(!state.is_frozen());
        assert_eq!(state.to_transform(), Transform3D::identity());
    }

    #[test]
    fn test_limits_clamp() {
        let limits = TransformLimits::for_gesture_set(GestureSet::Extended);
        let clamped = limits.clamp_position(Vector2::new(10.0, -10.0));
        assert_eq!(clamped, Vector2::new(3.0, -2.0));
        assert_eq!(limits.clamp_scale(0.1), 0.3);
        assert_eq!(limits.clamp_scale(5.0), 3.0);

        let basic = TransformLimits::for_gesture_set(GestureSet::Basic);
        assert_eq!(basic.clamp_scale(0.1), 0.5);
        assert_eq!(basic.clamp_scale(5.0), 2.0);
    }

    #[test]
    fn test_pose_transform() {
        let transform = Transform3D::from_pose(Vector2::zeros(), Vector2::new(1.0, -1.0), 2.0);
        let moved = transform.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(moved, Point3::new(3.0, 1.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_pose_rotation_about_y() {
        let transform = Transform3D::from_pose(
            Vector2::new(0.0, std::f32::consts::FRAC_PI_2),
            Vector2::zeros(),
            1.0,
        );
        let rotated = transform.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }
}
