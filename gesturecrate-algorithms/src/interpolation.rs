//! Rendered transform that eases toward the controller targets

use gesturecrate_core::*;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// The transform a renderer actually draws with
///
/// Each tick it moves a fixed fraction of the way toward the controller's
/// target. While no hand is visible it also spins slowly about the vertical
/// axis; the spin only affects the rendered value, so the target is
/// unchanged when the hand comes back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedTransform {
    pub rotation: Vector2<f32>,
    pub position: Vector2<f32>,
    pub scale: f32,
}

impl RenderedTransform {
    pub fn new() -> Self {
        Self {
            rotation: Vector2::zeros(),
            position: Vector2::zeros(),
            scale: 1.0,
        }
    }

    /// Ease toward `target` for one tick of `dt` seconds
    pub fn advance(
        &mut self,
        target: &TransformState,
        hand_present: bool,
        dt: f32,
        config: &InterpolationConfig,
    ) {
        self.rotation = self.rotation.lerp_to(&target.rotation, config.rotation_lerp);
        self.position = self.position.lerp_to(&target.position, config.position_lerp);
        self.scale = self.scale.lerp_to(&target.scale, config.scale_lerp);

        if !hand_present && dt.is_finite() && dt > 0.0 {
            self.rotation.y += config.idle_spin * dt;
        }
    }

    /// Jump straight to `target`
    pub fn snap_to(&mut self, target: &TransformState) {
        self.rotation = target.rotation;
        self.position = target.position;
        self.scale = target.scale;
    }

    /// Largest per-component distance from `target`
    pub fn distance_to(&self, target: &TransformState) -> f32 {
        let rotation = (self.rotation - target.rotation).amax();
        let position = (self.position - target.position).amax();
        rotation.max(position).max((self.scale - target.scale).abs())
    }
}

impl Default for RenderedTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&TransformState> for RenderedTransform {
    fn from(state: &TransformState) -> Self {
        Self {
            rotation: state.rotation,
            position: state.position,
            scale: state.scale,
        }
    }
}

impl Posable for RenderedTransform {
    fn transform(&self) -> Transform3D {
        Transform3D::from_pose(self.rotation, self.position, self.scale)
    }
}
