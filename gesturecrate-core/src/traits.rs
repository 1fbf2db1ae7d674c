//! Core traits for gesturecrate

use nalgebra::Vector2;

use crate::transform::{Transform3D, TransformState};

/// Linear interpolation toward a target
pub trait Lerp {
    /// Move `factor` of the way from `self` to `target`
    fn lerp_to(&self, target: &Self, factor: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(&self, target: &Self, factor: f32) -> Self {
        self + (target - self) * factor
    }
}

impl Lerp for Vector2<f32> {
    fn lerp_to(&self, target: &Self, factor: f32) -> Self {
        self.lerp(target, factor)
    }
}

/// Trait for anything a renderer can pose an object with
pub trait Posable {
    /// The homogeneous transform to apply to the object
    fn transform(&self) -> Transform3D;
}

impl Posable for TransformState {
    fn transform(&self) -> Transform3D {
        self.to_transform()
    }
}
