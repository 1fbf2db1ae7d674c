//! Exponential smoothing for per-frame motion deltas

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// First-order low-pass filter: `s = alpha * raw + (1 - alpha) * s_prev`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialSmoother {
    alpha: f32,
    value: Vector2<f32>,
}

impl ExponentialSmoother {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            value: Vector2::zeros(),
        }
    }

    /// Feed one raw sample and return the smoothed value
    pub fn update(&mut self, raw: Vector2<f32>) -> Vector2<f32> {
        self.value = raw * self.alpha + self.value * (1.0 - self.alpha);
        self.value
    }

    /// Drop the retained value so the next sample starts from rest
    pub fn reset(&mut self) {
        self.value = Vector2::zeros();
    }

    pub fn value(&self) -> Vector2<f32> {
        self.value
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Default for ExponentialSmoother {
    fn default() -> Self {
        Self::new(0.3)
    }
}
