//! Tunable parameters for classification, control and interpolation

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gesture::GestureSet;
use crate::transform::TransformLimits;

/// Landmarks averaged into the palm anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PalmAnchor {
    /// Wrist, index MCP and pinky MCP.
    #[default]
    ThreePoint,
    /// Wrist plus index, middle and pinky MCPs.
    FourPoint,
}

/// Gesture classifier parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub gesture_set: GestureSet,
    pub palm_anchor: PalmAnchor,
    /// Thumb-index distance (normalized units) below which the hand is pinching
    pub pinch_threshold: f32,
    /// Weight of the depth axis in the pinch distance
    pub depth_weight: f32,
    /// A finger is curled when its tip is closer to the wrist than `curl_ratio` times its PIP
    pub curl_ratio: f32,
    /// Mean tip-to-wrist distance above which the hand counts as open
    pub spread_threshold: f32,
    /// Thumb-pinky distance below which the reset gesture is recognized
    pub reset_threshold: f32,
    /// Palm displacement to rotation (radians per normalized unit)
    pub rotation_gain: f32,
    /// Palm displacement to pan (world units per normalized unit)
    pub pan_gain: f32,
    /// Exponential smoothing factor applied to motion deltas
    pub smoothing: f32,
    /// Per-axis cap on palm displacement between two frames
    pub max_palm_step: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            gesture_set: GestureSet::Extended,
            palm_anchor: PalmAnchor::ThreePoint,
            pinch_threshold: 0.05,
            depth_weight: 0.5,
            curl_ratio: 1.1,
            spread_threshold: 0.15,
            reset_threshold: 0.06,
            rotation_gain: 5.0,
            pan_gain: 5.0,
            smoothing: 0.3,
            max_palm_step: 0.15,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        positive("pinch_threshold", self.pinch_threshold)?;
        positive("curl_ratio", self.curl_ratio)?;
        positive("spread_threshold", self.spread_threshold)?;
        positive("reset_threshold", self.reset_threshold)?;
        positive("max_palm_step", self.max_palm_step)?;
        finite("rotation_gain", self.rotation_gain)?;
        finite("pan_gain", self.pan_gain)?;
        unit_interval("depth_weight", self.depth_weight, true)?;
        unit_interval("smoothing", self.smoothing, false)?;
        Ok(())
    }
}

/// Interaction controller parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub gesture_set: GestureSet,
    pub limits: TransformLimits,
    /// Scale change applied per tick while a zoom gesture is held
    pub zoom_step: f32,
    /// Consecutive classified fist frames needed before the controller freezes
    pub freeze_hold_frames: u32,
    /// Pinch distance at which the basic-set pinch maps to scale 1
    pub pinch_reference: f32,
    /// Basic-set pinch scale change per normalized unit of pinch distance
    pub pinch_scale_gain: f32,
}

impl ControllerConfig {
    /// Defaults matching a gesture set, including its scale range
    pub fn for_gesture_set(set: GestureSet) -> Self {
        Self {
            gesture_set: set,
            limits: TransformLimits::for_gesture_set(set),
            zoom_step: 0.02,
            freeze_hold_frames: 1,
            pinch_reference: 0.05,
            pinch_scale_gain: 10.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        positive("zoom_step", self.zoom_step)?;
        positive("pinch_reference", self.pinch_reference)?;
        finite("pinch_scale_gain", self.pinch_scale_gain)?;
        positive("limits.min_scale", self.limits.min_scale)?;
        finite("limits.max_scale", self.limits.max_scale)?;
        if self.limits.min_scale > 1.0 || self.limits.max_scale < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "scale range [{}, {}] must contain the default scale 1.0",
                self.limits.min_scale, self.limits.max_scale
            )));
        }
        let (min, max) = (self.limits.position_min, self.limits.position_max);
        if !(min.x <= 0.0 && max.x >= 0.0 && min.y <= 0.0 && max.y >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "position box [{}, {}] x [{}, {}] must contain the origin",
                min.x, max.x, min.y, max.y
            )));
        }
        if self.freeze_hold_frames == 0 {
            return Err(Error::InvalidConfig("freeze_hold_frames must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::for_gesture_set(GestureSet::default())
    }
}

/// Render-side interpolation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolationConfig {
    pub rotation_lerp: f32,
    pub position_lerp: f32,
    pub scale_lerp: f32,
    /// Idle auto-rotation about y while no hand is observed (radians per second)
    pub idle_spin: f32,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            rotation_lerp: 0.15,
            position_lerp: 0.15,
            scale_lerp: 0.1,
            idle_spin: 0.2,
        }
    }
}

impl InterpolationConfig {
    pub fn validate(&self) -> Result<()> {
        unit_interval("rotation_lerp", self.rotation_lerp, false)?;
        unit_interval("position_lerp", self.position_lerp, false)?;
        unit_interval("scale_lerp", self.scale_lerp, false)?;
        finite("idle_spin", self.idle_spin)?;
        Ok(())
    }
}

/// All pipeline parameters in one place
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureConfig {
    pub classifier: ClassifierConfig,
    pub controller: ControllerConfig,
    pub interpolation: InterpolationConfig,
}

impl GestureConfig {
    /// Defaults for a gesture set, keeping classifier and controller in agreement
    pub fn for_gesture_set(set: GestureSet) -> Self {
        Self {
            classifier: ClassifierConfig {
                gesture_set: set,
                ..Default::default()
            },
            controller: ControllerConfig::for_gesture_set(set),
            interpolation: InterpolationConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        self.controller.validate()?;
        self.interpolation.validate()?;
        if self.classifier.gesture_set != self.controller.gesture_set {
            return Err(Error::InvalidConfig(
                "classifier and controller must use the same gesture set".into(),
            ));
        }
        Ok(())
    }
}

fn finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be finite, got {}", name, value)))
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be positive, got {}", name, value)))
    }
}

fn unit_interval(name: &str, value: f32, allow_zero: bool) -> Result<()> {
    finite(name, value)?;
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if lower_ok && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must lie in (0, 1], got {}", name, value)))
    }
}
