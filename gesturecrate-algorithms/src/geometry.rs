//! Hand geometry primitives measured from a single observation
//!
//! Everything here is a pure function of one frame's landmarks. The
//! classifier combines these measurements into gesture flags.

use gesturecrate_core::*;
use nalgebra::Vector2;

/// Per-frame measurements the gesture rules are built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    /// Palm anchor in the image plane
    pub palm: Vector2<f32>,
    /// Thumb-tip to index-tip distance with depth down-weighted
    pub pinch_distance: f32,
    /// Thumb-tip to pinky-tip distance with depth down-weighted
    pub thumb_pinky_distance: f32,
    /// Curl state for index, middle, ring, pinky
    pub curled: [bool; 4],
    pub thumb_extended: bool,
    /// Mean image-plane distance of the four fingertips from the wrist
    pub spread: f32,
}

impl HandPose {
    /// Measure all primitives for one observation
    pub fn measure(observation: &Observation, config: &ClassifierConfig) -> Self {
        Self {
            palm: palm_position(observation, config.palm_anchor),
            pinch_distance: pinch_distance(observation, config.depth_weight),
            thumb_pinky_distance: weighted_distance(
                &observation[THUMB_TIP],
                &observation[PINKY_TIP],
                config.depth_weight,
            ),
            curled: finger_curls(observation, config.curl_ratio),
            thumb_extended: is_thumb_extended(observation, config.curl_ratio),
            spread: fingertip_spread(observation),
        }
    }

    pub fn curled_count(&self) -> usize {
        self.curled.iter().filter(|&&c| c).count()
    }

    pub fn index_extended(&self) -> bool {
        !self.curled[0]
    }

    pub fn middle_extended(&self) -> bool {
        !self.curled[1]
    }

    pub fn ring_extended(&self) -> bool {
        !self.curled[2]
    }

    pub fn pinky_extended(&self) -> bool {
        !self.curled[3]
    }
}

/// Mean of the wrist and metacarpal joints, more stable than any single joint
pub fn palm_position(observation: &Observation, anchor: PalmAnchor) -> Vector2<f32> {
    let joints: &[usize] = match anchor {
        PalmAnchor::ThreePoint => &[WRIST, INDEX_MCP, PINKY_MCP],
        PalmAnchor::FourPoint => &[WRIST, INDEX_MCP, MIDDLE_MCP, PINKY_MCP],
    };
    let sum = joints
        .iter()
        .fold(Vector2::zeros(), |acc, &i| acc + Vector2::new(observation[i].x, observation[i].y));
    sum / joints.len() as f32
}

/// Euclidean distance with the depth axis scaled by `depth_weight`
pub fn weighted_distance(a: &Landmark, b: &Landmark, depth_weight: f32) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = (b.z - a.z) * depth_weight;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Thumb-tip to index-tip distance
pub fn pinch_distance(observation: &Observation, depth_weight: f32) -> f32 {
    weighted_distance(&observation[THUMB_TIP], &observation[INDEX_TIP], depth_weight)
}

/// A finger is curled when its tip has not extended past its PIP joint by
/// `curl_ratio`, measured from the wrist.
pub fn finger_curls(observation: &Observation, curl_ratio: f32) -> [bool; 4] {
    let wrist = observation.wrist();
    FINGER_JOINTS.map(|(pip, tip)| {
        let tip_distance = observation[tip].planar_distance(wrist);
        let pip_distance = observation[pip].planar_distance(wrist);
        tip_distance < curl_ratio * pip_distance
    })
}

/// The thumb is extended when its tip is farther from the pinky knuckle than
/// its IP joint is, by `curl_ratio`.
pub fn is_thumb_extended(observation: &Observation, curl_ratio: f32) -> bool {
    let anchor = &observation[PINKY_MCP];
    let tip_distance = observation[THUMB_TIP].planar_distance(anchor);
    let ip_distance = observation[THUMB_IP].planar_distance(anchor);
    tip_distance > curl_ratio * ip_distance
}

/// Mean image-plane distance of the index, middle, ring and pinky tips from the wrist
pub fn fingertip_spread(observation: &Observation) -> f32 {
    let wrist = observation.wrist();
    let total: f32 = FINGER_JOINTS
        .iter()
        .map(|&(_, tip)| observation[tip].planar_distance(wrist))
        .sum();
    total / FINGER_JOINTS.len() as f32
}
