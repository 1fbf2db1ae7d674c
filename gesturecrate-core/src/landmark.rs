//! Hand landmark types and the 21-point observation

use bytemuck::{Pod, Zeroable};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::{Error, Result};

// ============================================================================
// HAND LANDMARK INDICES (MediaPipe Hands - 21 total)
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks in one hand observation
pub const LANDMARK_COUNT: usize = 21;

/// Hand skeleton connections for overlay rendering (bones plus the knuckle line)
#[rustfmt::skip]
pub const HAND_CONNECTIONS: [(usize, usize); 23] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, RING_MCP), (RING_MCP, PINKY_MCP),
];

/// The four non-thumb fingers as (pip, tip) index pairs: index, middle, ring, pinky
pub const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_PIP, INDEX_TIP),
    (MIDDLE_PIP, MIDDLE_TIP),
    (RING_PIP, RING_TIP),
    (PINKY_PIP, PINKY_TIP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single hand landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Landmark {
    /// 0-1 normalized to frame width
    pub x: f32,
    /// 0-1 normalized to frame height
    pub y: f32,
    /// Relative depth, unitless and signed
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Image-plane distance, ignoring depth
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Point3<f32>> for Landmark {
    fn from(point: Point3<f32>) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

impl From<Landmark> for Point3<f32> {
    fn from(landmark: Landmark) -> Self {
        Point3::new(landmark.x, landmark.y, landmark.z)
    }
}

/// The full 21-landmark set for one detected hand in one frame.
///
/// Count and order are fixed by construction; a missing hand is represented
/// by `Option::<Observation>::None`, never by a zero-filled observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Observation {
    /// Create an observation from an owned array
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Create an observation from a slice, which must hold exactly 21 landmarks
    pub fn from_slice(landmarks: &[Landmark]) -> Result<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] =
            landmarks.try_into().map_err(|_| Error::InvalidObservation {
                expected: LANDMARK_COUNT,
                found: landmarks.len(),
            })?;
        Ok(Self { landmarks })
    }

    /// Create an observation from a flat `[x, y, z, x, y, z, ...]` buffer of 63 floats
    pub fn from_flat(data: &[f32]) -> Result<Self> {
        let landmarks: &[Landmark] =
            bytemuck::try_cast_slice(data).map_err(|_| Error::InvalidObservation {
                expected: LANDMARK_COUNT,
                found: data.len() / 3,
            })?;
        Self::from_slice(landmarks)
    }

    /// View the landmarks as a flat float buffer
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.landmarks)
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn wrist(&self) -> &Landmark {
        &self.landmarks[WRIST]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.landmarks.iter()
    }

    /// Whether every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.landmarks.iter().all(Landmark::is_finite)
    }
}

impl Index<usize> for Observation {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Self::Output {
        &self.landmarks[index]
    }
}

impl TryFrom<&[Landmark]> for Observation {
    type Error = Error;

    fn try_from(landmarks: &[Landmark]) -> Result<Self> {
        Self::from_slice(landmarks)
    }
}

impl From<[Landmark; LANDMARK_COUNT]> for Observation {
    fn from(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self::new(landmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_landmarks(count: usize) -> Vec<Landmark> {
        (0..count)
            .map(|i| Landmark::new(i as f32 * 0.01, 0.5, -(i as f32) * 0.001))
            .collect()
    }

    #[test]
    fn test_from_slice_accepts_21_points() {
        let landmarks = sample_landmarks(LANDMARK_COUNT);
        let observation = Observation::from_slice(&landmarks).unwrap();
        assert_eq!(observation[INDEX_TIP], landmarks[INDEX_TIP]);
        assert_eq!(observation.iter().count(), LANDMARK_COUNT);
    }

    #[test]
    fn test_from_slice_rejects_short_input() {
        let landmarks = sample_landmarks(20);
        match Observation::from_slice(&landmarks) {
            Err(Error::InvalidObservation { expected, found }) => {
                assert_eq!(expected, 21);
                assert_eq!(found, 20);
            }
            other => panic!("expected InvalidObservation, got {:?}", other),
        }
    }

    #[test]
    fn test_from_slice_rejects_long_input() {
        let landmarks = sample_landmarks(22);
        assert!(Observation::from_slice(&landmarks).is_err());
    }

    #[test]
    fn test_from_flat() {
        let mut flat = Vec::with_capacity(63);
        for i in 0..LANDMARK_COUNT {
            flat.extend_from_slice(&[i as f32, i as f32 * 2.0, -1.0]);
        }
        let observation = Observation::from_flat(&flat).unwrap();
        assert_eq!(observation[PINKY_TIP], Landmark::new(20.0, 40.0, -1.0));
        assert_eq!(observation.as_flat(), flat.as_slice());
    }

    #[test]
    fn test_from_flat_rejects_partial_point() {
        let flat = vec![0.0f32; 62];
        assert!(matches!(
            Observation::from_flat(&flat),
            Err(Error::InvalidObservation { found: 20, .. })
        ));
    }

    #[test]
    fn test_distances() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.3, 0.4, 1.2);
        assert_relative_eq!(a.planar_distance(&b), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_point_conversion() {
        let landmark = Landmark::new(0.1, 0.2, 0.3);
        let point: Point3<f32> = landmark.into();
        assert_eq!(Landmark::from(point), landmark);
    }

    #[test]
    fn test_connections_stay_in_range() {
        assert!(HAND_CONNECTIONS
            .iter()
            .all(|&(a, b)| a < LANDMARK_COUNT && b < LANDMARK_COUNT));
    }
}
