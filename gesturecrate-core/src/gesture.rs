//! Gesture categories and the per-frame gesture state

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Recognized gesture categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    /// Thumb tip touching pinky tip with the middle three fingers extended.
    Reset,
    /// Thumb and index fingertips close together.
    Pinch,
    /// Thumb and index extended and spread, other fingers curled.
    ZoomIn,
    /// Index extended, thumb tucked, other fingers curled.
    ZoomOut,
    /// Index and middle extended, ring and pinky curled.
    Peace,
    /// Fingers spread away from the wrist.
    OpenHand,
    /// Three or more fingers curled.
    Fist,
}

impl GestureKind {
    /// Total priority order, highest first. The first set flag in this order
    /// is the frame's active gesture.
    pub const PRIORITY: [GestureKind; 7] = [
        GestureKind::Reset,
        GestureKind::Pinch,
        GestureKind::ZoomIn,
        GestureKind::ZoomOut,
        GestureKind::Peace,
        GestureKind::OpenHand,
        GestureKind::Fist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Pinch => "pinch",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::Peace => "peace",
            Self::OpenHand => "open-hand",
            Self::Fist => "fist",
        }
    }

    /// Short label for an on-screen gesture indicator
    pub fn label(&self, set: GestureSet) -> &'static str {
        match (self, set) {
            (Self::Reset, _) => "RESET",
            (Self::Pinch, _) => "ZOOM",
            (Self::ZoomIn, _) => "ZOOM IN",
            (Self::ZoomOut, _) => "ZOOM OUT",
            (Self::Peace, _) => "MOVE",
            (Self::OpenHand, _) => "ROTATE",
            (Self::Fist, GestureSet::Basic) => "RESET",
            (Self::Fist, GestureSet::Extended) => "FREEZE",
        }
    }
}

/// Which family of gestures the classifier reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureSet {
    /// Pinch scales, open hand rotates, fist resets.
    Basic,
    /// Zoom in/out, open-hand rotate, peace-sign pan, fist freeze, thumb+pinky reset.
    #[default]
    Extended,
}

impl GestureSet {
    /// Whether this set reports the given gesture
    pub fn supports(&self, kind: GestureKind) -> bool {
        match self {
            GestureSet::Basic => matches!(
                kind,
                GestureKind::Pinch | GestureKind::OpenHand | GestureKind::Fist
            ),
            GestureSet::Extended => true,
        }
    }
}

/// Raw per-frame gesture flags. Several may be true at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureFlags {
    pub reset: bool,
    pub pinch: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub peace: bool,
    pub open_hand: bool,
    pub fist: bool,
}

impl GestureFlags {
    pub fn get(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Reset => self.reset,
            GestureKind::Pinch => self.pinch,
            GestureKind::ZoomIn => self.zoom_in,
            GestureKind::ZoomOut => self.zoom_out,
            GestureKind::Peace => self.peace,
            GestureKind::OpenHand => self.open_hand,
            GestureKind::Fist => self.fist,
        }
    }

    /// Pick the dominant gesture by priority among those the set supports
    pub fn resolve(&self, set: GestureSet) -> Option<GestureKind> {
        GestureKind::PRIORITY
            .iter()
            .copied()
            .find(|&kind| set.supports(kind) && self.get(kind))
    }
}

/// Classification result for one frame.
///
/// Always fully populated: when no hand is observed every flag is false,
/// `palm_position` is `None`, and distances and deltas are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureState {
    pub flags: GestureFlags,
    /// Dominant gesture after priority resolution
    pub active: Option<GestureKind>,
    /// Palm anchor in normalized image coordinates
    pub palm_position: Option<Vector2<f32>>,
    /// Thumb-tip to index-tip distance, never negative
    pub pinch_distance: f32,
    /// Smoothed rotation increment for this frame (radians)
    pub rotation_delta: Vector2<f32>,
    /// Smoothed pan increment for this frame (world units)
    pub position_delta: Vector2<f32>,
    /// Sequence number of the classified frame this state came from
    pub frame: u64,
}

impl GestureState {
    /// The state reported for a frame without a hand
    pub fn neutral(frame: u64) -> Self {
        Self {
            flags: GestureFlags::default(),
            active: None,
            palm_position: None,
            pinch_distance: 0.0,
            rotation_delta: Vector2::zeros(),
            position_delta: Vector2::zeros(),
            frame,
        }
    }

    pub fn is_hand_present(&self) -> bool {
        self.palm_position.is_some()
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::neutral(0)
    }
}
