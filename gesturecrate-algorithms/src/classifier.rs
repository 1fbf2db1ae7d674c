//! Landmark-to-gesture classification
//!
//! Turns one frame of hand landmarks into a [`GestureState`]: raw gesture
//! flags, the single dominant gesture after priority resolution, and smoothed
//! motion deltas. The only state carried between frames is the
//! [`ClassifierHistory`], which is threaded explicitly through [`classify`].
//!
//! Gap handling: a frame without a hand produces a neutral state, zeroes the
//! motion smoothers and keeps the previous palm position. The first hand frame
//! after a gap re-seeds the palm anchor and reports zero motion, so tracking
//! loss never turns into a motion spike.

use gesturecrate_core::*;
use nalgebra::Vector2;
use tracing::{debug, warn};

use crate::geometry::HandPose;
use crate::smoothing::ExponentialSmoother;

/// State retained by the classifier between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierHistory {
    /// Palm anchor from the last frame that had a hand
    pub palm_prev: Option<Vector2<f32>>,
    /// Consecutive frames without a hand
    pub frames_since_hand: u32,
    rotation: ExponentialSmoother,
    position: ExponentialSmoother,
    frame: u64,
    last_active: Option<GestureKind>,
}

impl ClassifierHistory {
    pub fn new(smoothing: f32) -> Self {
        Self {
            palm_prev: None,
            frames_since_hand: 0,
            rotation: ExponentialSmoother::new(smoothing),
            position: ExponentialSmoother::new(smoothing),
            frame: 0,
            last_active: None,
        }
    }

    /// Sequence number of the last classified frame
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether the next hand frame will re-seed the palm anchor instead of producing motion
    fn needs_reseed(&self) -> bool {
        self.palm_prev.is_none() || self.frames_since_hand > 0
    }
}

impl Default for ClassifierHistory {
    fn default() -> Self {
        Self::new(ClassifierConfig::default().smoothing)
    }
}

/// Compute raw gesture flags from measured hand geometry, masked to the configured set
pub fn detect_flags(pose: &HandPose, config: &ClassifierConfig) -> GestureFlags {
    let pinch = pose.pinch_distance < config.pinch_threshold;
    let curled = pose.curled_count();
    let lower_three_curled =
        !pose.middle_extended() && !pose.ring_extended() && !pose.pinky_extended();

    let flags = GestureFlags {
        reset: pose.thumb_pinky_distance < config.reset_threshold
            && pose.index_extended()
            && pose.middle_extended()
            && pose.ring_extended(),
        pinch,
        zoom_in: pose.thumb_extended && pose.index_extended() && !pinch && lower_three_curled,
        zoom_out: pose.index_extended() && !pose.thumb_extended && lower_three_curled,
        peace: pose.index_extended()
            && pose.middle_extended()
            && !pose.ring_extended()
            && !pose.pinky_extended()
            && !pinch,
        open_hand: pose.spread > config.spread_threshold && curled <= 1 && !pinch,
        fist: curled >= 3 && !pinch,
    };

    match config.gesture_set {
        GestureSet::Extended => flags,
        GestureSet::Basic => GestureFlags {
            pinch: flags.pinch,
            open_hand: flags.open_hand,
            fist: flags.fist,
            ..Default::default()
        },
    }
}

/// Classify one frame.
///
/// Pure form: the previous history is read, the updated history is returned
/// alongside the gesture state. `None` is the no-hand gap signal.
pub fn classify(
    observation: Option<&Observation>,
    history: &ClassifierHistory,
    config: &ClassifierConfig,
) -> (GestureState, ClassifierHistory) {
    let mut next = *history;
    next.frame = history.frame.wrapping_add(1);

    let observation = match observation {
        Some(obs) if obs.is_finite() => obs,
        Some(_) => {
            warn!("Observation with non-finite coordinates treated as a tracking gap");
            return gap(next);
        }
        None => return gap(next),
    };

    let pose = HandPose::measure(observation, config);
    let flags = detect_flags(&pose, config);
    let active = flags.resolve(config.gesture_set);

    let displacement = match history.palm_prev {
        Some(prev) if !history.needs_reseed() => {
            let step = config.max_palm_step;
            let d = pose.palm - prev;
            Vector2::new(d.x.clamp(-step, step), d.y.clamp(-step, step))
        }
        _ => Vector2::zeros(),
    };
    next.palm_prev = Some(pose.palm);
    next.frames_since_hand = 0;

    // Image y grows downward: vertical hand motion tilts about x, horizontal motion spins about y.
    let rotation_delta = if active == Some(GestureKind::OpenHand) {
        let raw = Vector2::new(displacement.y, -displacement.x) * config.rotation_gain;
        next.rotation.update(raw)
    } else {
        next.rotation.reset();
        Vector2::zeros()
    };

    let position_delta = if active == Some(GestureKind::Peace) {
        let raw = Vector2::new(displacement.x, -displacement.y) * config.pan_gain;
        next.position.update(raw)
    } else {
        next.position.reset();
        Vector2::zeros()
    };

    if active != history.last_active {
        debug!(
            "Active gesture changed: {:?} -> {:?} (pinch distance {:.3})",
            history.last_active, active, pose.pinch_distance
        );
    }
    next.last_active = active;

    let state = GestureState {
        flags,
        active,
        palm_position: Some(pose.palm),
        pinch_distance: pose.pinch_distance,
        rotation_delta,
        position_delta,
        frame: next.frame,
    };
    (state, next)
}

fn gap(mut next: ClassifierHistory) -> (GestureState, ClassifierHistory) {
    next.frames_since_hand = next.frames_since_hand.saturating_add(1);
    next.rotation.reset();
    next.position.reset();
    if next.last_active.take().is_some() || next.frames_since_hand == 1 {
        debug!("Hand lost at frame {}", next.frame);
    }
    (GestureState::neutral(next.frame), next)
}

/// Stateful wrapper that owns its configuration and history
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: ClassifierConfig,
    history: ClassifierHistory,
}

impl GestureClassifier {
    /// Create a classifier, rejecting invalid configuration
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: ClassifierHistory::new(config.smoothing),
            config,
        })
    }

    /// Classify one frame, updating the retained history
    pub fn classify(&mut self, observation: Option<&Observation>) -> GestureState {
        let (state, history) = classify(observation, &self.history, &self.config);
        self.history = history;
        state
    }

    /// Validate raw landmarks from a source, then classify.
    ///
    /// A slice that is not exactly 21 points fails with
    /// [`Error::InvalidObservation`] and leaves the history untouched.
    pub fn classify_landmarks(&mut self, landmarks: Option<&[Landmark]>) -> Result<GestureState> {
        let observation = landmarks
            .map(Observation::from_slice)
            .transpose()
            .inspect_err(|e| warn!("Rejected landmark frame: {}", e))?;
        Ok(self.classify(observation.as_ref()))
    }

    /// Discard all retained history, as when the landmark source stops.
    ///
    /// The frame counter keeps running so frame numbers are never reused.
    pub fn reset_history(&mut self) {
        let frame = self.history.frame;
        self.history = ClassifierHistory::new(self.config.smoothing);
        self.history.frame = frame;
    }

    pub fn history(&self) -> &ClassifierHistory {
        &self.history
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self {
            config: ClassifierConfig::default(),
            history: ClassifierHistory::default(),
        }
    }
}
