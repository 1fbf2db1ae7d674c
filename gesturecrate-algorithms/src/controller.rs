//! Gesture-to-transform interaction state machine
//!
//! The controller owns the target [`TransformState`] and moves it according to
//! the active gesture of the most recent [`GestureState`].
//!
//! Transitions of [`InteractionMode`]:
//!
//! | from   | input                                     | to     |
//! |--------|-------------------------------------------|--------|
//! | Active | fist held for `freeze_hold_frames` frames | Frozen |
//! | Frozen | any recognized gesture except fist        | Active |
//! | any    | reset gesture or [`InteractionController::reset`] | Active, targets at defaults |
//!
//! The controller may be ticked faster than the classifier produces frames.
//! Rotation and pan deltas and the fist hold count advance once per classified
//! frame, while zoom steps are applied on every tick the zoom gesture is held.

use gesturecrate_core::*;
use tracing::debug;

/// Bookkeeping the controller keeps next to the transform targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerMemory {
    /// Consecutive classified frames with fist as the active gesture
    pub fist_frames: u32,
    /// Frame number whose motion deltas were already applied
    pub last_frame: Option<u64>,
}

/// Whether the gesture asks for a reset under the configured gesture set
fn is_reset_trigger(active: Option<GestureKind>, set: GestureSet) -> bool {
    match set {
        GestureSet::Extended => active == Some(GestureKind::Reset),
        GestureSet::Basic => active == Some(GestureKind::Fist),
    }
}

fn is_finite2(v: &Vector2f) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Advance the targets by one tick.
///
/// Pure form of [`InteractionController::tick`].
pub fn step(
    state: &TransformState,
    memory: &ControllerMemory,
    gesture: &GestureState,
    config: &ControllerConfig,
) -> (TransformState, ControllerMemory) {
    let mut next = *state;
    let mut mem = *memory;

    let fresh_frame = mem.last_frame != Some(gesture.frame);
    mem.last_frame = Some(gesture.frame);

    let active = gesture
        .active
        .filter(|&kind| config.gesture_set.supports(kind));

    if active != Some(GestureKind::Fist) {
        mem.fist_frames = 0;
    } else if fresh_frame {
        mem.fist_frames = mem.fist_frames.saturating_add(1);
    }

    if is_reset_trigger(active, config.gesture_set) {
        if *state != TransformState::default() {
            debug!("Reset to default transform");
        }
        mem.fist_frames = 0;
        return (TransformState::default(), mem);
    }

    if next.is_frozen() {
        if matches!(active, Some(kind) if kind != GestureKind::Fist) {
            next.mode = InteractionMode::Active;
            debug!("Unfrozen by {:?}", active);
        }
        return (next, mem);
    }

    let limits = &config.limits;
    match active {
        Some(GestureKind::Fist) => {
            if mem.fist_frames >= config.freeze_hold_frames {
                next.mode = InteractionMode::Frozen;
                debug!("Frozen after {} fist frames", mem.fist_frames);
            }
        }
        Some(GestureKind::OpenHand) if fresh_frame && is_finite2(&gesture.rotation_delta) => {
            next.rotation += gesture.rotation_delta;
        }
        Some(GestureKind::Peace) if fresh_frame && is_finite2(&gesture.position_delta) => {
            next.position = limits.clamp_position(next.position + gesture.position_delta);
        }
        Some(GestureKind::ZoomIn) => {
            next.scale = limits.clamp_scale(next.scale + config.zoom_step);
        }
        Some(GestureKind::ZoomOut) => {
            next.scale = limits.clamp_scale(next.scale - config.zoom_step);
        }
        Some(GestureKind::Pinch) if config.gesture_set == GestureSet::Basic => {
            let scale = 1.0
                + (config.pinch_reference - gesture.pinch_distance) * config.pinch_scale_gain;
            if scale.is_finite() {
                next.scale = limits.clamp_scale(scale);
            }
        }
        _ => {}
    }

    (next, mem)
}

/// Owns the transform targets for one tracked session
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: ControllerConfig,
    state: TransformState,
    memory: ControllerMemory,
}

impl InteractionController {
    /// Create a controller, rejecting invalid configuration
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: TransformState::default(),
            memory: ControllerMemory::default(),
        })
    }

    /// Apply the held gesture for one render tick and return the new targets
    pub fn tick(&mut self, gesture: &GestureState) -> &TransformState {
        let (state, memory) = step(&self.state, &self.memory, gesture, &self.config);
        self.state = state;
        self.memory = memory;
        &self.state
    }

    /// Snap every target back to its default and leave the frozen mode
    pub fn reset(&mut self) {
        debug!("Explicit reset");
        self.state = TransformState::default();
        self.memory.fist_frames = 0;
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    pub fn memory(&self) -> &ControllerMemory {
        &self.memory
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            config: ControllerConfig::default(),
            state: TransformState::default(),
            memory: ControllerMemory::default(),
        }
    }
}
