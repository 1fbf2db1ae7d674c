//! Tracking session: a landmark source wired to the gesture pipeline
//!
//! The session has two entry points that may run at different rates.
//! [`TrackingSession::pump`] is the landmark callback: it polls one frame from
//! the source, classifies it and holds the resulting gesture.
//! [`TrackingSession::tick`] is the render callback: it applies the held
//! gesture to the controller and eases the rendered transform.

use gesturecrate_algorithms::{GestureClassifier, InteractionController, RenderedTransform};
use gesturecrate_core::{GestureConfig, GestureState, Result, TransformState};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::source::LandmarkSource;

/// Lifecycle of a tracking session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingStatus {
    #[default]
    Stopped,
    /// The source is being acquired
    Starting,
    Tracking,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStatus::Stopped => "stopped",
            TrackingStatus::Starting => "starting",
            TrackingStatus::Tracking => "tracking",
        }
    }
}

pub struct TrackingSession<S: LandmarkSource> {
    source: S,
    config: GestureConfig,
    classifier: GestureClassifier,
    controller: InteractionController,
    rendered: RenderedTransform,
    gesture: GestureState,
    status: TrackingStatus,
}

impl<S: LandmarkSource> TrackingSession<S> {
    pub fn new(source: S, config: GestureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            classifier: GestureClassifier::new(config.classifier)?,
            controller: InteractionController::new(config.controller)?,
            rendered: RenderedTransform::new(),
            gesture: GestureState::default(),
            status: TrackingStatus::Stopped,
            config,
        })
    }

    /// Start the source. Does nothing when already tracking.
    ///
    /// On failure the status returns to [`TrackingStatus::Stopped`] and the
    /// interaction state is left as it was.
    pub fn start(&mut self) -> Result<()> {
        if self.status == TrackingStatus::Tracking {
            return Ok(());
        }
        self.status = TrackingStatus::Starting;
        match self.source.start() {
            Ok(()) => {
                self.status = TrackingStatus::Tracking;
                info!("Tracking started");
                Ok(())
            }
            Err(e) => {
                self.status = TrackingStatus::Stopped;
                warn!("Failed to start landmark source: {}", e);
                Err(e)
            }
        }
    }

    /// Stop the source and drop classifier history and the held gesture.
    ///
    /// The transform targets survive, so a later start resumes where the
    /// interaction left off.
    pub fn stop(&mut self) {
        if self.status == TrackingStatus::Stopped {
            return;
        }
        self.source.stop();
        self.classifier.reset_history();
        self.gesture = GestureState::neutral(self.classifier.history().frame());
        self.status = TrackingStatus::Stopped;
        info!("Tracking stopped");
    }

    /// Poll and classify one frame.
    ///
    /// Returns `Ok(None)` when not tracking or no frame is ready. A malformed
    /// frame is reported as an error and leaves the held gesture unchanged.
    pub fn pump(&mut self) -> Result<Option<GestureState>> {
        if self.status != TrackingStatus::Tracking {
            return Ok(None);
        }
        let Some(frame) = self.source.poll_frame()? else {
            return Ok(None);
        };
        self.gesture = self.classifier.classify_landmarks(frame.landmarks.as_deref())?;
        Ok(Some(self.gesture))
    }

    /// Advance the interaction by one render tick of `dt` seconds
    pub fn tick(&mut self, dt: f32) -> &RenderedTransform {
        let target = *self.controller.tick(&self.gesture);
        self.rendered
            .advance(&target, self.gesture.is_hand_present(), dt, &self.config.interpolation);
        &self.rendered
    }

    /// Reset the transform targets, as from a reset button
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    /// The most recently classified gesture
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn target(&self) -> &TransformState {
        self.controller.state()
    }

    pub fn rendered(&self) -> &RenderedTransform {
        &self.rendered
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
