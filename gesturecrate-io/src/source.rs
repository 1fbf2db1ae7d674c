//! Landmark sources

use gesturecrate_core::{Error, Landmark, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::recording::{read_recording, Recording};

/// One frame delivered by a landmark source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFrame {
    /// Landmarks of the first detected hand, `None` when no hand was found.
    /// Not validated: a detector may deliver the wrong number of points.
    pub landmarks: Option<Vec<Landmark>>,
    pub timestamp_ms: u64,
}

impl SourceFrame {
    pub fn new(landmarks: Option<Vec<Landmark>>, timestamp_ms: u64) -> Self {
        Self { landmarks, timestamp_ms }
    }

    pub fn no_hand(timestamp_ms: u64) -> Self {
        Self { landmarks: None, timestamp_ms }
    }
}

/// A producer of hand landmarks, such as a camera-backed detector
pub trait LandmarkSource {
    /// Acquire the underlying device or data. Starting a running source is a no-op.
    fn start(&mut self) -> Result<()>;

    /// Release the source. Stopping a stopped source is a no-op.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Fetch the next frame without blocking, `Ok(None)` when none is ready
    fn poll_frame(&mut self) -> Result<Option<SourceFrame>>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn start(&mut self) -> Result<()> {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }

    fn poll_frame(&mut self) -> Result<Option<SourceFrame>> {
        (**self).poll_frame()
    }
}

#[derive(Debug, Clone)]
enum ReplayInput {
    Frames,
    File(PathBuf),
}

/// Replays a fixed sequence of frames, from memory or a recording file
#[derive(Debug, Clone)]
pub struct ReplaySource {
    input: ReplayInput,
    frames: Vec<Option<Vec<Landmark>>>,
    cursor: usize,
    emitted: u64,
    frame_interval_ms: u64,
    looping: bool,
    running: bool,
}

impl ReplaySource {
    /// Replay raw frames as given, including malformed ones
    pub fn scripted(frames: Vec<Option<Vec<Landmark>>>) -> Self {
        Self::with_input(ReplayInput::Frames, frames)
    }

    pub fn from_recording(recording: &Recording) -> Self {
        Self::scripted(Self::raw_frames(recording))
    }

    /// Replay a recording file, loaded when the source starts
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self::with_input(ReplayInput::File(path.as_ref().to_path_buf()), Vec::new())
    }

    fn with_input(input: ReplayInput, frames: Vec<Option<Vec<Landmark>>>) -> Self {
        Self {
            input,
            frames,
            cursor: 0,
            emitted: 0,
            frame_interval_ms: 33,
            looping: false,
            running: false,
        }
    }

    fn raw_frames(recording: &Recording) -> Vec<Option<Vec<Landmark>>> {
        recording
            .iter()
            .map(|frame| frame.as_ref().map(|obs| obs.landmarks().to_vec()))
            .collect()
    }

    /// Start over from the first frame after the last one
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Timestamp spacing between consecutive frames
    pub fn with_frame_interval(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True once every frame has been delivered and the source does not loop
    pub fn is_exhausted(&self) -> bool {
        !self.looping && self.cursor >= self.frames.len()
    }
}

impl LandmarkSource for ReplaySource {
    fn start(&mut self) -> Result<()> {
        if self.running {
            return Ok(());
        }
        if let ReplayInput::File(path) = &self.input {
            let recording = read_recording(path).map_err(|e| {
                warn!("Failed to load recording {}: {}", path.display(), e);
                Error::SourceUnavailable(format!("{}: {}", path.display(), e))
            })?;
            self.frames = Self::raw_frames(&recording);
        }
        self.cursor = 0;
        self.emitted = 0;
        self.running = true;
        info!("Replay source started with {} frames", self.frames.len());
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn poll_frame(&mut self) -> Result<Option<SourceFrame>> {
        if !self.running || self.frames.is_empty() {
            return Ok(None);
        }
        if self.cursor >= self.frames.len() {
            if !self.looping {
                return Ok(None);
            }
            self.cursor = 0;
        }

        let frame = SourceFrame::new(
            self.frames[self.cursor].clone(),
            self.emitted * self.frame_interval_ms,
        );
        self.cursor += 1;
        self.emitted += 1;
        Ok(Some(frame))
    }
}
