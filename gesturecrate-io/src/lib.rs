//! Landmark input and session plumbing
//!
//! This crate connects a landmark producer to the gesture pipeline: the
//! [`LandmarkSource`] trait and a replay implementation, a plain-text
//! recording format for landmark streams, and [`TrackingSession`], which
//! drives classification and interaction from a source.

pub mod error;
pub mod recording;
pub mod source;
pub mod session;

pub use error::*;
pub use recording::{
    read_recording, write_recording, Delimiter, Recording, RecordingReader, RecordingWriter,
};
pub use source::{LandmarkSource, ReplaySource, SourceFrame};
pub use session::{TrackingSession, TrackingStatus};
