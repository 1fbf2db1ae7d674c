//! # GestureCrate Algorithms
//!
//! The per-frame gesture pipeline.
//!
//! This crate turns hand landmark observations into gesture states and drives
//! the interaction transform from them: geometry measurements, delta
//! smoothing, gesture classification, the interaction controller, and the
//! rendered-transform interpolation.

pub mod geometry;
pub mod smoothing;
pub mod classifier;
pub mod controller;
pub mod interpolation;

// Re-export commonly used items
pub use geometry::*;
pub use smoothing::*;
pub use classifier::*;
pub use controller::*;
pub use interpolation::*;
