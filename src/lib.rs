//! # GestureCrate
//!
//! Hand-gesture recognition and 3D interaction control from hand landmarks.
//!
//! This is the umbrella crate that provides convenient access to all GestureCrate
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Landmarks, observations, gesture and transform states, configuration
//! - **Algorithms**: Gesture classification, the interaction controller, interpolation
//! - **I/O**: Landmark sources, recordings and tracking sessions
//!
//! ## Quick Start
//!
//! ```rust
//! use gesturecrate::prelude::*;
//!
//! let mut classifier = GestureClassifier::default();
//! let mut controller = InteractionController::default();
//!
//! // No hand in view: the gesture is neutral and the targets hold
//! let gesture = classifier.classify(None);
//! let target = controller.tick(&gesture);
//! assert_eq!(*target, TransformState::default());
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core, algorithms and io
//! - `algorithms`: Classification and interaction control
//! - `io`: Landmark sources and tracking sessions (implies `algorithms`)
//! - `all`: Enables all features

// Re-export core functionality
pub use gesturecrate_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use gesturecrate_algorithms as algorithms;

#[cfg(feature = "io")]
pub use gesturecrate_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use gesturecrate_core::*;

    #[cfg(feature = "algorithms")]
    pub use gesturecrate_algorithms::*;

    #[cfg(feature = "io")]
    pub use gesturecrate_io::*;
}
