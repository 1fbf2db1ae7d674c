//! Core data structures and traits for gesturecrate
//!
//! This crate provides the fundamental types shared by the gesture pipeline:
//! hand landmarks and observations, per-frame gesture states, the interaction
//! transform targets, configuration, and the common error type.

pub mod landmark;
pub mod gesture;
pub mod transform;
pub mod config;
pub mod traits;
pub mod error;

pub use landmark::*;
pub use gesture::*;
pub use transform::*;
pub use config::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector2, Vector3, Matrix4, UnitQuaternion};

/// A 2D vector with floating point components
pub type Vector2f = Vector2<f32>;
