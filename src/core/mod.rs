//! Core geometric primitives.
//!
//! Math and geometry shared by every simulation component. Nothing in this
//! module reads the clock or touches global state.

pub mod vec3;
pub mod volume;

// Re-export core types
pub use vec3::Vec3;
pub use volume::{Shape, Volume};
