//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantSlope, UniformWave};
pub use test_helpers::{relative_error, uniform_sound_speed};
