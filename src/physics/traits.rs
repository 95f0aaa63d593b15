//! Spatial ODE traits and types
//!
//! This module defines the seam between physics and numerics:
//! - `AcousticState`: the (P, Z) pair carried along the duct axis
//! - `SpatialModel`: trait for any first-order system dy/dx = f(i, y, ω)
//!   sampled on a uniform grid

use nalgebra::Vector2;

/// State carried by the integrator: `[P, Z]`
///
/// - `state[0]`: acoustic pressure perturbation P (Pa)
/// - `state[1]`: its axial derivative Z = dP/dx (Pa/m)
///
/// Using a fixed-size nalgebra vector lets the integrator write the RK4
/// stages as plain vector arithmetic without any allocation.
pub type AcousticState = Vector2<f64>;

/// Build a state from its components
pub fn acoustic_state(pressure: f64, gradient: f64) -> AcousticState {
    AcousticState::new(pressure, gradient)
}

/// First-order spatial ODE evaluated on grid nodes
///
/// # Design
///
/// Coefficients of the system (temperature, sound speed, ...) are only
/// known at grid nodes, so the right-hand side is addressed by node index
/// rather than by continuous position. The integrator owns the stepping,
/// the model only provides the derivative.
///
/// Implementors must be `Sync`: a frequency sweep may evaluate the same
/// model from several threads at once.
///
/// # Example
///
/// ```rust
/// use duct_rs::physics::{AcousticState, SpatialModel};
///
/// /// d²P/dx² = -k²P with a constant wavenumber k = ω / c
/// struct UniformTube {
///     sound_speed: f64,
/// }
///
/// impl SpatialModel for UniformTube {
///     fn points(&self) -> usize { 11 }
///     fn step_size(&self) -> f64 { 0.1 }
///
///     fn derivative(&self, _index: usize, state: &AcousticState, omega: f64) -> AcousticState {
///         let k = omega / self.sound_speed;
///         AcousticState::new(state[1], -k * k * state[0])
///     }
///
///     fn name(&self) -> &str { "Uniform Tube" }
/// }
///
/// let model = UniformTube { sound_speed: 340.0 };
/// let d = model.derivative(0, &AcousticState::new(1.0, 0.0), 0.0);
/// assert_eq!(d, AcousticState::zeros());
/// ```
pub trait SpatialModel: Sync {
    /// Number of grid nodes (steps + 1)
    fn points(&self) -> usize;

    /// Distance between consecutive nodes
    fn step_size(&self) -> f64;

    /// dy/dx at node `index` for the given state and angular frequency
    fn derivative(&self, index: usize, state: &AcousticState, omega: f64) -> AcousticState;

    /// Model name, for logs and exported metadata
    fn name(&self) -> &str;

    /// Number of integration steps
    fn steps(&self) -> usize {
        self.points().saturating_sub(1)
    }
}
