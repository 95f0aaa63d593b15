//! Mock spatial models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating numerical integrator accuracy.

#![allow(dead_code)]

use duct_rs::physics::{AcousticState, SpatialModel};

// =================================================================================================
// Uniform Wave: P'' = -(ω/c)²·P
// =================================================================================================

/// Constant sound speed duct of length `length` split into `steps` intervals
///
/// Analytical solution from P(0) = P₀, P'(0) = 0: P(x) = P₀·cos(ωx/c)
pub struct UniformWave {
    pub steps: usize,
    pub length: f64,
    pub sound_speed: f64,
}

impl UniformWave {
    pub fn new(steps: usize, length: f64, sound_speed: f64) -> Self {
        Self { steps, length, sound_speed }
    }

    /// P(x) for the closed-end initial condition
    pub fn analytical_pressure(&self, x: f64, omega: f64, p0: f64) -> f64 {
        p0 * (omega * x / self.sound_speed).cos()
    }
}

impl SpatialModel for UniformWave {
    fn points(&self) -> usize {
        self.steps + 1
    }

    fn step_size(&self) -> f64 {
        self.length / self.steps as f64
    }

    fn derivative(&self, _index: usize, state: &AcousticState, omega: f64) -> AcousticState {
        let k = omega / self.sound_speed;
        AcousticState::new(state[1], -k * k * state[0])
    }

    fn name(&self) -> &str {
        "Uniform Wave"
    }
}

// =================================================================================================
// Constant Slope: P' = s
// =================================================================================================

/// P' = s, Z ignored
///
/// Analytical solution: P(x) = P₀ + s·x. RK4 is exact.
pub struct ConstantSlope {
    pub steps: usize,
    pub dx: f64,
    pub slope: f64,
}

impl SpatialModel for ConstantSlope {
    fn points(&self) -> usize {
        self.steps + 1
    }

    fn step_size(&self) -> f64 {
        self.dx
    }

    fn derivative(&self, _index: usize, _state: &AcousticState, _omega: f64) -> AcousticState {
        AcousticState::new(self.slope, 0.0)
    }

    fn name(&self) -> &str {
        "Constant Slope"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_wave_analytical() {
        let model = UniformWave::new(10, 4.0, 1.0);

        assert!((model.analytical_pressure(0.0, 1.0, 2.0) - 2.0).abs() < 1e-12);
        assert!((model.analytical_pressure(std::f64::consts::PI, 1.0, 2.0) + 2.0).abs() < 1e-12);
    }
}
