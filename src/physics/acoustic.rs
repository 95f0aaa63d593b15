//! One-dimensional acoustics in a duct with an axial temperature gradient
//!
//! # Governing equation
//!
//! For a harmonic perturbation p'(x, t) = P(x)·e^{iωt} in a gas at rest whose
//! temperature varies along the axis, the pressure amplitude satisfies
//!
//! ```text
//! d²P/dx² + (T'/T)·dP/dx + (ω²/c²)·P = 0,      c(x) = sqrt(γ·R·T(x))
//! ```
//!
//! Written as a first-order system in (P, Z = dP/dx):
//!
//! ```text
//! dP/dx = Z
//! dZ/dx = -(T'/T)·Z - (ω²/c²)·P
//! ```
//!
//! # Discrete gradient
//!
//! T' is estimated from the sampled field with a forward difference
//! (T[i+1] - T[i]) / dx at every node except the last one, where the
//! backward difference (T[i] - T[i-1]) / dx is used instead.
//!
//! No guard against T ≤ 0 here: [`TemperatureField::build`] already
//! rejected such fields.

use crate::physics::{AcousticState, DuctConfiguration, SpatialModel, TemperatureField};

/// Right-hand side of the duct acoustics ODE
///
/// Borrows a [`TemperatureField`] for the duration of an integration run.
#[derive(Debug, Clone, Copy)]
pub struct AcousticOdeSystem<'a> {
    field: &'a TemperatureField,
    gamma: f64,
    gas_constant: f64,
    dx: f64,
}

impl<'a> AcousticOdeSystem<'a> {
    /// Bind the ODE to a temperature field and the gas properties of `config`
    pub fn new(field: &'a TemperatureField, config: &DuctConfiguration) -> Self {
        Self {
            field,
            gamma: config.gamma,
            gas_constant: config.gas_constant,
            dx: config.dx,
        }
    }

    /// Temperature field the system is bound to
    pub fn field(&self) -> &TemperatureField {
        self.field
    }

    /// Finite-difference estimate of dT/dx at node `index`
    pub fn temperature_gradient(&self, index: usize) -> f64 {
        let last = self.field.len() - 1;

        if index < last {
            (self.field.temperature(index + 1) - self.field.temperature(index)) / self.dx
        } else {
            (self.field.temperature(index) - self.field.temperature(index - 1)) / self.dx
        }
    }

    /// c² = γ·R·T at node `index`
    fn sound_speed_squared(&self, index: usize) -> f64 {
        self.gamma * self.gas_constant * self.field.temperature(index)
    }
}

impl SpatialModel for AcousticOdeSystem<'_> {
    fn points(&self) -> usize {
        self.field.len()
    }

    fn step_size(&self) -> f64 {
        self.dx
    }

    fn derivative(&self, index: usize, state: &AcousticState, omega: f64) -> AcousticState {
        let (pressure, gradient) = (state[0], state[1]);
        let temperature = self.field.temperature(index);

        let dp_dx = gradient;
        let dz_dx = -(self.temperature_gradient(index) / temperature) * gradient
            - (omega * omega) / self.sound_speed_squared(index) * pressure;

        AcousticState::new(dp_dx, dz_dx)
    }

    fn name(&self) -> &str {
        "Duct Acoustics (linear temperature gradient)"
    }
}
