//! Runge-Kutta 4 (RK4) spatial integrator
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method advances dy/dx = f(x, y)
//! with a weighted average of four slope estimates:
//!
//! ```text
//! k₁ = f(xᵢ, yᵢ)
//! k₂ = f(xᵢ + dx/2, yᵢ + dx/2 · k₁)
//! k₃ = f(xᵢ + dx/2, yᵢ + dx/2 · k₂)
//! k₄ = f(xᵢ + dx,   yᵢ + dx · k₃)
//!
//! yᵢ₊₁ = yᵢ + dx/6 · (k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(dx⁴))
//! - **Complexity**: 4 function evaluations per step
//! - **Step**: fixed, no error control
//!
//! # Node-sampled coefficients
//!
//! A [`SpatialModel`] only knows its coefficients on grid nodes. All four
//! stages of step i are therefore evaluated with the coefficients of node i;
//! only the state estimate differs between stages. For a model with constant
//! coefficients this is exactly classical RK4.
//!
//! # Example
//!
//! ```rust
//! use duct_rs::physics::{
//!     AcousticOdeSystem, AcousticState, DuctConfiguration, TemperatureField, TemperatureProfile,
//! };
//! use duct_rs::solver::RK4Integrator;
//!
//! # fn main() -> Result<(), duct_rs::solver::ModeError> {
//! let config = DuctConfiguration::default();
//! let field = TemperatureField::build(&TemperatureProfile::from_index(0)?, &config)?;
//! let system = AcousticOdeSystem::new(&field, &config);
//!
//! let trajectory = RK4Integrator::new().integrate(
//!     &system,
//!     0.0,
//!     AcousticState::new(config.initial_pressure, 0.0),
//! );
//!
//! assert_eq!(trajectory.len(), 41);
//! assert_eq!(trajectory.terminal_pressure(), 2000.0);
//! # Ok(())
//! # }
//! ```

use nalgebra::DVector;

use crate::physics::{AcousticState, SpatialModel};

// =================================================================================================
// Trajectory
// =================================================================================================

/// Pressure and pressure-gradient samples on every grid node
///
/// Both sequences have exactly `model.points()` entries; index `i` is node `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pressure: DVector<f64>,
    gradient: DVector<f64>,
}

impl Trajectory {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    /// True when no node was sampled
    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// P at every node
    pub fn pressure(&self) -> &DVector<f64> {
        &self.pressure
    }

    /// Z = dP/dx at every node
    pub fn gradient(&self) -> &DVector<f64> {
        &self.gradient
    }

    /// |P| at every node
    pub fn pressure_magnitude(&self) -> DVector<f64> {
        self.pressure.abs()
    }

    /// P at the last node, the open-end boundary residual
    pub fn terminal_pressure(&self) -> f64 {
        self.pressure[self.len() - 1]
    }

    /// Split into (P, Z)
    pub fn into_parts(self) -> (DVector<f64>, DVector<f64>) {
        (self.pressure, self.gradient)
    }
}

// =================================================================================================
// RK4 Integrator
// =================================================================================================

/// Fixed-step classical Runge-Kutta integrator over a spatial grid
///
/// Stateless: one instance can be shared by any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Integrator;

impl RK4Integrator {
    /// Create a new RK4 integrator
    ///
    /// ```rust
    /// use duct_rs::solver::RK4Integrator;
    ///
    /// let integrator = RK4Integrator::new();
    /// assert_eq!(integrator.name(), "Runge Kutta (RK4)");
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Integrate `model` from node 0 to the last node at angular frequency `omega`
    ///
    /// Single pass, no early termination: every node gets a sample even if the
    /// solution grows large.
    pub fn integrate<M>(&self, model: &M, omega: f64, initial: AcousticState) -> Trajectory
    where
        M: SpatialModel + ?Sized,
    {
        let dx = model.step_size();
        let steps = model.steps();

        // Trajectory length is known upfront
        let mut pressure = DVector::zeros(model.points());
        let mut gradient = DVector::zeros(model.points());

        let mut state = initial;
        pressure[0] = state[0];
        gradient[0] = state[1];

        for step in 0..steps {
            // ====== RK4 Stages ======

            let k1 = model.derivative(step, &state, omega);
            let k2 = model.derivative(step, &(state + k1 * (dx / 2.0)), omega);
            let k3 = model.derivative(step, &(state + k2 * (dx / 2.0)), omega);
            let k4 = model.derivative(step, &(state + k3 * dx), omega);

            // ====== RK4 Update ======

            state += (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dx / 6.0);

            // ====== Storage ======

            pressure[step + 1] = state[0];
            gradient[step + 1] = state[1];
        }

        Trajectory { pressure, gradient }
    }

    /// Method name
    pub fn name(&self) -> &'static str {
        "Runge Kutta (RK4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
