//! Duct and gas configuration
//!
//! Every physical constant used by the solver lives in a single immutable
//! value, [`DuctConfiguration`], which is threaded explicitly through the
//! temperature field, the ODE system, the integrator and the shooter.
//! Two solves with different configurations can therefore run side by side
//! without interfering.
//!
//! # Default values (dry air, 4 m duct)
//!
//! | Field                  | Value    | Unit     |
//! |------------------------|----------|----------|
//! | `gamma`                | 1.4      | -        |
//! | `gas_constant`         | 287.2    | J/(kg·K) |
//! | `dx`                   | 0.1      | m        |
//! | `initial_pressure`     | 2000     | Pa       |
//! | `length`               | 4.0      | m        |
//! | `sweep_points`         | 300      | -        |
//! | `peak_threshold_ratio` | 0.5      | -        |
//! | `mean_pressure`        | 101 325  | Pa       |
//! | `parallel_threshold`   | 999      | -        |
//!
//! # Example
//!
//! ```rust
//! use duct_rs::physics::DuctConfiguration;
//!
//! let config = DuctConfiguration::default()
//!     .with_length(2.0)
//!     .with_dx(0.05);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.step_count(), 40);
//! assert_eq!(config.peak_threshold(), 1000.0);
//! ```

use crate::solver::ModeError;

/// Specific heat ratio of dry air
pub const GAMMA: f64 = 1.4;

/// Spatial step (m)
pub const DX: f64 = 0.1;

/// Pressure amplitude imposed at the closed end (Pa)
pub const P_INITIAL: f64 = 2000.0;

/// Specific gas constant of dry air (J/(kg·K))
pub const R: f64 = 287.2;

/// Duct length (m)
pub const L: f64 = 4.0;

/// Number of candidate frequencies in one sweep
pub const SWEEP_POINTS: usize = 300;

/// Peak threshold as a fraction of [`P_INITIAL`]
pub const PEAK_THRESHOLD_RATIO: f64 = 0.5;

/// Mean (ambient) pressure used to derive the gas density (Pa)
pub const MEAN_PRESSURE: f64 = 101_325.0;

/// Work (sweep points × grid points) above which a sweep runs on rayon
pub const PARALLEL_THRESHOLD: usize = 999;

/// Largest grid [`DuctConfiguration::validate`] accepts
pub const MAX_GRID_POINTS: usize = 1_000_000;

// Absorbs the representation error of `length / dx` (4.0 / 0.1 = 39.999...).
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Immutable set of physical and numerical parameters for one solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuctConfiguration {
    /// Specific heat ratio γ
    pub gamma: f64,

    /// Specific gas constant R (J/(kg·K))
    pub gas_constant: f64,

    /// Fixed spatial step of the grid and of the integrator (m)
    pub dx: f64,

    /// Pressure at the closed end, x = 0 (Pa)
    pub initial_pressure: f64,

    /// Duct length (m)
    pub length: f64,

    /// Number of evenly spaced candidate frequencies per sweep
    pub sweep_points: usize,

    /// Fraction of `initial_pressure` a local maximum must exceed to count as a peak
    pub peak_threshold_ratio: f64,

    /// Ambient pressure used for the density in velocity post-processing (Pa)
    pub mean_pressure: f64,

    /// Sweeps with more work than this run on the rayon pool when the
    /// `parallel` feature is enabled. Results do not depend on it.
    pub parallel_threshold: usize,
}

impl Default for DuctConfiguration {
    fn default() -> Self {
        Self {
            gamma: GAMMA,
            gas_constant: R,
            dx: DX,
            initial_pressure: P_INITIAL,
            length: L,
            sweep_points: SWEEP_POINTS,
            peak_threshold_ratio: PEAK_THRESHOLD_RATIO,
            mean_pressure: MEAN_PRESSURE,
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }
}

impl DuctConfiguration {
    /// Builder pattern: set duct length
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Builder pattern: set spatial step
    pub fn with_dx(mut self, dx: f64) -> Self {
        self.dx = dx;
        self
    }

    /// Builder pattern: set closed-end pressure amplitude
    pub fn with_initial_pressure(mut self, initial_pressure: f64) -> Self {
        self.initial_pressure = initial_pressure;
        self
    }

    /// Builder pattern: set gas properties
    pub fn with_gas(mut self, gamma: f64, gas_constant: f64) -> Self {
        self.gamma = gamma;
        self.gas_constant = gas_constant;
        self
    }

    /// Builder pattern: set sweep resolution
    pub fn with_sweep_points(mut self, sweep_points: usize) -> Self {
        self.sweep_points = sweep_points;
        self
    }

    /// Builder pattern: set peak threshold ratio
    pub fn with_peak_threshold_ratio(mut self, ratio: f64) -> Self {
        self.peak_threshold_ratio = ratio;
        self
    }

    /// Builder pattern: set mean pressure
    pub fn with_mean_pressure(mut self, mean_pressure: f64) -> Self {
        self.mean_pressure = mean_pressure;
        self
    }

    /// Builder pattern: set the parallel sweep threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Number of integration steps, `floor(length / dx)`
    ///
    /// Saturates for ratios that do not fit a `usize`; [`validate`](Self::validate)
    /// rejects those.
    pub fn step_count(&self) -> usize {
        (self.length / self.dx + STEP_COUNT_TOLERANCE).floor() as usize
    }

    /// Number of grid points, `step_count() + 1`
    pub fn grid_points(&self) -> usize {
        self.step_count().saturating_add(1)
    }

    /// Minimum magnitude a pressure peak must exceed
    pub fn peak_threshold(&self) -> f64 {
        self.peak_threshold_ratio * self.initial_pressure
    }

    /// Local speed of sound c = sqrt(γ·R·T)
    pub fn sound_speed(&self, temperature: f64) -> f64 {
        (self.gamma * self.gas_constant * temperature).sqrt()
    }

    /// Gas density ρ = p̄ / (R·T)
    pub fn density(&self, temperature: f64) -> f64 {
        self.mean_pressure / (self.gas_constant * temperature)
    }

    /// Validate that parameters are physically meaningful
    pub fn validate(&self) -> Result<(), ModeError> {
        let positive = [
            ("gamma", self.gamma),
            ("gas constant", self.gas_constant),
            ("dx", self.dx),
            ("initial pressure", self.initial_pressure),
            ("length", self.length),
            ("mean pressure", self.mean_pressure),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModeError::InvalidConfiguration(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        if self.dx > self.length {
            return Err(ModeError::InvalidConfiguration(format!(
                "dx ({}) cannot exceed the duct length ({})",
                self.dx, self.length
            )));
        }

        let ratio = self.length / self.dx;
        if !ratio.is_finite() || ratio + STEP_COUNT_TOLERANCE >= MAX_GRID_POINTS as f64 {
            return Err(ModeError::InvalidConfiguration(format!(
                "length / dx = {} exceeds the grid limit of {} points",
                ratio, MAX_GRID_POINTS
            )));
        }

        if self.sweep_points < 2 {
            return Err(ModeError::InvalidConfiguration(format!(
                "A frequency sweep needs at least 2 points, got {}",
                self.sweep_points
            )));
        }

        if !(self.peak_threshold_ratio > 0.0 && self.peak_threshold_ratio <= 1.0) {
            return Err(ModeError::InvalidConfiguration(format!(
                "Peak threshold ratio must lie in (0, 1], got {}",
                self.peak_threshold_ratio
            )));
        }

        if self.parallel_threshold == 0 {
            return Err(ModeError::InvalidConfiguration(
                "parallel threshold must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
