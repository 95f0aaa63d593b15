//! Linear axial temperature profiles
//!
//! A profile is the pair (T_base, gradient) defining
//!
//! ```text
//! T(x) = T_base + gradient · x
//! ```
//!
//! Five reference profiles are tabulated in [`PROFILE_TABLE`], from a uniform
//! 300 K duct to a hot inlet at 1100 K cooling by 200 K/m.
//!
//! A [`TemperatureField`] is the profile sampled on a [`SpatialGrid`]. Building
//! a field is the only place where temperatures are checked: a non-positive
//! temperature makes the speed of sound undefined, so construction fails with
//! [`ModeError::NonPhysicalTemperature`] before any integration starts.

use std::fmt;

use nalgebra::DVector;

use crate::physics::{DuctConfiguration, SpatialGrid};
use crate::solver::ModeError;

/// Reference (T_base [K], gradient [K/m]) pairs
pub const PROFILE_TABLE: [(f64, f64); 5] = [
    (300.0, 0.0),
    (500.0, -50.0),
    (700.0, -100.0),
    (900.0, -150.0),
    (1100.0, -200.0),
];

/// Linear temperature profile T(x) = T_base + gradient · x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureProfile {
    base: f64,
    gradient: f64,
}

impl TemperatureProfile {
    /// Create an arbitrary linear profile
    pub fn new(base: f64, gradient: f64) -> Self {
        Self { base, gradient }
    }

    /// Select one of the tabulated reference profiles
    ///
    /// # Errors
    ///
    /// [`ModeError::UnknownProfile`] when `index >= PROFILE_TABLE.len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duct_rs::physics::TemperatureProfile;
    ///
    /// let profile = TemperatureProfile::from_index(1)?;
    /// assert_eq!(profile.evaluate(2.0), 400.0);
    /// assert_eq!(profile.label(), "T(x) = 500 -50x");
    ///
    /// assert!(TemperatureProfile::from_index(5).is_err());
    /// # Ok::<(), duct_rs::solver::ModeError>(())
    /// ```
    pub fn from_index(index: usize) -> Result<Self, ModeError> {
        PROFILE_TABLE
            .get(index)
            .map(|&(base, gradient)| Self::new(base, gradient))
            .ok_or(ModeError::UnknownProfile {
                index,
                available: PROFILE_TABLE.len(),
            })
    }

    /// All tabulated profiles, in table order
    pub fn table() -> impl Iterator<Item = TemperatureProfile> {
        PROFILE_TABLE
            .iter()
            .map(|&(base, gradient)| Self::new(base, gradient))
    }

    /// Temperature at x = 0 (K)
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Axial gradient (K/m)
    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    /// T(x)
    pub fn evaluate(&self, x: f64) -> f64 {
        self.base + self.gradient * x
    }

    /// The profile as a plain closure `x ↦ T(x)`
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + Copy {
        let Self { base, gradient } = *self;
        move |x| base + gradient * x
    }

    /// Human-readable label, e.g. `T(x) = 700 -100x`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TemperatureProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `+ 0.0` folds -0.0 into +0.0 so a flat profile reads "+0x".
        write!(f, "T(x) = {} {:+}x", self.base, self.gradient + 0.0)
    }
}

// =================================================================================================
// Temperature Field
// =================================================================================================

/// A temperature profile sampled on every grid node
///
/// Immutable once built. Also caches the local speed of sound at each node,
/// since both the sweep bounds and the ODE need it.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureField {
    grid: SpatialGrid,
    temperatures: DVector<f64>,
    sound_speeds: DVector<f64>,
    profile: TemperatureProfile,
}

impl TemperatureField {
    /// Sample `profile` on the grid described by `config`
    ///
    /// # Errors
    ///
    /// [`ModeError::NonPhysicalTemperature`] if T ≤ 0 (or is not finite) on
    /// any grid node or at the open end x = L.
    pub fn build(profile: &TemperatureProfile, config: &DuctConfiguration) -> Result<Self, ModeError> {
        let grid = SpatialGrid::new(config);
        let temperatures = grid.positions().map(|x| profile.evaluate(x));

        let nodes = grid.as_slice().iter().copied().zip(temperatures.iter().copied());
        let open_end = std::iter::once((config.length, profile.evaluate(config.length)));

        for (position, temperature) in nodes.chain(open_end) {
            if !temperature.is_finite() || temperature <= 0.0 {
                return Err(ModeError::NonPhysicalTemperature {
                    position,
                    temperature,
                    profile: profile.label(),
                });
            }
        }

        let sound_speeds = temperatures.map(|t| config.sound_speed(t));

        Ok(Self {
            grid,
            temperatures,
            sound_speeds,
            profile: *profile,
        })
    }

    /// Underlying grid
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Profile this field was sampled from
    pub fn profile(&self) -> &TemperatureProfile {
        &self.profile
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    /// Never true for a field built from a valid configuration
    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Temperature at node `index` (K)
    pub fn temperature(&self, index: usize) -> f64 {
        self.temperatures[index]
    }

    /// All node temperatures (K)
    pub fn temperatures(&self) -> &DVector<f64> {
        &self.temperatures
    }

    /// Speed of sound at every node (m/s)
    pub fn sound_speeds(&self) -> &DVector<f64> {
        &self.sound_speeds
    }

    /// Arithmetic mean of the nodal sound speeds (m/s)
    pub fn mean_sound_speed(&self) -> f64 {
        self.sound_speeds.mean()
    }
}
