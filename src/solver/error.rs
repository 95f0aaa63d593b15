//! Solver errors
//!
//! Two families:
//! - **Domain errors**: the requested profile is not physical on the duct
//!   (T ≤ 0 somewhere), detected once when the temperature field is built.
//! - **Configuration errors**: caller contract violations (unknown mode,
//!   unknown profile index, meaningless constants). Never clamped.
//!
//! Both abort only the solve that raised them.
//!
//! An inexact mode match is *not* an error; see
//! [`MatchQuality`](crate::solver::MatchQuality).

use thiserror::Error;

/// Errors that can be returned by a mode solve
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ModeError {
    /// Temperature is zero, negative or not finite somewhere on the duct.
    #[error(
        "Non-physical temperature {temperature} K at x = {position} m for profile `{profile}`: \
         the speed of sound is undefined"
    )]
    NonPhysicalTemperature {
        /// Axial position of the first offending sample (m)
        position: f64,
        /// Offending temperature (K)
        temperature: f64,
        /// Label of the profile
        profile: String,
    },

    /// Target mode outside `0..=max`.
    #[error("Unsupported target mode {mode}: expected a mode in 0..={max}")]
    UnsupportedMode {
        /// Requested mode
        mode: usize,
        /// Largest supported mode
        max: usize,
    },

    /// Profile index outside the reference table.
    #[error("Unknown temperature profile index {index}: the table holds {available} profiles")]
    UnknownProfile {
        /// Requested index
        index: usize,
        /// Number of tabulated profiles
        available: usize,
    },

    /// A configuration constant is not meaningful.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ModeError {
    /// True for the non-physical temperature family
    pub fn is_domain_error(&self) -> bool {
        matches!(self, ModeError::NonPhysicalTemperature { .. })
    }

    /// True for caller contract violations
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ModeError::UnsupportedMode { .. }
                | ModeError::UnknownProfile { .. }
                | ModeError::InvalidConfiguration(_)
        )
    }
}
