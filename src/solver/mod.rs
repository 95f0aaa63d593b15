//! Numerical solvers
//!
//! This module applies numerical methods to the equations provided by
//! [`physics`](crate::physics) in order to find acoustic eigenmodes.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Model** ([`SpatialModel`](crate::physics::SpatialModel)) - WHAT to integrate
//! 2. **Integrator** ([`RK4Integrator`]) - HOW to integrate one candidate frequency
//! 3. **Classifier** ([`PeakClassifier`]) - which mode a trajectory looks like
//! 4. **Shooter** ([`ModeShooter`]) - sweep, classify, select
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌────────────────────┐
//! │ TemperatureProfile │
//! └─────────┬──────────┘
//!           │ build (T ≤ 0 → ModeError)
//! ┌─────────▼──────────┐
//! │ TemperatureField   │──► mean sound speed ──► FrequencySweep
//! └─────────┬──────────┘                              │
//!           │                            ┌────────────▼────────────┐
//! ┌─────────▼──────────┐    per ω        │ RK4Integrator           │
//! │ AcousticOdeSystem  │────────────────►│ (P, Z) on every node    │
//! └────────────────────┘                 └────────────┬────────────┘
//!                                                     │ |P|
//!                                        ┌────────────▼────────────┐
//!                                        │ PeakClassifier          │
//!                                        └────────────┬────────────┘
//!                                                     │ FrequencyCandidate
//!                                        ┌────────────▼────────────┐
//!                                        │ filter_by_peak_count    │
//!                                        │ select_min_residual     │
//!                                        └────────────┬────────────┘
//!                                                     │
//!                                              ModeSolution
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use duct_rs::physics::TemperatureProfile;
//! use duct_rs::solver::solve_mode;
//!
//! # fn main() -> Result<(), duct_rs::solver::ModeError> {
//! for index in 0..5 {
//!     let profile = TemperatureProfile::from_index(index)?;
//!     let solution = solve_mode(2, &profile)?;
//!     println!("{}: f = {:.2} Hz ({} peaks)", profile, solution.frequency_hz(), solution.peak_count());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All solve paths return `Result<T, ModeError>`:
//! - Unsupported mode, unknown profile, invalid constants → configuration errors
//! - Temperature ≤ 0 on the duct → domain error
//!
//! An inexact mode match is reported through
//! [`ModeSolution::match_quality`], never as an error.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod error;
mod methods;
mod peaks;
mod shooter;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use error::ModeError;
pub use methods::{RK4Integrator, Trajectory};
pub use peaks::{PeakClassifier, PeakReport};
pub use shooter::{
    FrequencyCandidate,
    FrequencySweep,
    MAX_TARGET_MODE,
    MatchQuality,
    ModeShooter,
    ModeSolution,
    expected_peak_count,
    filter_by_peak_count,
    select_candidate,
    select_min_residual,
    solve_mode,
};

// =================================================================================================
// Tests
// =================================================================================================
