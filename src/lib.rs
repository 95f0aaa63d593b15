//! duct-rs: Acoustic Eigenmodes of Ducts with Temperature Gradients
//!
//! Computes the resonant pressure and velocity distributions of a duct that
//! is closed at x = 0 and open at x = L, filled with a gas whose temperature
//! varies linearly along the axis. Built with Rust for performance and safety.
//!
//! # Architecture
//!
//! duct-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define equations (what to solve)
//!    - Numerical solvers provide methods (how to solve)
//!
//! 2. **Explicit configuration**
//!    - Every constant (γ, R, dx, P₀, L) travels in a [`DuctConfiguration`](physics::DuctConfiguration)
//!    - No global mutable state: every solve is independent and reproducible
//!
//! # Method
//!
//! A shooting method: for each of 300 candidate angular frequencies the wave
//! equation is integrated from the closed end (P = P₀, dP/dx = 0) with RK4.
//! Candidates are classified by the number of interior peaks of |P| and the
//! one with the expected peak count and the smallest open-end pressure |P(L)|
//! is retained.
//!
//! # Quick Start
//!
//! ```rust
//! use duct_rs::physics::{DuctConfiguration, TemperatureProfile};
//! use duct_rs::solver::ModeShooter;
//!
//! # fn main() -> Result<(), duct_rs::solver::ModeError> {
//! // 1. Configure the duct and pick a temperature profile
//! let config = DuctConfiguration::default();
//! let profile = TemperatureProfile::from_index(3)?;   // T(x) = 900 - 150x
//!
//! // 2. Solve
//! let shooter = ModeShooter::new(config)?;
//! let solution = shooter.solve(1, &profile)?;
//!
//! // 3. Access results
//! println!("{}: f = {:.2} Hz", profile, solution.frequency_hz());
//! println!("exact peak-count match: {}", solution.is_exact());
//! let velocity = solution.velocity_amplitude(&config);
//! assert_eq!(velocity.len(), solution.grid().len());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: configuration, grid, temperature, acoustic ODE
//! - [`solver`]: RK4 integrator, peak classifier, mode shooter
//! - [`output`]: CSV export

// Core modules
pub mod physics;
pub mod solver;

pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use duct_rs::prelude::*;
    //! ```
    pub use crate::physics::{AcousticOdeSystem,
                             AcousticState,
                             DuctConfiguration,
                             SpatialGrid,
                             SpatialModel,
                             TemperatureField,
                             TemperatureProfile};
    pub use crate::solver::{FrequencyCandidate,
                            MatchQuality,
                            ModeError,
                            ModeShooter,
                            ModeSolution,
                            PeakClassifier,
                            RK4Integrator,
                            solve_mode};
}
