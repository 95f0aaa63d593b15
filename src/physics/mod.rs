//! Physical models
//!
//! This module provides the physics of the problem: what the gas and the
//! duct look like, and which equations hold along the axis.
//!
//! # Core Concepts
//!
//! - **Configuration** (`DuctConfiguration`): gas constants, duct length, grid step
//! - **Grid** (`SpatialGrid`): uniform axial positions from 0 to L
//! - **Temperature** (`TemperatureProfile`, `TemperatureField`): linear T(x) and its samples
//! - **Model** (`SpatialModel`): the ODE seam consumed by the integrator
//! - **Acoustics** (`AcousticOdeSystem`): the duct wave equation in first-order form
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to solve them (numerics)
//!
//! Data flows one way:
//!
//! ```text
//! TemperatureProfile ─► TemperatureField ─► AcousticOdeSystem ─► (solver)
//! ```
//!
//! # Example
//!
//! ```rust
//! use duct_rs::physics::{
//!     AcousticOdeSystem, AcousticState, DuctConfiguration, SpatialModel,
//!     TemperatureField, TemperatureProfile,
//! };
//!
//! # fn main() -> Result<(), duct_rs::solver::ModeError> {
//! let config = DuctConfiguration::default();
//! let profile = TemperatureProfile::from_index(2)?;
//! let field = TemperatureField::build(&profile, &config)?;
//!
//! let system = AcousticOdeSystem::new(&field, &config);
//! let slope = system.derivative(0, &AcousticState::new(2000.0, 0.0), 300.0);
//!
//! assert_eq!(slope[0], 0.0);   // dP/dx = Z = 0 at the closed end
//! assert!(slope[1] < 0.0);     // restoring term pulls P back
//! # Ok(())
//! # }
//! ```

// module declaration
pub mod acoustic;
pub mod config;
pub mod grid;
pub mod temperature;
pub mod traits;

// re-export commonly used types for convenience
pub use acoustic::AcousticOdeSystem;
pub use config::DuctConfiguration;
pub use grid::SpatialGrid;
pub use temperature::{PROFILE_TABLE, TemperatureField, TemperatureProfile};
pub use traits::{AcousticState, SpatialModel, acoustic_state};
