//! Numerical integration methods
//!
//! Concrete integrators that advance a [`SpatialModel`](crate::physics::SpatialModel)
//! along its grid.
//!
//! # Available Methods
//!
//! - **[`RK4Integrator`]**: Classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(dx⁴)
//!   - Cost: 4 function evaluations per step
//!   - Step: fixed, equal to the grid spacing
//!
//! Integrators are stateless and can be shared between threads.

mod rk4;

// Re-exports for convenience
pub use rk4::{RK4Integrator, Trajectory};
