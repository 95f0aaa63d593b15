//! Uniform axial grid
//!
//! The duct axis is sampled from x = 0 (closed end) to x = L (open end)
//! with a constant step. Positions are computed directly from the index
//! (`i * dx`) rather than by accumulation, so the last node lands on L
//! within machine precision.

use nalgebra::DVector;

use crate::physics::DuctConfiguration;

/// Ordered, evenly spaced axial positions
///
/// # Invariants
///
/// - `len() == floor(L / dx) + 1`
/// - strictly increasing, constant step
/// - `position(0) == 0.0`
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    positions: DVector<f64>,
    dx: f64,
}

impl SpatialGrid {
    /// Build the grid described by a configuration
    ///
    /// # Example
    ///
    /// ```rust
    /// use duct_rs::physics::{DuctConfiguration, SpatialGrid};
    ///
    /// let grid = SpatialGrid::new(&DuctConfiguration::default());
    /// assert_eq!(grid.len(), 41);
    /// assert!((grid.last() - 4.0).abs() < 1e-12);
    /// ```
    pub fn new(config: &DuctConfiguration) -> Self {
        let dx = config.dx;
        let positions = DVector::from_fn(config.grid_points(), |i, _| i as f64 * dx);

        Self { positions, dx }
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// A grid always holds at least the origin
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of intervals between grid points
    pub fn steps(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Grid step (m)
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Position of node `index`
    pub fn position(&self, index: usize) -> f64 {
        self.positions[index]
    }

    /// Position of the last node
    pub fn last(&self) -> f64 {
        self.positions[self.steps()]
    }

    /// All positions
    pub fn positions(&self) -> &DVector<f64> {
        &self.positions
    }

    /// Positions as a plain slice
    pub fn as_slice(&self) -> &[f64] {
        self.positions.as_slice()
    }
}
