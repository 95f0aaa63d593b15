//! Export module for mode solutions.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module; adding
//! a format means adding a file.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use duct_rs::output::export::{CsvExporter, Exporter};
//! use duct_rs::physics::{DuctConfiguration, TemperatureProfile};
//! use duct_rs::solver::ModeShooter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DuctConfiguration::default();
//! let shooter = ModeShooter::new(config)?;
//! let solutions = shooter.solve_all(&TemperatureProfile::from_index(2)?)?;
//!
//! let exporter = CsvExporter::default();
//! exporter.export_mode(&solutions[1], &config, "mode_1.csv")?;
//! exporter.export_frequency_table(&solutions, "frequencies.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvError, CsvExporter};

use std::path::Path;

use crate::physics::DuctConfiguration;
use crate::solver::ModeSolution;

/// Abstraction trait for all export formats.
///
/// Each format manages its own errors via the associated type, so callers
/// can react precisely without boxing.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the axial distributions of one solution.
    ///
    /// `duct` supplies the gas constants needed for the velocity amplitude.
    fn export_mode<P: AsRef<Path>>(
        &self,
        solution: &ModeSolution,
        duct: &DuctConfiguration,
        path: P,
    ) -> Result<(), Self::Error>;

    /// Exports one summary row per solution.
    fn export_frequency_table<P: AsRef<Path>>(
        &self,
        solutions: &[ModeSolution],
        path: P,
    ) -> Result<(), Self::Error>;
}
