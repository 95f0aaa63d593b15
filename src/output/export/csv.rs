//! CSV export of mode solutions
//!
//! Two file shapes:
//!
//! ## Mode profile (one solution)
//!
//! ```csv
//! # Duct Acoustic Mode
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Profile: T(x) = 500 -50x
//! # Mode: 1
//! # Omega: 398.41 rad/s
//! # Frequency: 63.41 Hz
//! # Terminal Pressure: -3.2 Pa
//! # Peaks: 1
//! # Match: exact
//! #
//! x (m),P (Pa),|P| (Pa),Z (Pa/m),|u| (m/s)
//! 0.000000,2000.000000,2000.000000,0.000000,0.000000
//! ...
//! ```
//!
//! ## Frequency table (many solutions)
//!
//! ```csv
//! profile,mode,omega (rad/s),frequency (Hz),terminal pressure (Pa),peaks,match
//! T(x) = 300 +0x,0,136.41,21.71,-1.25,0,exact
//! ...
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use duct_rs::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//! exporter.export_mode(&solution, &config, "mode_1.csv")?;
//! exporter.export_frequency_table(&solutions, "frequencies.csv")?;
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::output::export::Exporter;
use crate::physics::DuctConfiguration;
use crate::solver::{MatchQuality, ModeSolution};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while writing CSV files
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CsvError {
    /// Nothing to write
    #[error("Empty data: {0}")]
    EmptyData(&'static str),

    /// A NaN or infinite value was found
    #[error("Invalid data: NaN or Inf detected in column `{column}` at row {row}")]
    NonFinite {
        /// Column header
        column: &'static str,
        /// Row index
        row: usize,
    },

    /// Underlying I/O failure
    #[error("I/O error while writing CSV")]
    Io(#[from] io::Error),
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use duct_rs::output::export::CsvConfig;
///
/// let config = CsvConfig::default().delimiter(';').precision(10);
/// assert_eq!(config.delimiter, ';');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Write `#` metadata comments before the header (default: true)
    pub include_metadata: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_metadata: true,
        }
    }
}

impl CsvConfig {
    /// Create config with high precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: toggle metadata comments
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn match_label(quality: MatchQuality) -> &'static str {
    match quality {
        MatchQuality::Exact => "exact",
        MatchQuality::Fallback => "fallback",
    }
}

fn check_finite(column: &'static str, values: &[f64]) -> Result<(), CsvError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(CsvError::NonFinite { column, row }),
        None => Ok(()),
    }
}

fn write_metadata_header<W: Write>(writer: &mut W, solution: &ModeSolution) -> io::Result<()> {
    writeln!(writer, "# Duct Acoustic Mode")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;
    writeln!(writer, "# Profile: {}", solution.profile())?;
    writeln!(writer, "# Mode: {}", solution.target_mode)?;
    writeln!(writer, "# Omega: {} rad/s", solution.omega)?;
    writeln!(writer, "# Frequency: {} Hz", solution.frequency_hz())?;
    writeln!(writer, "# Terminal Pressure: {} Pa", solution.terminal_pressure)?;
    writeln!(writer, "# Peaks: {}", solution.peak_count())?;
    writeln!(writer, "# Match: {}", match_label(solution.match_quality))?;
    writeln!(writer, "#")
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    /// Formatting options
    pub config: CsvConfig,
}

impl CsvExporter {
    /// Exporter with custom formatting
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    fn format_number(&self, value: f64) -> String {
        format!("{:.*}", self.config.precision, value)
    }

    /// Write one mode profile to any writer
    pub fn write_mode<W: Write>(
        &self,
        writer: &mut W,
        solution: &ModeSolution,
        duct: &DuctConfiguration,
    ) -> Result<(), CsvError> {
        // ============================= Validation =============================

        if solution.pressure.is_empty() {
            return Err(CsvError::EmptyData("mode solution has no grid point"));
        }

        let magnitude = solution.pressure_magnitude();
        let velocity = solution.velocity_amplitude(duct);

        check_finite("P (Pa)", solution.pressure.as_slice())?;
        check_finite("Z (Pa/m)", solution.gradient.as_slice())?;
        check_finite("|u| (m/s)", velocity.as_slice())?;

        // ============================= Write ==================================

        if self.config.include_metadata {
            write_metadata_header(writer, solution)?;
        }

        let d = self.config.delimiter;
        writeln!(writer, "x (m){d}P (Pa){d}|P| (Pa){d}Z (Pa/m){d}|u| (m/s)")?;

        for i in 0..solution.pressure.len() {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}",
                self.format_number(solution.grid().position(i)),
                self.format_number(solution.pressure[i]),
                self.format_number(magnitude[i]),
                self.format_number(solution.gradient[i]),
                self.format_number(velocity[i]),
            )?;
        }

        Ok(())
    }

    /// Write a one-row-per-solution frequency table to any writer
    pub fn write_frequency_table<W: Write>(
        &self,
        writer: &mut W,
        solutions: &[ModeSolution],
    ) -> Result<(), CsvError> {
        if solutions.is_empty() {
            return Err(CsvError::EmptyData("no mode solution to tabulate"));
        }

        let d = self.config.delimiter;
        writeln!(
            writer,
            "profile{d}mode{d}omega (rad/s){d}frequency (Hz){d}terminal pressure (Pa){d}peaks{d}match"
        )?;

        for solution in solutions {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                solution.profile(),
                solution.target_mode,
                self.format_number(solution.omega),
                self.format_number(solution.frequency_hz()),
                self.format_number(solution.terminal_pressure),
                solution.peak_count(),
                match_label(solution.match_quality),
            )?;
        }

        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_mode<P: AsRef<Path>>(
        &self,
        solution: &ModeSolution,
        duct: &DuctConfiguration,
        path: P,
    ) -> Result<(), CsvError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_mode(&mut writer, solution, duct)?;
        writer.flush()?;
        Ok(())
    }

    fn export_frequency_table<P: AsRef<Path>>(
        &self,
        solutions: &[ModeSolution],
        path: P,
    ) -> Result<(), CsvError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_frequency_table(&mut writer, solutions)?;
        writer.flush()?;
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::TemperatureProfile;
    use crate::solver::{ModeShooter, solve_mode};
    use std::fs;
    use tempfile::NamedTempFile;

    fn uniform_mode(mode: usize) -> ModeSolution {
        solve_mode(mode, &TemperatureProfile::from_index(0).unwrap()).unwrap()
    }

    #[test]
    fn test_mode_csv_has_header_and_one_row_per_node() {
        let solution = uniform_mode(1);
        let exporter = CsvExporter::new(CsvConfig::default().with_metadata(false));

        let mut buffer = Vec::new();
        exporter.write_mode(&mut buffer, &solution, &DuctConfiguration::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "x (m),P (Pa),|P| (Pa),Z (Pa/m),|u| (m/s)");
        assert_eq!(lines.len(), 1 + 41);
        assert!(lines[1].starts_with("0.000000,2000.000000,2000.000000,0.000000,0.000000"));
    }

    #[test]
    fn test_mode_csv_metadata() {
        let solution = uniform_mode(0);
        let exporter = CsvExporter::default();

        let mut buffer = Vec::new();
        exporter.write_mode(&mut buffer, &solution, &DuctConfiguration::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Duct Acoustic Mode\n"));
        assert!(text.contains("# Profile: T(x) = 300 +0x"));
        assert!(text.contains("# Mode: 0"));
        assert!(text.contains("# Match: exact"));
    }

    #[test]
    fn test_custom_delimiter_and_precision() {
        let solution = uniform_mode(0);
        let exporter = CsvExporter::new(CsvConfig::default().delimiter(';').precision(2).with_metadata(false));

        let mut buffer = Vec::new();
        exporter.write_mode(&mut buffer, &solution, &DuctConfiguration::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text.lines().nth(1), Some("0.00;2000.00;2000.00;0.00;0.00"));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let mut solution = uniform_mode(0);
        solution.pressure[3] = f64::NAN;

        let mut buffer = Vec::new();
        let err = CsvExporter::default()
            .write_mode(&mut buffer, &solution, &DuctConfiguration::default())
            .unwrap_err();

        assert!(matches!(err, CsvError::NonFinite { row: 3, .. }));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_frequency_table() {
        let shooter = ModeShooter::new(DuctConfiguration::default()).unwrap();
        let solutions = shooter.solve_all(&TemperatureProfile::from_index(1).unwrap()).unwrap();

        let mut buffer = Vec::new();
        CsvExporter::default().write_frequency_table(&mut buffer, &solutions).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("T(x) = 500 -50x,0,"));
        assert!(lines[4].starts_with("T(x) = 500 -50x,3,"));
    }

    #[test]
    fn test_empty_frequency_table_is_rejected() {
        let mut buffer = Vec::new();
        let err = CsvExporter::default().write_frequency_table(&mut buffer, &[]).unwrap_err();
        assert!(matches!(err, CsvError::EmptyData(_)));
    }

    #[test]
    fn test_export_to_file() {
        let solution = uniform_mode(2);
        let file = NamedTempFile::new().unwrap();

        CsvExporter::default()
            .export_mode(&solution, &DuctConfiguration::default(), file.path())
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("# Mode: 2"));
        assert!(content.contains("x (m),P (Pa)"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let solution = uniform_mode(0);
        let err = CsvExporter::default()
            .export_mode(&solution, &DuctConfiguration::default(), "/nonexistent/dir/mode.csv")
            .unwrap_err();

        assert!(matches!(err, CsvError::Io(_)));
    }
}
