//! Pressure-peak counting
//!
//! A mode is classified by how many interior local maxima of |P| rise above
//! a threshold (half the closed-end pressure by default). The two boundary
//! nodes are never peaks.

use crate::physics::DuctConfiguration;

/// Outcome of a peak scan
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeakReport {
    /// Indices of the peaks, increasing
    pub indices: Vec<usize>,
}

impl PeakReport {
    /// Number of peaks
    pub fn count(&self) -> usize {
        self.indices.len()
    }
}

/// Counts interior local maxima above a fixed threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakClassifier {
    threshold: f64,
}

impl PeakClassifier {
    /// Classifier with an explicit threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Classifier using `config.peak_threshold()`
    pub fn from_configuration(config: &DuctConfiguration) -> Self {
        Self::new(config.peak_threshold())
    }

    /// Threshold a peak must strictly exceed
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Scan `values` for interior peaks
    ///
    /// Node i (1 ≤ i ≤ len-2) is a peak iff it is strictly greater than both
    /// neighbours and strictly greater than the threshold.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duct_rs::solver::PeakClassifier;
    ///
    /// let report = PeakClassifier::new(1000.0).classify(&[500.0, 500.0, 1500.0, 500.0, 500.0]);
    /// assert_eq!(report.count(), 1);
    /// assert_eq!(report.indices, vec![2]);
    /// ```
    pub fn classify(&self, values: &[f64]) -> PeakReport {
        let indices = values
            .windows(3)
            .enumerate()
            .filter(|(_, w)| w[1] > w[0] && w[1] > w[2] && w[1] > self.threshold)
            .map(|(i, _)| i + 1)
            .collect();

        PeakReport { indices }
    }
}
