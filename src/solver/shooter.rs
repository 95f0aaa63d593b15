//! Shooting-method mode search
//!
//! # Algorithm
//!
//! For a target mode m and a temperature profile:
//!
//! 1. Sample the profile on the grid and average the nodal sound speeds, c̄.
//! 2. Sweep N evenly spaced angular frequencies (N = 300 by default):
//!    - m = 0: from 0.01·ω_g to 10·ω_g with ω_g = 0.1·π·c̄/L
//!    - m ≥ 1: from 0.5·ω_g to 2·ω_g with ω_g = m·π·c̄/L
//! 3. For every ω, integrate from the closed end (P = P₀, Z = 0) with RK4
//!    and count the peaks of |P|.
//! 4. Keep the candidates with exactly m peaks.
//! 5. Pick the one with the smallest |P(L)|, the open-end residual. If no
//!    candidate has m peaks, pick the smallest |P(L)| over the whole sweep
//!    and flag the result as [`MatchQuality::Fallback`].
//!
//! The open-end condition P(L) = 0 is never solved for exactly: the result
//! is the best grid frequency of the sweep, not a converged eigenvalue.
//!
//! # Parallelism
//!
//! With the `parallel` feature the candidate integrations are spread over
//! the rayon pool once the sweep is larger than
//! [`DuctConfiguration::parallel_threshold`]. Candidates
//! are collected in sweep order, so both paths return identical results.

use std::f64::consts::PI;

use nalgebra::DVector;

use crate::physics::{
    AcousticOdeSystem, AcousticState, DuctConfiguration, SpatialGrid, SpatialModel, TemperatureField,
    TemperatureProfile,
};
use crate::solver::{ModeError, PeakClassifier, PeakReport, RK4Integrator};

/// Highest supported target mode
pub const MAX_TARGET_MODE: usize = 3;

/// Number of |P| peaks that characterises `mode`
///
/// Mode 0 has no interior peak; mode m ≥ 1 has exactly m.
pub fn expected_peak_count(mode: usize) -> usize {
    mode
}

fn check_mode(mode: usize) -> Result<(), ModeError> {
    if mode > MAX_TARGET_MODE {
        return Err(ModeError::UnsupportedMode {
            mode,
            max: MAX_TARGET_MODE,
        });
    }
    Ok(())
}

// =================================================================================================
// Frequency Sweep
// =================================================================================================

/// Evenly spaced candidate angular frequencies (rad/s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySweep {
    /// Harmonic estimate ω_g the sweep is built around
    pub guess: f64,
    /// First frequency
    pub lower: f64,
    /// Last frequency (included)
    pub upper: f64,
    /// Number of frequencies
    pub points: usize,
}

impl FrequencySweep {
    /// Sweep bounds for `mode` in a duct of `length` with mean sound speed `mean_sound_speed`
    ///
    /// # Example
    ///
    /// ```rust
    /// use duct_rs::solver::FrequencySweep;
    /// use std::f64::consts::PI;
    ///
    /// let sweep = FrequencySweep::for_mode(1, 340.0, 4.0, 300);
    /// assert!((sweep.guess - PI * 340.0 / 4.0).abs() < 1e-12);
    /// assert!((sweep.lower - 0.5 * sweep.guess).abs() < 1e-12);
    /// assert!((sweep.upper - 2.0 * sweep.guess).abs() < 1e-12);
    /// ```
    pub fn for_mode(mode: usize, mean_sound_speed: f64, length: f64, points: usize) -> Self {
        if mode == 0 {
            let guess = 0.1 * PI * mean_sound_speed / length;
            Self { guess, lower: 0.01 * guess, upper: 10.0 * guess, points }
        } else {
            let guess = mode as f64 * PI * mean_sound_speed / length;
            Self { guess, lower: 0.5 * guess, upper: 2.0 * guess, points }
        }
    }

    /// Spacing between consecutive frequencies
    ///
    /// A sweep of 0 or 1 point has spacing `upper - lower`.
    pub fn spacing(&self) -> f64 {
        (self.upper - self.lower) / self.points.saturating_sub(1).max(1) as f64
    }

    /// Frequency number `index`; the last one is exactly `upper`
    pub fn frequency(&self, index: usize) -> f64 {
        if index + 1 == self.points {
            self.upper
        } else {
            self.lower + self.spacing() * index as f64
        }
    }

    /// All frequencies, in increasing order. Empty for a 0-point sweep
    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.points).map(|i| self.frequency(i))
    }

    /// True if `omega` lies inside the swept band
    pub fn contains(&self, omega: f64) -> bool {
        omega >= self.lower && omega <= self.upper
    }
}

// =================================================================================================
// Candidates and selection
// =================================================================================================

/// Result of integrating the duct at one swept frequency
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyCandidate {
    /// Angular frequency (rad/s)
    pub omega: f64,
    /// P at the open end
    pub terminal_pressure: f64,
    /// P at every node
    pub pressure: DVector<f64>,
    /// Z = dP/dx at every node
    pub gradient: DVector<f64>,
    /// Peaks of |P|
    pub peaks: PeakReport,
}

impl FrequencyCandidate {
    /// Number of |P| peaks
    pub fn peak_count(&self) -> usize {
        self.peaks.count()
    }

    /// |P(L)|
    pub fn residual(&self) -> f64 {
        self.terminal_pressure.abs()
    }
}

/// Whether the selected candidate has the expected number of peaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuality {
    /// At least one candidate had exactly the expected peak count
    Exact,
    /// No candidate had the expected peak count; best residual over the whole sweep
    Fallback,
}

/// Candidates with exactly `expected` peaks, in sweep order
pub fn filter_by_peak_count(candidates: &[FrequencyCandidate], expected: usize) -> Vec<&FrequencyCandidate> {
    candidates
        .iter()
        .filter(|candidate| candidate.peak_count() == expected)
        .collect()
}

/// Candidate with the smallest |P(L)|
///
/// Ties resolve to the earliest candidate. A NaN residual only wins when
/// every residual is NaN. `None` for an empty input.
pub fn select_min_residual<'a, I>(candidates: I) -> Option<&'a FrequencyCandidate>
where
    I: IntoIterator<Item = &'a FrequencyCandidate>,
{
    let mut best: Option<&FrequencyCandidate> = None;

    for candidate in candidates {
        let improves = match best {
            Some(current) => {
                candidate.residual() < current.residual()
                    || (current.residual().is_nan() && !candidate.residual().is_nan())
            }
            None => true,
        };
        if improves {
            best = Some(candidate);
        }
    }

    best
}

/// Two-stage selection: exact peak count first, whole sweep as fallback
pub fn select_candidate(
    candidates: &[FrequencyCandidate],
    expected: usize,
) -> Option<(&FrequencyCandidate, MatchQuality)> {
    if let Some(best) = select_min_residual(filter_by_peak_count(candidates, expected)) {
        return Some((best, MatchQuality::Exact));
    }

    select_min_residual(candidates).map(|best| (best, MatchQuality::Fallback))
}

// =================================================================================================
// Mode Solution
// =================================================================================================

/// Selected resonance for one (mode, profile) pair
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSolution {
    /// Requested mode
    pub target_mode: usize,
    /// Temperature field (and grid) the mode was computed on
    pub field: TemperatureField,
    /// P at every node
    pub pressure: DVector<f64>,
    /// Z = dP/dx at every node
    pub gradient: DVector<f64>,
    /// Resonant angular frequency (rad/s)
    pub omega: f64,
    /// P at the open end
    pub terminal_pressure: f64,
    /// Peaks of |P| for the selected frequency
    pub peak_indices: Vec<usize>,
    /// Exact peak-count match or fallback
    pub match_quality: MatchQuality,
}

impl ModeSolution {
    /// Axial grid
    pub fn grid(&self) -> &SpatialGrid {
        self.field.grid()
    }

    /// Temperature profile
    pub fn profile(&self) -> &TemperatureProfile {
        self.field.profile()
    }

    /// Number of |P| peaks
    pub fn peak_count(&self) -> usize {
        self.peak_indices.len()
    }

    /// False when the solver fell back to the unfiltered sweep
    pub fn is_exact(&self) -> bool {
        self.match_quality == MatchQuality::Exact
    }

    /// Resonant frequency in Hz
    pub fn frequency_hz(&self) -> f64 {
        self.omega / (2.0 * PI)
    }

    /// |P| at every node (Pa)
    pub fn pressure_magnitude(&self) -> DVector<f64> {
        self.pressure.abs()
    }

    /// Acoustic velocity amplitude |u| = |Z / (ω·ρ)| at every node (m/s)
    ///
    /// From the linearised momentum equation iωρu = -dP/dx, with the density
    /// ρ = p̄ / (R·T) taken from the local temperature.
    pub fn velocity_amplitude(&self, config: &DuctConfiguration) -> DVector<f64> {
        DVector::from_fn(self.gradient.len(), |i, _| {
            let density = config.density(self.field.temperature(i));
            (-self.gradient[i] / (self.omega * density)).abs()
        })
    }
}

// =================================================================================================
// Mode Shooter
// =================================================================================================

/// Frequency-sweep eigenmode solver
///
/// Holds only an immutable configuration; every call is independent.
///
/// # Example
///
/// ```rust
/// use duct_rs::physics::{DuctConfiguration, TemperatureProfile};
/// use duct_rs::solver::ModeShooter;
///
/// # fn main() -> Result<(), duct_rs::solver::ModeError> {
/// let shooter = ModeShooter::new(DuctConfiguration::default())?;
/// let solution = shooter.solve(1, &TemperatureProfile::from_index(0)?)?;
///
/// assert_eq!(solution.peak_count(), 1);
/// assert!(solution.is_exact());
/// println!("f = {:.2} Hz", solution.frequency_hz());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModeShooter {
    config: DuctConfiguration,
    integrator: RK4Integrator,
}

impl ModeShooter {
    /// Create a shooter after validating `config`
    pub fn new(config: DuctConfiguration) -> Result<Self, ModeError> {
        config.validate()?;

        Ok(Self {
            config,
            integrator: RK4Integrator::new(),
        })
    }

    /// Configuration in use
    pub fn configuration(&self) -> &DuctConfiguration {
        &self.config
    }

    /// Sweep bounds used for `mode` on `field`
    pub fn sweep_for(&self, mode: usize, field: &TemperatureField) -> FrequencySweep {
        FrequencySweep::for_mode(
            mode,
            field.mean_sound_speed(),
            self.config.length,
            self.config.sweep_points,
        )
    }

    /// Every candidate of the sweep for (`mode`, `profile`), in frequency order
    pub fn sweep(&self, mode: usize, profile: &TemperatureProfile) -> Result<Vec<FrequencyCandidate>, ModeError> {
        check_mode(mode)?;
        let field = TemperatureField::build(profile, &self.config)?;
        let sweep = self.sweep_for(mode, &field);

        Ok(self.run_sweep(&field, &sweep))
    }

    /// Solve one mode
    ///
    /// # Errors
    ///
    /// - [`ModeError::UnsupportedMode`] if `target_mode > 3`
    /// - [`ModeError::NonPhysicalTemperature`] if the profile reaches T ≤ 0 on the duct
    pub fn solve(&self, target_mode: usize, profile: &TemperatureProfile) -> Result<ModeSolution, ModeError> {
        check_mode(target_mode)?;
        let field = TemperatureField::build(profile, &self.config)?;
        let sweep = self.sweep_for(target_mode, &field);

        tracing::debug!(
            target_mode,
            profile = %profile,
            mean_sound_speed = field.mean_sound_speed(),
            lower = sweep.lower,
            upper = sweep.upper,
            points = sweep.points,
            "starting frequency sweep"
        );

        let candidates = self.run_sweep(&field, &sweep);
        let expected = expected_peak_count(target_mode);

        let (best, match_quality) = select_candidate(&candidates, expected).ok_or_else(|| {
            ModeError::InvalidConfiguration("frequency sweep produced no candidate".to_string())
        })?;

        match match_quality {
            MatchQuality::Exact => tracing::debug!(
                target_mode,
                profile = %profile,
                omega = best.omega,
                residual = best.residual(),
                "selected exact mode"
            ),
            MatchQuality::Fallback => tracing::warn!(
                target_mode,
                profile = %profile,
                expected_peaks = expected,
                omega = best.omega,
                peaks = best.peak_count(),
                "no candidate with the expected peak count, falling back to minimum residual"
            ),
        }

        Ok(ModeSolution {
            target_mode,
            pressure: best.pressure.clone(),
            gradient: best.gradient.clone(),
            omega: best.omega,
            terminal_pressure: best.terminal_pressure,
            peak_indices: best.peaks.indices.clone(),
            match_quality,
            field,
        })
    }

    /// Solve modes 0..=3 for one profile
    pub fn solve_all(&self, profile: &TemperatureProfile) -> Result<Vec<ModeSolution>, ModeError> {
        (0..=MAX_TARGET_MODE)
            .map(|mode| self.solve(mode, profile))
            .collect()
    }

    fn run_sweep(&self, field: &TemperatureField, sweep: &FrequencySweep) -> Vec<FrequencyCandidate> {
        let system = AcousticOdeSystem::new(field, &self.config);
        let classifier = PeakClassifier::from_configuration(&self.config);
        let initial = AcousticState::new(self.config.initial_pressure, 0.0);

        let evaluate = |index: usize| self.evaluate(&system, &classifier, initial, sweep.frequency(index));

        // Work is proportional to frequencies × nodes
        let work = sweep.points * system.points();

        #[cfg(feature = "parallel")]
        {
            if work > self.config.parallel_threshold {
                use rayon::prelude::*;

                // collect() keeps sweep order
                return (0..sweep.points).into_par_iter().map(evaluate).collect();
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = work;

        (0..sweep.points).map(evaluate).collect()
    }

    fn evaluate(
        &self,
        system: &AcousticOdeSystem<'_>,
        classifier: &PeakClassifier,
        initial: AcousticState,
        omega: f64,
    ) -> FrequencyCandidate {
        let trajectory = self.integrator.integrate(system, omega, initial);
        let peaks = classifier.classify(trajectory.pressure_magnitude().as_slice());
        let terminal_pressure = trajectory.terminal_pressure();

        tracing::trace!(omega, terminal_pressure, peaks = peaks.count(), "candidate");

        let (pressure, gradient) = trajectory.into_parts();

        FrequencyCandidate {
            omega,
            terminal_pressure,
            pressure,
            gradient,
            peaks,
        }
    }
}

/// Solve `target_mode` for `profile` with the default dry-air, 4 m configuration
pub fn solve_mode(target_mode: usize, profile: &TemperatureProfile) -> Result<ModeSolution, ModeError> {
    ModeShooter::new(DuctConfiguration::default())?.solve(target_mode, profile)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(omega: f64, terminal_pressure: f64, peaks: Vec<usize>) -> FrequencyCandidate {
        FrequencyCandidate {
            omega,
            terminal_pressure,
            pressure: DVector::zeros(3),
            gradient: DVector::zeros(3),
            peaks: PeakReport { indices: peaks },
        }
    }

    #[test]
    fn test_expected_peak_count() {
        assert_eq!(expected_peak_count(0), 0);
        assert_eq!(expected_peak_count(1), 1);
        assert_eq!(expected_peak_count(3), 3);
    }

    #[test]
    fn test_mode_zero_sweep_bounds() {
        let sweep = FrequencySweep::for_mode(0, 350.0, 4.0, 300);
        let guess = 0.1 * PI * 350.0 / 4.0;

        assert!((sweep.lower - 0.01 * guess).abs() < 1e-12);
        assert!((sweep.upper - 10.0 * guess).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_is_evenly_spaced_and_inclusive() {
        let sweep = FrequencySweep::for_mode(2, 400.0, 4.0, 300);
        let frequencies: Vec<f64> = sweep.frequencies().collect();

        assert_eq!(frequencies.len(), 300);
        assert_eq!(frequencies[0], sweep.lower);
        assert_eq!(frequencies[299], sweep.upper);
        for pair in frequencies.windows(2) {
            assert!((pair[1] - pair[0] - sweep.spacing()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_sweeps_do_not_panic() {
        let empty = FrequencySweep::for_mode(1, 340.0, 4.0, 0);
        assert_eq!(empty.spacing(), empty.upper - empty.lower);
        assert_eq!(empty.frequencies().count(), 0);

        let single = FrequencySweep::for_mode(1, 340.0, 4.0, 1);
        let frequencies: Vec<f64> = single.frequencies().collect();
        assert_eq!(frequencies, vec![single.upper]);
    }

    #[test]
    fn test_filter_keeps_sweep_order() {
        let candidates = vec![
            candidate(1.0, 5.0, vec![3]),
            candidate(2.0, 1.0, vec![]),
            candidate(3.0, 2.0, vec![7]),
        ];

        let filtered = filter_by_peak_count(&candidates, 1);
        let omegas: Vec<f64> = filtered.iter().map(|c| c.omega).collect();
        assert_eq!(omegas, vec![1.0, 3.0]);
    }

    #[test]
    fn test_select_min_residual_uses_absolute_value() {
        let candidates = vec![
            candidate(1.0, 5.0, vec![]),
            candidate(2.0, -0.5, vec![]),
            candidate(3.0, 1.0, vec![]),
        ];

        assert_eq!(select_min_residual(&candidates).unwrap().omega, 2.0);
    }

    #[test]
    fn test_select_min_residual_ties_pick_first() {
        let candidates = vec![candidate(1.0, -2.0, vec![]), candidate(2.0, 2.0, vec![])];
        assert_eq!(select_min_residual(&candidates).unwrap().omega, 1.0);
    }

    #[test]
    fn test_select_min_residual_skips_nan() {
        let candidates = vec![
            candidate(1.0, f64::NAN, vec![]),
            candidate(2.0, 30.0, vec![]),
            candidate(3.0, f64::NAN, vec![]),
        ];
        assert_eq!(select_min_residual(&candidates).unwrap().omega, 2.0);
    }

    #[test]
    fn test_select_min_residual_empty() {
        let candidates: Vec<FrequencyCandidate> = Vec::new();
        assert!(select_min_residual(&candidates).is_none());
    }

    #[test]
    fn test_select_candidate_prefers_exact_match() {
        // The global minimum residual has the wrong peak count
        let candidates = vec![
            candidate(1.0, 0.001, vec![]),
            candidate(2.0, 40.0, vec![5]),
            candidate(3.0, 10.0, vec![9]),
        ];

        let (best, quality) = select_candidate(&candidates, 1).unwrap();
        assert_eq!(best.omega, 3.0);
        assert_eq!(quality, MatchQuality::Exact);
    }

    #[test]
    fn test_select_candidate_falls_back_to_whole_sweep() {
        let candidates = vec![
            candidate(1.0, 3.0, vec![]),
            candidate(2.0, 0.2, vec![4, 8]),
            candidate(3.0, 1.0, vec![]),
        ];

        let (best, quality) = select_candidate(&candidates, 1).unwrap();
        assert_eq!(best.omega, 2.0);
        assert_eq!(quality, MatchQuality::Fallback);
    }

    #[test]
    fn test_unsupported_mode_is_rejected_before_anything_else() {
        let shooter = ModeShooter::new(DuctConfiguration::default()).unwrap();
        // Non-physical profile too: the mode check comes first
        let err = shooter.solve(4, &TemperatureProfile::new(100.0, -100.0)).unwrap_err();

        assert_eq!(err, ModeError::UnsupportedMode { mode: 4, max: 3 });
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let config = DuctConfiguration::default().with_sweep_points(0);
        assert!(ModeShooter::new(config).unwrap_err().is_configuration_error());
    }

    #[test]
    fn test_domain_error_for_non_physical_profile() {
        let err = solve_mode(1, &TemperatureProfile::new(300.0, -100.0)).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_sweep_returns_every_candidate() {
        let shooter = ModeShooter::new(DuctConfiguration::default().with_sweep_points(25)).unwrap();
        let candidates = shooter.sweep(1, &TemperatureProfile::from_index(0).unwrap()).unwrap();

        assert_eq!(candidates.len(), 25);
        assert!(candidates.windows(2).all(|w| w[0].omega < w[1].omega));
        assert!(candidates.iter().all(|c| c.pressure.len() == 41 && c.gradient.len() == 41));
        assert!(candidates.iter().all(|c| c.terminal_pressure == c.pressure[40]));
    }

    #[test]
    fn test_uniform_duct_fundamental() {
        // Closed-open uniform duct: P = P₀·cos(kx), first zero of P(L) at kL = π/2
        let solution = solve_mode(0, &TemperatureProfile::from_index(0).unwrap()).unwrap();
        let c = (1.4_f64 * 287.2 * 300.0).sqrt();
        let quarter_wave = PI * c / (2.0 * 4.0);

        assert!(solution.is_exact());
        assert_eq!(solution.peak_count(), 0);
        assert!((solution.omega - quarter_wave).abs() < 2.0);
    }

    #[test]
    fn test_uniform_duct_first_mode() {
        let solution = solve_mode(1, &TemperatureProfile::from_index(0).unwrap()).unwrap();
        let c = (1.4_f64 * 287.2 * 300.0).sqrt();
        let three_quarter_wave = 3.0 * PI * c / (2.0 * 4.0);

        assert!(solution.is_exact());
        assert_eq!(solution.peak_count(), 1);
        assert!((solution.omega - three_quarter_wave).abs() < 3.0);
    }

    #[test]
    fn test_frequency_hz() {
        let solution = solve_mode(1, &TemperatureProfile::from_index(0).unwrap()).unwrap();
        assert!((solution.frequency_hz() * 2.0 * PI - solution.omega).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_amplitude_vanishes_at_closed_end() {
        let config = DuctConfiguration::default();
        let solution = solve_mode(2, &TemperatureProfile::from_index(3).unwrap()).unwrap();
        let velocity = solution.velocity_amplitude(&config);

        assert_eq!(velocity.len(), 41);
        assert_eq!(velocity[0], 0.0);
        assert!(velocity.iter().all(|u| u.is_finite() && *u >= 0.0));
    }

    #[test]
    fn test_solve_all_returns_four_modes() {
        let shooter = ModeShooter::new(DuctConfiguration::default()).unwrap();
        let solutions = shooter.solve_all(&TemperatureProfile::from_index(0).unwrap()).unwrap();

        let modes: Vec<usize> = solutions.iter().map(|s| s.target_mode).collect();
        assert_eq!(modes, vec![0, 1, 2, 3]);
        assert!(solutions.windows(2).all(|w| w[0].omega < w[1].omega));
    }
}
