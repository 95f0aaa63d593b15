//! Performance benchmarks for the mode solver
//!
//! # What We're Measuring
//!
//! 1. **Single integration**: one RK4 pass over the duct at a fixed ω.
//!    This is the unit of work of the sweep (4 derivative evaluations per
//!    step, 40 steps on the default grid).
//!
//! 2. **Full solve per mode**: 300 integrations + peak classification +
//!    selection. Should be ≈ 300× a single integration.
//!
//! 3. **Sequential vs parallel sweep**: the same solve with the rayon path
//!    forced off and on through `DuctConfiguration::parallel_threshold`.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench --bench solver_performance
//!
//! # Run only the single integration group
//! cargo bench --bench solver_performance integration
//!
//! # Sequential vs parallel
//! cargo bench --bench solver_performance sweep
//! ```
//!
//! # Understanding Results
//!
//! ```text
//! RK4 integration/41
//!   Time: [1.10 µs 1.12 µs 1.14 µs]
//!
//! Mode solve/1
//!   Time: [340 µs 345 µs 350 µs]
//!
//! Ratio: 345 / 1.12 ≈ 308 ≈ 300 sweep points (expected!)
//! ```
//!
//! A ratio far above 300 points at allocation or classification overhead.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use duct_rs::physics::{AcousticOdeSystem, AcousticState, DuctConfiguration, TemperatureField, TemperatureProfile};
use duct_rs::solver::{ModeShooter, RK4Integrator};

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// One RK4 pass for increasingly fine grids
///
/// Time should scale linearly with the number of nodes.
fn benchmark_rk4_integration(c: &mut Criterion) {
    let mut group = c.benchmark_group("RK4 integration");
    let profile = TemperatureProfile::from_index(3).expect("profile 3 exists");

    for dx in [0.1, 0.05, 0.01] {
        let config = DuctConfiguration::default().with_dx(dx);
        let field = TemperatureField::build(&profile, &config).expect("profile is physical");
        let system = AcousticOdeSystem::new(&field, &config);
        let integrator = RK4Integrator::new();
        let initial = AcousticState::new(config.initial_pressure, 0.0);

        group.throughput(Throughput::Elements(field.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(field.len()), &system, |b, system| {
            b.iter(|| integrator.integrate(black_box(system), black_box(400.0), initial));
        });
    }

    group.finish();
}

/// Full solve for each target mode on the steepest tabulated profile
fn benchmark_mode_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mode solve");
    let shooter = ModeShooter::new(DuctConfiguration::default()).expect("default configuration is valid");
    let profile = TemperatureProfile::from_index(3).expect("profile 3 exists");

    for mode in 0..=3usize {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            b.iter(|| shooter.solve(black_box(mode), black_box(&profile)).unwrap());
        });
    }

    group.finish();
}

/// Sequential vs parallel sweep
///
/// The default grid is small (300 × 41 work units), so the parallel path
/// only pays off on finer grids. Both grids are measured.
fn benchmark_sweep_parallelism(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sweep");
    let profile = TemperatureProfile::from_index(1).expect("profile 1 exists");

    for (dx, label) in [(0.1, "default grid"), (0.01, "fine grid")] {
        let config = DuctConfiguration::default().with_dx(dx);
        let sequential = ModeShooter::new(config.with_parallel_threshold(usize::MAX)).expect("configuration is valid");
        let parallel = ModeShooter::new(config.with_parallel_threshold(1)).expect("configuration is valid");

        group.bench_function(format!("sequential {}", label), |b| {
            b.iter(|| sequential.solve(black_box(2), black_box(&profile)).unwrap());
        });

        group.bench_function(format!("parallel {}", label), |b| {
            b.iter(|| parallel.solve(black_box(2), black_box(&profile)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_rk4_integration,
    benchmark_mode_solve,
    benchmark_sweep_parallelism
);
criterion_main!(benches);
