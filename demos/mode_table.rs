//! Example: Acoustic modes of a heated duct
//!
//! Solves modes 0 to 3 for every tabulated temperature profile and prints
//! the resonant frequencies. A duct closed at x = 0 and open at x = 4 m,
//! filled with air.
//!
//! **Parameters**:
//! - γ = 1.4, R = 287.2 J/(kg·K)
//! - L = 4 m, dx = 0.1 m (41 nodes)
//! - P₀ = 2000 Pa at the closed end
//! - 300 candidate frequencies per mode
//!
//! Pass a directory as first argument to also write one CSV file per mode
//! plus a frequency table:
//!
//! ```bash
//! RUST_LOG=duct_rs=debug cargo run --example mode_table -- /tmp/duct
//! ```

use duct_rs::{
    output::{CsvExporter, Exporter},
    physics::{DuctConfiguration, TemperatureProfile},
    solver::{MAX_TARGET_MODE, ModeShooter},
};

use std::path::PathBuf;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duct_rs=info")))
        .init();

    println!("═══════════════════════════════════════════════════════");
    println!("  Duct Acoustic Modes - Linear Temperature Profiles");
    println!("═══════════════════════════════════════════════════════\n");

    let config = DuctConfiguration::default();
    let output_dir = std::env::args().nth(1).map(PathBuf::from);

    println!("Configuration:");
    println!("  γ (gamma)      : {}", config.gamma);
    println!("  R (gas const.) : {} J/(kg·K)", config.gas_constant);
    println!("  L (length)     : {} m", config.length);
    println!("  dx (step)      : {} m", config.dx);
    println!("  nodes          : {}", config.grid_points());
    println!("  P₀             : {} Pa", config.initial_pressure);
    println!("  sweep points   : {}\n", config.sweep_points);

    // ====== Solve ======

    let shooter = ModeShooter::new(config)?;
    let exporter = CsvExporter::default();

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)?;
    }

    println!(
        "{:<20} {:>4} {:>12} {:>10} {:>14} {:>5}  {}",
        "profile", "mode", "ω (rad/s)", "f (Hz)", "P(L) (Pa)", "peaks", "match"
    );
    println!("{}", "─".repeat(80));

    let start = Instant::now();
    let mut all_solutions = Vec::new();

    for (index, profile) in TemperatureProfile::table().enumerate() {
        let solutions = shooter.solve_all(&profile)?;

        for solution in &solutions {
            println!(
                "{:<20} {:>4} {:>12.3} {:>10.3} {:>14.4e} {:>5}  {}",
                profile.label(),
                solution.target_mode,
                solution.omega,
                solution.frequency_hz(),
                solution.terminal_pressure,
                solution.peak_count(),
                if solution.is_exact() { "exact" } else { "fallback" }
            );

            if let Some(dir) = &output_dir {
                let path = dir.join(format!("profile_{}_mode_{}.csv", index, solution.target_mode));
                exporter.export_mode(solution, &config, &path)?;
            }
        }

        all_solutions.extend(solutions);
    }

    let elapsed = start.elapsed();
    let solves = all_solutions.len();

    println!("{}", "─".repeat(80));
    println!(
        "\n{} solves ({} profiles × {} modes) in {:.2?}",
        solves,
        solves / (MAX_TARGET_MODE + 1),
        MAX_TARGET_MODE + 1,
        elapsed
    );

    let fallbacks = all_solutions.iter().filter(|s| !s.is_exact()).count();
    if fallbacks > 0 {
        println!("{} solve(s) fell back to the minimum residual over the full sweep", fallbacks);
    }

    if let Some(dir) = &output_dir {
        let table = dir.join("frequencies.csv");
        exporter.export_frequency_table(&all_solutions, &table)?;
        println!("\nCSV files written to {}", dir.display());
    }

    Ok(())
}
