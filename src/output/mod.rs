//! Output module for mode solutions
//!
//! Tabular data export for external analysis and plotting tools. Rendering
//! figures is left to the consumer of the exported files.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait
//!     └── csv.rs          ← CSV implementation
//! ```

pub mod export;

pub use export::{CsvConfig, CsvError, CsvExporter, Exporter};
