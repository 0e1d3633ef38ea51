// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types and computations for benchplot
//!
//! This crate turns Google-Benchmark-style JSON result files into tables
//! of derived metrics ready for plotting:
//!
//! - [`loader`] - Result-file reading, truncation repair, and parsing
//! - [`layout`] - Storage-layout parameters encoded in benchmark names
//! - [`metrics`] - Bandwidth and timing metric derivation
//! - [`table`] - Long-form rows and the wide pivot table
//! - [`model`] - Closed-form memory-footprint model
//! - [`error`] - Error types and Result alias

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

/// Error types for benchplot operations
pub mod error;
/// Storage-layout parameters and footprint formulas
pub mod layout;
/// Result-file loading and truncation repair
pub mod loader;
/// Derived metric computation
pub mod metrics;
/// Closed-form memory-footprint model
pub mod model;
/// Long-form rows and wide pivot tables
pub mod table;

// Re-exports for convenience
pub use error::{BenchError, Result};
pub use layout::{BITS_PER_GB, Layout, Mode};
pub use loader::{Observation, Statistic, load_results, parse_results};
pub use metrics::{BANDWIDTH_UNIT, TIMING_UNIT, bandwidth_rows, timing_rows};
pub use model::{DATA_WIDTHS, ModelComparison, ModelCurve, model_curves};
pub use table::{MetricRow, WideTable};
