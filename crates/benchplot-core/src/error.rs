// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for benchplot operations

use std::path::PathBuf;

/// Convenience alias for results produced by this crate
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors raised while loading, deriving, or reshaping benchmark results
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Result file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Input was not valid JSON even after truncation repair
    #[error("result file is not parseable JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Benchmark name carried no element-count suffix, or a non-numeric one
    #[error("benchmark name {name:?} has no valid element count")]
    BadElementCount {
        /// The offending compound benchmark name
        name: String,
    },

    /// Variant name matches none of the known layout encodings
    #[error("benchmark name {name:?} encodes no recognized storage layout")]
    UnrecognizedLayout {
        /// The offending variant name
        name: String,
    },

    /// Two rows share (variant, element count) under one statistic kind
    #[error("duplicate observation for {variant:?} at n_elements = {n_elements} ({stat})")]
    DuplicateObservation {
        /// Variant name of the colliding rows
        variant: String,
        /// Element count of the colliding rows
        n_elements: u64,
        /// Statistic kind under which the collision occurred
        stat: String,
    },

    /// An operation that needs at least one row was given an empty table
    #[error("metric table is empty")]
    EmptyTable,
}
