// SPDX-License-Identifier: MIT OR Apache-2.0
//! Long-form rows and wide pivot tables
//!
//! Derived metrics start as long-form [`MetricRow`]s, one per observation.
//! [`WideTable::pivot`] reshapes them for plotting: element counts become
//! the sorted row index, variant names become columns. A mean table and a
//! stddev table built from the same rows are structurally aligned, so the
//! latter can supply error bars for the former.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{BenchError, Result};
use crate::loader::Statistic;

/// One derived-metric value in long form
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    /// Variant name
    pub variant: String,
    /// Problem-size parameter
    pub n_elements: u64,
    /// Repetition-aggregate kind
    pub stat: Statistic,
    /// The metric value
    pub value: f64,
}

/// Pivoted metric table: element counts down, variants across
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    index: Vec<u64>,
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl WideTable {
    /// Pivot the rows of one statistic kind into wide form
    ///
    /// The index is the sorted set of distinct element counts, the columns
    /// the sorted set of distinct variant names. Cells without a matching
    /// row stay empty.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::DuplicateObservation`] when two rows share
    /// (variant, element count) under `stat`.
    pub fn pivot(rows: &[MetricRow], stat: &Statistic) -> Result<Self> {
        let selected: Vec<&MetricRow> = rows.iter().filter(|r| r.stat == *stat).collect();

        let index: Vec<u64> = selected
            .iter()
            .map(|r| r.n_elements)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let columns: Vec<String> = selected
            .iter()
            .map(|r| r.variant.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let row_of: BTreeMap<u64, usize> =
            index.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        let col_of: BTreeMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut values = vec![vec![None; columns.len()]; index.len()];
        for row in selected {
            let i = row_of[&row.n_elements];
            let j = col_of[row.variant.as_str()];
            if values[i][j].is_some() {
                return Err(BenchError::DuplicateObservation {
                    variant: row.variant.clone(),
                    n_elements: row.n_elements,
                    stat: stat.to_string(),
                });
            }
            values[i][j] = Some(row.value);
        }

        Ok(Self {
            index,
            columns,
            values,
        })
    }

    /// Sorted element counts forming the row index
    #[must_use]
    pub fn index(&self) -> &[u64] {
        &self.index
    }

    /// Sorted variant names forming the columns
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// True when the table holds no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Cell by positional row/column
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Cell by element count and variant name
    #[must_use]
    pub fn get(&self, n_elements: u64, column: &str) -> Option<f64> {
        let row = self.index.iter().position(|&n| n == n_elements)?;
        let col = self.columns.iter().position(|c| c == column)?;
        self.cell(row, col)
    }

    /// (element count, value) pairs of one column, skipping empty cells
    #[must_use]
    pub fn column_points(&self, col: usize) -> Vec<(u64, f64)> {
        self.index
            .iter()
            .zip(&self.values)
            .filter_map(|(&n, row)| row.get(col).copied().flatten().map(|v| (n, v)))
            .collect()
    }

    /// The row at the maximum element count, for the bar chart
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::EmptyTable`] when there are no rows.
    pub fn last_row(&self) -> Result<(u64, &[Option<f64>])> {
        match (self.index.last(), self.values.last()) {
            (Some(&n), Some(row)) => Ok((n, row)),
            _ => Err(BenchError::EmptyTable),
        }
    }

    /// Flatten back to (variant, element count, value) triples
    ///
    /// Inverse of [`WideTable::pivot`] for the cells that are present.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, u64, f64)> {
        let mut out = Vec::new();
        for (i, &n) in self.index.iter().enumerate() {
            for (j, column) in self.columns.iter().enumerate() {
                if let Some(value) = self.cell(i, j) {
                    out.push((column.clone(), n, value));
                }
            }
        }
        out
    }

    /// True when `other` has the same index and columns
    ///
    /// Error-bar pairing requires the stddev table to align with the mean
    /// table cell for cell.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.index == other.index && self.columns == other.columns
    }
}
