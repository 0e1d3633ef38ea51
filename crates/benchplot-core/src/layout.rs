// SPDX-License-Identifier: MIT OR Apache-2.0
//! Storage-layout parameters and footprint formulas
//!
//! Benchmark variant names encode their storage layout textually, e.g.
//! `xpy-1-u32x2` (two `u32` words per logical element) or
//! `maxelem-1-mi<31, u64>` (values packed into one `u64` word). Promoted/
//! reduced runs use a two-width form, `promred-1-u8-u16x2` and
//! `promred-1-mi<3-7, u8-u16>`. [`Layout::parse`] extracts those
//! parameters once, at the edge, into explicit fields; all footprint
//! arithmetic happens on the typed values, and the name string stays a
//! display label.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BenchError, Result};

/// Bits per binary gigabyte, the unit all footprints are expressed in
pub const BITS_PER_GB: f64 = 8.0 * 1024.0 * 1024.0 * 1024.0;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-u(\d+)x(\d+)").expect("hard-coded regex"));
static WORD_PROMRED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-u(\d+)-u(\d+)x(\d+)").expect("hard-coded regex"));
static PACKED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-mi<\d+, u(\d+)>").expect("hard-coded regex"));
static PACKED_PROMRED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-mi<\d+-\d+, u(\d+)-u(\d+)>").expect("hard-coded regex"));

/// Which width-encoding family an input file uses
///
/// Decided once per file from the file-stem prefix convention and passed
/// down explicitly; nothing re-derives it from names mid-pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Single storage width per variant
    Fixed,
    /// Two-tier promoted/reduced width pair per variant
    PromotedReduced,
}

impl Mode {
    /// File-stem prefix marking promoted/reduced result files
    pub const PROMRED_PREFIX: &'static str = "promred-";

    /// Detect the mode from an input file stem
    #[must_use]
    pub fn from_file_stem(stem: &str) -> Self {
        if stem.starts_with(Self::PROMRED_PREFIX) {
            Self::PromotedReduced
        } else {
            Self::Fixed
        }
    }
}

/// Storage-layout parameters extracted from a variant name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One or more whole words per element: `-u<bits>x<count>`
    Word {
        /// Bit width of one storage word
        storage_bits: u32,
        /// Words per logical element
        int_count: u32,
    },
    /// Promoted/reduced word pair: `-u<small>-u<large>x<count>`
    WordPromoted {
        /// Bit width of the reduced (bulk) tier
        small_bits: u32,
        /// Bit width of the promoted tier, paid once per series
        large_bits: u32,
        /// Words per logical element
        int_count: u32,
    },
    /// Multiple values packed into one word: `-mi<…, u<bits>>`
    Packed {
        /// Bit width of the packing word
        storage_bits: u32,
    },
    /// Promoted/reduced packed pair: `-mi<…-…, u<small>-u<large>>`
    PackedPromoted {
        /// Bit width of the reduced (bulk) packing word
        small_bits: u32,
        /// Bit width of the promoted word, paid once per series
        large_bits: u32,
    },
}

impl Layout {
    /// Extract layout parameters from a variant name
    ///
    /// Names containing `>` belong to the packed family, everything else
    /// to the word family; `mode` selects the single-width or the
    /// promoted/reduced pattern within the family.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::UnrecognizedLayout`] when the name matches no
    /// pattern of its family under the given mode.
    pub fn parse(name: &str, mode: Mode) -> Result<Self> {
        let unrecognized = || BenchError::UnrecognizedLayout {
            name: name.to_string(),
        };

        if name.contains('>') {
            match mode {
                Mode::Fixed => {
                    let caps = PACKED_RE.captures(name).ok_or_else(unrecognized)?;
                    Ok(Self::Packed {
                        storage_bits: parse_capture(&caps, 1).ok_or_else(unrecognized)?,
                    })
                }
                Mode::PromotedReduced => {
                    let caps = PACKED_PROMRED_RE.captures(name).ok_or_else(unrecognized)?;
                    Ok(Self::PackedPromoted {
                        small_bits: parse_capture(&caps, 1).ok_or_else(unrecognized)?,
                        large_bits: parse_capture(&caps, 2).ok_or_else(unrecognized)?,
                    })
                }
            }
        } else {
            match mode {
                Mode::Fixed => {
                    let caps = WORD_RE.captures(name).ok_or_else(unrecognized)?;
                    Ok(Self::Word {
                        storage_bits: parse_capture(&caps, 1).ok_or_else(unrecognized)?,
                        int_count: parse_capture(&caps, 2).ok_or_else(unrecognized)?,
                    })
                }
                Mode::PromotedReduced => {
                    let caps = WORD_PROMRED_RE.captures(name).ok_or_else(unrecognized)?;
                    Ok(Self::WordPromoted {
                        small_bits: parse_capture(&caps, 1).ok_or_else(unrecognized)?,
                        large_bits: parse_capture(&caps, 2).ok_or_else(unrecognized)?,
                        int_count: parse_capture(&caps, 3).ok_or_else(unrecognized)?,
                    })
                }
            }
        }
    }

    /// Theoretical memory footprint in binary gigabytes for `n_elements`
    ///
    /// The promoted tier's `large_bits` is a one-time overhead per series,
    /// added once rather than per element.
    #[must_use]
    pub fn footprint_gb(&self, n_elements: u64) -> f64 {
        let n = n_elements as f64;
        match *self {
            Self::Word {
                storage_bits,
                int_count,
            } => f64::from(storage_bits) * f64::from(int_count) * n / BITS_PER_GB,
            Self::WordPromoted {
                small_bits,
                large_bits,
                int_count,
            } => {
                (f64::from(small_bits) * n * f64::from(int_count) + f64::from(large_bits))
                    / BITS_PER_GB
            }
            Self::Packed { storage_bits } => f64::from(storage_bits) * n / BITS_PER_GB,
            Self::PackedPromoted {
                small_bits,
                large_bits,
            } => (f64::from(small_bits) * n + f64::from(large_bits)) / BITS_PER_GB,
        }
    }
}

// Captured text is all digits; None only on u32 overflow.
fn parse_capture(caps: &regex::Captures<'_>, group: usize) -> Option<u32> {
    caps[group].parse().ok()
}
