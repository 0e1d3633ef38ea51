// SPDX-License-Identifier: MIT OR Apache-2.0
//! Closed-form memory-footprint model
//!
//! Compares two storage layouts without any measured input: packing
//! several small integers into one storage word versus storing each in its
//! own word. The packed representation's cost is width-driven, so its
//! footprint is independent of how many integers share the word; the
//! unpacked cost grows linearly with the count.

use crate::layout::BITS_PER_GB;

/// Storage word widths the model is evaluated for
pub const DATA_WIDTHS: [u32; 4] = [8, 16, 32, 64];

/// Exponent bounds of the element-count grid, `2^14 ..= 2^29`
pub const GRID_EXPONENTS: std::ops::RangeInclusive<u32> = 14..=29;

/// One labeled footprint curve over the element grid
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCurve {
    /// Display label of the curve
    pub label: String,
    /// (element count, footprint in GB) samples
    pub points: Vec<(u64, f64)>,
}

/// Both curve families for one data width
#[derive(Debug, Clone, PartialEq)]
pub struct ModelComparison {
    /// Storage word width in bits
    pub data_width: u32,
    /// Packed-layout curves, one per feasible integer count
    pub packed: Vec<ModelCurve>,
    /// Unpacked-layout curves, one per feasible integer count
    pub unpacked: Vec<ModelCurve>,
}

/// Log-scale grid of element counts the model is sampled on
#[must_use]
pub fn element_grid() -> Vec<u64> {
    GRID_EXPONENTS.map(|p| 1u64 << p).collect()
}

/// Footprint of the packed layout in GB
///
/// Width-driven: the count of sub-integers sharing the word does not
/// appear.
#[must_use]
pub fn packed_footprint_gb(storage_bits: u32, n_elements: u64) -> f64 {
    f64::from(storage_bits) * n_elements as f64 / BITS_PER_GB
}

/// Footprint of the unpacked layout in GB, one word per integer
#[must_use]
pub fn unpacked_footprint_gb(int_count: u32, storage_bits: u32, n_elements: u64) -> f64 {
    f64::from(int_count) * f64::from(storage_bits) * n_elements as f64 / BITS_PER_GB
}

/// Evaluate both layouts for one data width
///
/// Feasible integer counts are `1 ..= log2(data_width)`. Packed curves are
/// labeled with the effective per-integer bit width the packing leaves
/// (`data_width / count - 1`, one bit per integer goes to the carry
/// scheme).
#[must_use]
pub fn model_curves(data_width: u32) -> ModelComparison {
    let grid = element_grid();
    let mut packed = Vec::new();
    let mut unpacked = Vec::new();

    for int_count in 1..=data_width.ilog2() {
        packed.push(ModelCurve {
            label: format!(
                "mi<IntCount={int_count}, u{data_width}> @ BitWidth={}",
                data_width / int_count - 1
            ),
            points: grid
                .iter()
                .map(|&n| (n, packed_footprint_gb(data_width, n)))
                .collect(),
        });
        unpacked.push(ModelCurve {
            label: format!("u{data_width} x IntCount={int_count}"),
            points: grid
                .iter()
                .map(|&n| (n, unpacked_footprint_gb(int_count, data_width, n)))
                .collect(),
        });
    }

    ModelComparison {
        data_width,
        packed,
        unpacked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_grid_bounds() {
        let grid = element_grid();
        assert_eq!(grid.len(), 16);
        assert_eq!(grid[0], 1 << 14);
        assert_eq!(*grid.last().unwrap(), 1 << 29);
    }

    #[test]
    fn test_packed_footprint_ignores_count() {
        // 2^30 elements of a 8-bit word is exactly 1 GB, however many
        // integers share the word.
        assert!((packed_footprint_gb(8, 1 << 30) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unpacked_footprint_scales_with_count() {
        let one = unpacked_footprint_gb(1, 8, 1 << 30);
        let three = unpacked_footprint_gb(3, 8, 1 << 30);
        assert!((three / one - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_feasible_counts_per_width() {
        assert_eq!(model_curves(8).packed.len(), 3);
        assert_eq!(model_curves(64).packed.len(), 6);
        assert_eq!(model_curves(64).unpacked.len(), 6);
    }

    #[test]
    fn test_curve_labels() {
        let comparison = model_curves(64);
        assert_eq!(comparison.packed[1].label, "mi<IntCount=2, u64> @ BitWidth=31");
        assert_eq!(comparison.unpacked[1].label, "u64 x IntCount=2");
    }

    #[test]
    fn test_curves_cover_the_grid() {
        let comparison = model_curves(16);
        for curve in comparison.packed.iter().chain(&comparison.unpacked) {
            assert_eq!(curve.points.len(), 16);
        }
    }
}
