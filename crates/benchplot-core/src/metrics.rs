// SPDX-License-Identifier: MIT OR Apache-2.0
//! Derived metric computation
//!
//! Two metric families feed the charts: memory bandwidth (theoretical
//! footprint over elapsed time) and plain timings. Footprints are the same
//! across repetition aggregates, so stddev rows get valid bandwidths too
//! and can drive error bars.

use crate::error::Result;
use crate::layout::{Layout, Mode};
use crate::loader::Observation;
use crate::table::MetricRow;

/// Nanoseconds per second
pub const NS_PER_SEC: f64 = 1e9;

/// Unit label of the bandwidth metric
pub const BANDWIDTH_UNIT: &str = "GB/s";

/// Unit label of the timing metric
///
/// Harness output is nanosecond-precision; timings are reported in
/// microseconds for readable axes.
pub const TIMING_UNIT: &str = "\u{b5}s";

/// Derive one bandwidth row per observation
///
/// Bandwidth is the layout's theoretical footprint in binary gigabytes
/// divided by the elapsed seconds. Elapsed time is taken as nanoseconds
/// regardless of the file's declared unit.
///
/// # Errors
///
/// Returns [`crate::BenchError::UnrecognizedLayout`] when a variant name
/// encodes no known storage layout.
pub fn bandwidth_rows(observations: &[Observation], mode: Mode) -> Result<Vec<MetricRow>> {
    observations
        .iter()
        .map(|obs| {
            let layout = Layout::parse(&obs.variant, mode)?;
            let seconds = obs.real_time / NS_PER_SEC;
            Ok(MetricRow {
                variant: obs.variant.clone(),
                n_elements: obs.n_elements,
                stat: obs.stat.clone(),
                value: layout.footprint_gb(obs.n_elements) / seconds,
            })
        })
        .collect()
}

/// Derive one timing row per observation
///
/// Values are converted to microseconds when the file reports nanoseconds;
/// the unit is assumed uniform across the file, so the first row decides.
#[must_use]
pub fn timing_rows(observations: &[Observation]) -> Vec<MetricRow> {
    let from_ns = observations.first().is_some_and(|o| o.time_unit == "ns");
    observations
        .iter()
        .map(|obs| MetricRow {
            variant: obs.variant.clone(),
            n_elements: obs.n_elements,
            stat: obs.stat.clone(),
            value: if from_ns {
                obs.real_time / 1000.0
            } else {
                obs.real_time
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Statistic;

    fn obs(variant: &str, n_elements: u64, stat: Statistic, real_time: f64) -> Observation {
        Observation {
            variant: variant.to_string(),
            n_elements,
            stat,
            real_time,
            time_unit: "ns".to_string(),
        }
    }

    #[test]
    fn test_one_gigabyte_in_one_second() {
        // u8x1 at 2^30 elements occupies exactly 1 GB.
        let observations = vec![obs("foo-u8x1", 1 << 30, Statistic::Mean, 1e9)];
        let rows = bandwidth_rows(&observations, Mode::Fixed).unwrap();
        assert!((rows[0].value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bandwidth_scales_with_time() {
        let observations = vec![
            obs("foo-u8x1", 1 << 30, Statistic::Mean, 1e9),
            obs("foo-u8x1", 1 << 30, Statistic::Stddev, 2e9),
        ];
        let rows = bandwidth_rows(&observations, Mode::Fixed).unwrap();
        assert!((rows[0].value / rows[1].value - 2.0).abs() < 1e-12);
        assert_eq!(rows[1].stat, Statistic::Stddev);
    }

    #[test]
    fn test_unrecognized_layout_propagates() {
        let observations = vec![obs("no-layout-here", 1024, Statistic::Mean, 1.0)];
        assert!(bandwidth_rows(&observations, Mode::Fixed).is_err());
    }

    #[test]
    fn test_timing_converts_ns_to_us() {
        let observations = vec![obs("foo-u8x1", 1024, Statistic::Mean, 2500.0)];
        let rows = timing_rows(&observations);
        assert!((rows[0].value - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_timing_passes_other_units_through() {
        let mut observation = obs("foo-u8x1", 1024, Statistic::Mean, 2500.0);
        observation.time_unit = "us".to_string();
        let rows = timing_rows(&[observation]);
        assert!((rows[0].value - 2500.0).abs() < 1e-12);
    }
}
