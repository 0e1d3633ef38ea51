// SPDX-License-Identifier: MIT OR Apache-2.0
//! Result-file loading and truncation repair
//!
//! Reads the JSON emitted by the microbenchmark harness and produces one
//! [`Observation`] per benchmark row. Files from aborted cluster runs are
//! commonly truncated mid-array or polluted with scheduler log output;
//! [`repair_truncated`] patches the known patterns before parsing so a
//! partial run can still be plotted.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BenchError, Result};

/// Sentinel benchmark name excluded from all downstream computation
pub const WARMUP_SENTINEL: &str = "_warmup_";

/// Cluster-scheduler log marker that can trail an aborted result file
const SCHEDULER_LOG_MARKER: &[u8] = b"slurmstepd";

/// Which repetition-aggregate a row represents
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Plain per-repetition row, no aggregate suffix on the name
    Raw,
    /// Mean over repetitions
    Mean,
    /// Median over repetitions
    Median,
    /// Standard deviation over repetitions
    Stddev,
    /// Coefficient of variation over repetitions
    Cv,
    /// Any other aggregate the harness was configured to report
    Other(String),
}

impl Statistic {
    /// Parse the `_<stat>` suffix of a benchmark name
    #[must_use]
    pub fn parse(suffix: &str) -> Self {
        match suffix {
            "mean" => Self::Mean,
            "median" => Self::Median,
            "stddev" => Self::Stddev,
            "cv" => Self::Cv,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => f.write_str("raw"),
            Self::Mean => f.write_str("mean"),
            Self::Median => f.write_str("median"),
            Self::Stddev => f.write_str("stddev"),
            Self::Cv => f.write_str("cv"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// One benchmark measurement row
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Variant name, the compound name's prefix before the `/` separator
    pub variant: String,
    /// Problem-size parameter encoded as the name suffix
    pub n_elements: u64,
    /// Repetition-aggregate kind of this row
    pub stat: Statistic,
    /// Elapsed time as reported by the harness
    pub real_time: f64,
    /// Time unit as reported by the harness, assumed uniform per file
    pub time_unit: String,
}

#[derive(Deserialize)]
struct ResultFile {
    benchmarks: Vec<RawBenchmark>,
}

#[derive(Deserialize)]
struct RawBenchmark {
    name: String,
    real_time: f64,
    time_unit: String,
}

/// Patch the known truncation patterns of an aborted benchmark run
///
/// Three cases are handled:
/// - trailing scheduler log output: everything from the first `slurmstepd`
///   marker on is dropped and the array and object are closed
/// - text ending in a four-space-indented record brace: the writer stopped
///   between records, close the array and object
/// - text ending in a dangling `[\n`: the writer stopped before the first
///   record, close the empty array and object
///
/// Anything else is returned unchanged; if it still fails to parse, the
/// failure is fatal.
#[must_use]
pub fn repair_truncated(raw: &str) -> Cow<'_, str> {
    if let Some(idx) = memchr::memmem::find(raw.as_bytes(), SCHEDULER_LOG_MARKER) {
        let mut fixed = raw[..idx].to_string();
        fixed.push_str("]}");
        return Cow::Owned(fixed);
    }
    if raw.ends_with("    }") || raw.ends_with("[\n") {
        let mut fixed = raw.to_string();
        fixed.push_str("]}");
        return Cow::Owned(fixed);
    }
    Cow::Borrowed(raw)
}

/// Parse (possibly repaired) result text into observations
///
/// Compound names split at `/` into variant and element count, and the
/// count splits at `_` into count and statistic kind. Warmup rows are
/// dropped here so nothing downstream ever sees them.
///
/// # Errors
///
/// Returns [`BenchError::Json`] when the text is unparseable even after
/// repair, and [`BenchError::BadElementCount`] when a compound name has no
/// positive-integer element-count suffix.
pub fn parse_results(raw: &str) -> Result<Vec<Observation>> {
    let repaired = repair_truncated(raw);
    let file: ResultFile = serde_json::from_str(&repaired)?;

    let mut observations = Vec::with_capacity(file.benchmarks.len());
    for record in file.benchmarks {
        let Some((variant, size_part)) = record.name.split_once('/') else {
            return Err(BenchError::BadElementCount { name: record.name });
        };
        if variant == WARMUP_SENTINEL {
            continue;
        }

        let (count_str, stat) = match size_part.split_once('_') {
            Some((count, suffix)) => (count, Statistic::parse(suffix)),
            None => (size_part, Statistic::Raw),
        };
        let n_elements: u64 = count_str
            .parse()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| BenchError::BadElementCount {
                name: record.name.clone(),
            })?;

        observations.push(Observation {
            variant: variant.to_string(),
            n_elements,
            stat,
            real_time: record.real_time,
            time_unit: record.time_unit,
        });
    }
    Ok(observations)
}

/// Load a result file from disk and parse it into observations
///
/// # Errors
///
/// Returns [`BenchError::Io`] when the file cannot be read, plus
/// everything [`parse_results`] can return.
pub fn load_results(path: &Path) -> Result<Vec<Observation>> {
    println!("Opening: {}", path.display());
    let raw = fs::read_to_string(path).map_err(|source| BenchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_results(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, real_time: f64) -> String {
        format!(
            "    {{\n      \"name\": \"{name}\",\n      \"real_time\": {real_time},\n      \"cpu_time\": {real_time},\n      \"time_unit\": \"ns\"\n    }}"
        )
    }

    fn result_file(names: &[(&str, f64)]) -> String {
        let records: Vec<String> = names.iter().map(|(n, t)| record(n, *t)).collect();
        format!(
            "{{\n  \"context\": {{\"num_cpus\": 8}},\n  \"benchmarks\": [\n{}\n]}}",
            records.join(",\n")
        )
    }

    #[test]
    fn test_well_formed_round_trip() {
        let raw = result_file(&[
            ("_warmup_/268435456", 1.0),
            ("xpy-1-u32x2/16384", 250.5),
            ("xpy-1-u32x2/16384_mean", 251.0),
            ("xpy-1-u32x2/16384_stddev", 2.5),
        ]);
        let obs = parse_results(&raw).unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].variant, "xpy-1-u32x2");
        assert_eq!(obs[0].n_elements, 16384);
        assert_eq!(obs[0].stat, Statistic::Raw);
        assert_eq!(obs[1].stat, Statistic::Mean);
        assert!((obs[1].real_time - 251.0).abs() < f64::EPSILON);
        assert_eq!(obs[2].stat, Statistic::Stddev);
        assert_eq!(obs[2].time_unit, "ns");
    }

    #[test]
    fn test_warmup_rows_are_dropped() {
        let raw = result_file(&[("_warmup_/268435456", 9.0)]);
        assert!(parse_results(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_repair_trailing_record_brace() {
        let full = result_file(&[("a-u8x4/1024", 1.0)]);
        let truncated = full.strip_suffix("\n]}").unwrap();
        assert!(truncated.ends_with("    }"));

        let repaired = parse_results(truncated).unwrap();
        let clean = parse_results(&full).unwrap();
        assert_eq!(repaired, clean);
    }

    #[test]
    fn test_repair_dangling_array_opener() {
        let raw = "{\n  \"context\": {},\n  \"benchmarks\": [\n";
        assert!(parse_results(raw).unwrap().is_empty());
    }

    #[test]
    fn test_repair_scheduler_log_noise() {
        let full = result_file(&[("a-u8x4/1024", 1.0)]);
        let polluted = format!(
            "{}\nslurmstepd: error: *** JOB 4242 CANCELLED ***",
            full.strip_suffix("\n]}").unwrap()
        );
        let repaired = parse_results(&polluted).unwrap();
        let clean = parse_results(&full).unwrap();
        assert_eq!(repaired, clean);
    }

    #[test]
    fn test_unrepaired_garbage_is_fatal() {
        assert!(matches!(
            parse_results("not json at all"),
            Err(BenchError::Json(_))
        ));
    }

    #[test]
    fn test_missing_element_count_is_fatal() {
        let raw = result_file(&[("no-size-suffix", 1.0)]);
        assert!(matches!(
            parse_results(&raw),
            Err(BenchError::BadElementCount { name }) if name == "no-size-suffix"
        ));
    }

    #[test]
    fn test_zero_element_count_is_fatal() {
        let raw = result_file(&[("a-u8x4/0", 1.0)]);
        assert!(matches!(
            parse_results(&raw),
            Err(BenchError::BadElementCount { .. })
        ));
    }

    #[test]
    fn test_unknown_statistic_is_carried() {
        let raw = result_file(&[("a-u8x4/64_p99", 1.0)]);
        let obs = parse_results(&raw).unwrap();
        assert_eq!(obs[0].stat, Statistic::Other("p99".to_string()));
    }
}
