// SPDX-License-Identifier: MIT OR Apache-2.0
//! benchplot CLI binary - benchmark-result bandwidth and timing plots

use std::path::{Path, PathBuf};

use anyhow::Result;
use benchplot_core::loader::Statistic;
use benchplot_core::{
    BANDWIDTH_UNIT, DATA_WIDTHS, Mode, TIMING_UNIT, WideTable, bandwidth_rows, load_results,
    model_curves, timing_rows,
};
use benchplot_plot::{render_bar_chart, render_line_chart, render_model_chart};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "benchplot")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for benchplot CLI
#[derive(Subcommand)]
enum Commands {
    /// Plot real-time curves from a benchmark result file
    Timing {
        /// Benchmark result file (JSON)
        input: PathBuf,

        /// Line-plot output image; skipped when omitted
        line_out: Option<PathBuf>,

        /// Bar-chart output image; skipped when omitted
        bar_out: Option<PathBuf>,
    },
    /// Plot memory-bandwidth curves from a benchmark result file
    Bandwidth {
        /// Benchmark result file (JSON)
        input: PathBuf,

        /// Line-plot output image; skipped when omitted
        line_out: Option<PathBuf>,

        /// Bar-chart output image; skipped when omitted
        bar_out: Option<PathBuf>,
    },
    /// Render closed-form memory-model comparison figures
    Memory {
        /// Output-name suffix; figures are saved as u<width>-<suffix>
        suffix: String,
    },
}

fn main() {
    let args = Args::parse();

    match args.command {
        Commands::Timing { .. } => handle_timing(&args),
        Commands::Bandwidth { .. } => handle_bandwidth(&args),
        Commands::Memory { .. } => handle_memory(&args),
    }
}

fn handle_timing(args: &Args) {
    if let Commands::Timing {
        input,
        line_out,
        bar_out,
    } = &args.command
        && let Err(e) = run_timing(input, line_out.as_deref(), bar_out.as_deref())
    {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_timing(input: &Path, line_out: Option<&Path>, bar_out: Option<&Path>) -> Result<()> {
    let observations = load_results(input)?;
    let rows = timing_rows(&observations);
    let (mean, stddev) = pivot_pair(&rows)?;

    let title = format!("Timed Benchmarks from {}", file_stem(input));
    let y_label = format!("real time [{TIMING_UNIT}]");
    if let Some(path) = line_out {
        render_line_chart(path, &mean, stddev.as_ref(), &title, &y_label)?;
    }
    if let Some(path) = bar_out {
        render_bar_chart(path, &mean, stddev.as_ref(), &y_label)?;
    }
    Ok(())
}

fn handle_bandwidth(args: &Args) {
    if let Commands::Bandwidth {
        input,
        line_out,
        bar_out,
    } = &args.command
        && let Err(e) = run_bandwidth(input, line_out.as_deref(), bar_out.as_deref())
    {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_bandwidth(input: &Path, line_out: Option<&Path>, bar_out: Option<&Path>) -> Result<()> {
    let stem = file_stem(input);
    // The width-encoding mode is decided here, once, and passed down.
    let mode = Mode::from_file_stem(&stem);

    let observations = load_results(input)?;
    let rows = bandwidth_rows(&observations, mode)?;
    let (mean, stddev) = pivot_pair(&rows)?;

    let title = format!("Bandwidth Benchmarks from {stem}");
    let y_label = format!("bandwidth [{BANDWIDTH_UNIT}]");
    if let Some(path) = line_out {
        render_line_chart(path, &mean, stddev.as_ref(), &title, &y_label)?;
    }
    if let Some(path) = bar_out {
        render_bar_chart(path, &mean, stddev.as_ref(), &y_label)?;
    }
    Ok(())
}

fn handle_memory(args: &Args) {
    if let Commands::Memory { suffix } = &args.command
        && let Err(e) = run_memory(suffix)
    {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_memory(suffix: &str) -> Result<()> {
    for width in DATA_WIDTHS {
        let comparison = model_curves(width);
        let path = PathBuf::from(format!("u{width}-{suffix}"));
        render_model_chart(&path, &comparison)?;
        println!("Saved: {}", path.display());
    }
    Ok(())
}

/// Mean and (when any rows carry one) stddev pivot of the metric rows
fn pivot_pair(
    rows: &[benchplot_core::MetricRow],
) -> Result<(WideTable, Option<WideTable>)> {
    let mean = WideTable::pivot(rows, &Statistic::Mean)?;
    let stddev = WideTable::pivot(rows, &Statistic::Stddev)?;
    let stddev = (!stddev.is_empty()).then_some(stddev);
    Ok((mean, stddev))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}
