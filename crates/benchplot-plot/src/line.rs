// SPDX-License-Identifier: MIT OR Apache-2.0
//! Log-log line chart of a metric across element counts
//!
//! One series per wide-table column. When an aligned stddev table is
//! supplied, every point gets a vertical error bar in the series color,
//! with the bar ends clamped into the axis range so log coordinates stay
//! valid.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use benchplot_core::WideTable;
use plotters::chart::ChartContext;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::combinators::LogCoord;
use plotters::prelude::*;

use crate::style::{
    AXIS_LABEL_FONT_SIZE, CHART_SIZE, LEGEND_FONT_SIZE, TICK_LABEL_FONT_SIZE, TITLE_FONT_SIZE,
    is_svg, series_style,
};

/// A chart context on log-scaled f64 axes
pub(crate) type LogLogChart<'a, DB> =
    ChartContext<'a, DB, Cartesian2d<LogCoord<f64>, LogCoord<f64>>>;

/// Draw one styled, labeled curve into a log-log chart
pub(crate) fn draw_log_curve<DB: DrawingBackend>(
    chart: &mut LogLogChart<'_, DB>,
    label: &str,
    points: Vec<(f64, f64)>,
    idx: usize,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (color, line_style) = series_style(idx);
    let anno = match line_style.dash_pattern() {
        None => chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?,
        Some((size, spacing)) => chart.draw_series(DashedLineSeries::new(
            points,
            size,
            spacing,
            color.stroke_width(2),
        ))?,
    };
    anno.label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    Ok(())
}

/// Positive min/max over `values`, padded outward by `pad`
pub(crate) fn log_range(values: impl Iterator<Item = f64>, pad: f64) -> Option<(f64, f64)> {
    let mut lo = f64::MAX;
    let mut hi = 0.0_f64;
    for v in values {
        if v > 0.0 {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    (hi > 0.0).then_some((lo / pad, hi * pad))
}

/// Draw the line chart onto an existing drawing area
///
/// # Errors
///
/// Fails when the table is empty or holds no positive values, when the
/// stddev table does not align with the mean table, or on backend errors.
pub fn draw_line_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    mean: &WideTable,
    stddev: Option<&WideTable>,
    title: &str,
    y_label: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (Some(&first), Some(&last)) = (mean.index().first(), mean.index().last()) else {
        anyhow::bail!("metric table is empty");
    };
    if let Some(sd) = stddev {
        ensure!(
            mean.same_shape(sd),
            "stddev table shape differs from mean table"
        );
    }

    root.fill(&WHITE)?;

    let x_lo = first as f64 / 1.2;
    let x_hi = last as f64 * 1.2;
    let all_values = (0..mean.columns().len())
        .flat_map(|col| mean.column_points(col))
        .map(|(_, v)| v);
    let (y_lo, y_hi) = log_range(all_values, 2.0).context("no positive values to plot")?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("n_elements")
        .y_desc(y_label)
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (col, name) in mean.columns().iter().enumerate() {
        let points: Vec<(f64, f64)> = mean
            .column_points(col)
            .into_iter()
            .map(|(n, v)| (n as f64, v))
            .collect();
        draw_log_curve(&mut chart, name, points, col)?;
    }

    if let Some(sd) = stddev {
        for col in 0..mean.columns().len() {
            let (color, _) = series_style(col);
            for (row, &n) in mean.index().iter().enumerate() {
                let (Some(v), Some(s)) = (mean.cell(row, col), sd.cell(row, col)) else {
                    continue;
                };
                let lower = (v - s).max(y_lo);
                let upper = (v + s).min(y_hi);
                chart.draw_series(std::iter::once(ErrorBar::new_vertical(
                    n as f64,
                    lower,
                    v,
                    upper,
                    color.filled(),
                    5,
                )))?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    Ok(())
}

/// Render the line chart to `path`, choosing the backend by extension
///
/// # Errors
///
/// Everything [`draw_line_chart`] can fail with, plus output I/O errors.
pub fn render_line_chart(
    path: &Path,
    mean: &WideTable,
    stddev: Option<&WideTable>,
    title: &str,
    y_label: &str,
) -> Result<()> {
    if is_svg(path) {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_line_chart(&root, mean, stddev, title, y_label)?;
        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_line_chart(&root, mean, stddev, title, y_label)?;
        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchplot_core::loader::Statistic;
    use benchplot_core::table::MetricRow;

    fn sample_table(stat: Statistic, scale: f64) -> WideTable {
        let mut rows = Vec::new();
        for variant in ["a-u8x4", "b-mi<7, u32>"] {
            for n in [1024u64, 4096, 16384] {
                rows.push(MetricRow {
                    variant: variant.to_string(),
                    n_elements: n,
                    stat: stat.clone(),
                    value: scale * n as f64,
                });
            }
        }
        WideTable::pivot(&rows, &stat).unwrap()
    }

    #[test]
    fn test_log_range_ignores_nonpositive() {
        let (lo, hi) = log_range([0.0, -3.0, 2.0, 8.0].into_iter(), 2.0).unwrap();
        assert!((lo - 1.0).abs() < 1e-12);
        assert!((hi - 16.0).abs() < 1e-12);
        assert!(log_range([0.0, -1.0].into_iter(), 2.0).is_none());
    }

    #[test]
    fn test_renders_into_svg() {
        let mean = sample_table(Statistic::Mean, 1.0);
        let stddev = sample_table(Statistic::Stddev, 0.1);
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (640, 480)).into_drawing_area();
            draw_line_chart(&root, &mean, Some(&stddev), "Bandwidth Benchmarks", "GB/s").unwrap();
            root.present().unwrap();
        }
        assert!(buf.contains("<svg"));
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let empty = WideTable::pivot(&[], &Statistic::Mean).unwrap();
        let mut buf = String::new();
        let root = SVGBackend::with_string(&mut buf, (640, 480)).into_drawing_area();
        assert!(draw_line_chart(&root, &empty, None, "t", "y").is_err());
    }
}
