// SPDX-License-Identifier: MIT OR Apache-2.0
//! Memory-model comparison figure
//!
//! Plots both closed-form footprint families for one data width on shared
//! log-log axes. Color and dash cycling continues across the families so
//! every curve stays identifiable in the legend.

use std::path::Path;

use anyhow::{Context, Result};
use benchplot_core::ModelComparison;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::line::{draw_log_curve, log_range};
use crate::style::{
    AXIS_LABEL_FONT_SIZE, CHART_SIZE, LEGEND_FONT_SIZE, TICK_LABEL_FONT_SIZE, TITLE_FONT_SIZE,
    is_svg,
};

/// Draw the comparison figure onto an existing drawing area
///
/// # Errors
///
/// Fails when the comparison holds no curves, or on backend errors.
pub fn draw_model_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    comparison: &ModelComparison,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let curves: Vec<_> = comparison
        .packed
        .iter()
        .chain(&comparison.unpacked)
        .collect();
    let points = curves.iter().flat_map(|c| c.points.iter().copied());
    let (x_lo, x_hi) = log_range(points.clone().map(|(n, _)| n as f64), 1.2)
        .context("model comparison holds no curves")?;
    let (y_lo, y_hi) =
        log_range(points.map(|(_, gb)| gb), 2.0).context("model comparison holds no curves")?;

    root.fill(&WHITE)?;

    let width = comparison.data_width;
    let title = format!("Memory Consumption for mi<IntCount, u{width}> and IntCount x u{width}");
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("n_elements")
        .y_desc("GB")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (idx, curve) in curves.iter().enumerate() {
        let points: Vec<(f64, f64)> = curve
            .points
            .iter()
            .map(|&(n, gb)| (n as f64, gb))
            .collect();
        draw_log_curve(&mut chart, &curve.label, points, idx)?;
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

/// Render the comparison figure to `path`, choosing the backend by
/// extension
///
/// # Errors
///
/// Everything [`draw_model_chart`] can fail with, plus output I/O errors.
pub fn render_model_chart(path: &Path, comparison: &ModelComparison) -> Result<()> {
    if is_svg(path) {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_model_chart(&root, comparison)?;
        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_model_chart(&root, comparison)?;
        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchplot_core::model_curves;

    #[test]
    fn test_renders_each_data_width() {
        for width in benchplot_core::DATA_WIDTHS {
            let comparison = model_curves(width);
            let mut buf = String::new();
            {
                let root = SVGBackend::with_string(&mut buf, (640, 480)).into_drawing_area();
                draw_model_chart(&root, &comparison).unwrap();
                root.present().unwrap();
            }
            assert!(buf.contains("<svg"));
        }
    }
}
