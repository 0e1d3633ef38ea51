// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bar chart of the metric at the largest element count
//!
//! One bar per variant, linear y axis from zero, error bars when a stddev
//! table is present. Variant names routinely end in a `<...>` parameter
//! list that overflows the bar width, so tick labels are drawn manually in
//! two lines, broken before the `<`.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use benchplot_core::WideTable;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::style::{
    AXIS_LABEL_FONT_SIZE, CHART_SIZE, TICK_LABEL_FONT_SIZE, is_svg, series_style,
};

/// Split a variant name into label lines, breaking before each `<`
#[must_use]
pub fn break_label(label: &str) -> Vec<String> {
    label
        .replace('<', "\n<")
        .split('\n')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Draw the bar chart onto an existing drawing area
///
/// # Errors
///
/// Fails when the table is empty or the row holds no positive value, when
/// the stddev table does not align, or on backend errors.
pub fn draw_bar_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    mean: &WideTable,
    stddev: Option<&WideTable>,
    y_label: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (_, values) = mean.last_row()?;
    let spreads = match stddev {
        Some(sd) => {
            ensure!(
                mean.same_shape(sd),
                "stddev table shape differs from mean table"
            );
            sd.last_row()?.1.to_vec()
        }
        None => vec![None; values.len()],
    };

    let y_hi = values
        .iter()
        .zip(&spreads)
        .filter_map(|(&v, &s)| v.map(|v| v + s.unwrap_or(0.0)))
        .fold(0.0_f64, f64::max)
        * 1.2;
    ensure!(y_hi > 0.0, "no positive values to plot");

    root.fill(&WHITE)?;

    let n_cols = mean.columns().len();
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(55)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(n_cols as f64 - 0.5), 0.0..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc(y_label)
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (col, value) in values.iter().enumerate() {
        let Some(value) = *value else { continue };
        let (color, _) = series_style(col);
        let x = col as f64;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, value)],
            color.filled(),
        )))?;

        if let Some(spread) = spreads[col] {
            chart.draw_series(std::iter::once(ErrorBar::new_vertical(
                x,
                (value - spread).max(0.0),
                value,
                value + spread,
                BLACK.filled(),
                8,
            )))?;
        }
    }

    // Tick labels drawn by hand: the mesh cannot break lines.
    let label_font = ("sans-serif", TICK_LABEL_FONT_SIZE)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let line_height = TICK_LABEL_FONT_SIZE as i32 + 3;
    for (col, name) in mean.columns().iter().enumerate() {
        let (px, py) = chart.plotting_area().map_coordinate(&(col as f64, 0.0));
        for (row, line) in break_label(name).into_iter().enumerate() {
            root.draw(&Text::new(
                line,
                (px, py + 6 + row as i32 * line_height),
                label_font.clone(),
            ))?;
        }
    }

    Ok(())
}

/// Render the bar chart to `path`, choosing the backend by extension
///
/// # Errors
///
/// Everything [`draw_bar_chart`] can fail with, plus output I/O errors.
pub fn render_bar_chart(
    path: &Path,
    mean: &WideTable,
    stddev: Option<&WideTable>,
    y_label: &str,
) -> Result<()> {
    if is_svg(path) {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_bar_chart(&root, mean, stddev, y_label)?;
        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_bar_chart(&root, mean, stddev, y_label)?;
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

    #[test]
    fn test_break_label_splits_before_parameters() {
        assert_eq!(
            break_label("maxelem-1-mi<31, u64>"),
            vec!["maxelem-1-mi".to_string(), "<31, u64>".to_string()]
        );
        assert_eq!(break_label("xpy-1-u32x2"), vec!["xpy-1-u32x2".to_string()]);
    }

    #[test]
    fn test_renders_into_svg() {
        let rows: Vec<MetricRow> = [("a-u8x4", 3.0), ("b-mi<7, u32>", 5.0)]
            .into_iter()
            .map(|(variant, value)| MetricRow {
                variant: variant.to_string(),
                n_elements: 4096,
                stat: Statistic::Mean,
                value,
            })
            .collect();
        let mean = WideTable::pivot(&rows, &Statistic::Mean).unwrap();

        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (640, 480)).into_drawing_area();
            draw_bar_chart(&root, &mean, None, "GB/s").unwrap();
            root.present().unwrap();
        }
        assert!(buf.contains("<svg"));
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let empty = WideTable::pivot(&[], &Statistic::Mean).unwrap();
        let mut buf = String::new();
        let root = SVGBackend::with_string(&mut buf, (640, 480)).into_drawing_area();
        assert!(draw_bar_chart(&root, &empty, None, "GB/s").is_err());
    }
}
