// SPDX-License-Identifier: MIT OR Apache-2.0
//! Chart rendering for benchplot
//!
//! Draws the three figure kinds of the toolkit with plotters:
//!
//! - [`line`] - log-log metric-vs-size line charts with error bars
//! - [`bar`] - per-variant bar charts at the largest element count
//! - [`memory`] - closed-form memory-model comparison figures
//! - [`style`] - shared palette, line-style cycle, and backend selection
//!
//! Every figure has a `draw_*` function targeting any drawing area (used
//! by the tests with an in-memory SVG backend) and a `render_*` wrapper
//! that picks the file backend from the output extension.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

/// Bar chart at the largest element count
pub mod bar;
/// Log-log line charts with error bars
pub mod line;
/// Memory-model comparison figures
pub mod memory;
/// Shared chart styling
pub mod style;

pub use bar::{draw_bar_chart, render_bar_chart};
pub use line::{draw_line_chart, render_line_chart};
pub use memory::{draw_model_chart, render_model_chart};
pub use style::{CHART_SIZE, LineStyle, PALETTE, is_svg, series_style};
