// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared chart styling
//!
//! Result files routinely carry a dozen overlapping series, so colors and
//! line styles cycle together: series i gets palette color `i mod 10` and
//! dash pattern `i mod 4`, which keeps lines distinguishable well past the
//! palette length.

use std::path::Path;

use plotters::style::RGBColor;

/// Canvas size of every generated chart
pub const CHART_SIZE: (u32, u32) = (1000, 600);

/// Caption font size
pub const TITLE_FONT_SIZE: u32 = 30;

/// Axis-description font size
pub const AXIS_LABEL_FONT_SIZE: u32 = 20;

/// Tick-label font size
pub const TICK_LABEL_FONT_SIZE: u32 = 15;

/// Legend font size
pub const LEGEND_FONT_SIZE: u32 = 15;

/// Ten-color series palette
pub const PALETTE: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Line style of one series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Continuous line
    Solid,
    /// Long dashes
    Dashed,
    /// Short dashes
    Dotted,
    /// Medium dashes, standing in for a dash-dot pattern
    DashDot,
}

impl LineStyle {
    /// Dash segment and gap lengths in pixels; `None` draws solid
    #[must_use]
    pub const fn dash_pattern(self) -> Option<(u32, u32)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((8, 5)),
            Self::Dotted => Some((2, 4)),
            Self::DashDot => Some((5, 3)),
        }
    }
}

const STYLE_CYCLE: [LineStyle; 4] = [
    LineStyle::Solid,
    LineStyle::Dashed,
    LineStyle::Dotted,
    LineStyle::DashDot,
];

/// Color and line style for series `idx`
#[must_use]
pub fn series_style(idx: usize) -> (RGBColor, LineStyle) {
    (PALETTE[idx % PALETTE.len()], STYLE_CYCLE[idx % STYLE_CYCLE.len()])
}

/// Whether an output path selects the SVG backend
#[must_use]
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_cycle_wraps() {
        assert_eq!(series_style(0), series_style(20));
        assert_eq!(series_style(3).1, LineStyle::DashDot);
        assert_eq!(series_style(4).1, LineStyle::Solid);
        assert_ne!(series_style(4).0, series_style(0).0);
    }

    #[test]
    fn test_backend_selection() {
        assert!(is_svg(Path::new("out/chart.svg")));
        assert!(is_svg(Path::new("chart.SVG")));
        assert!(!is_svg(Path::new("chart.png")));
        assert!(!is_svg(Path::new("chart")));
    }
}
