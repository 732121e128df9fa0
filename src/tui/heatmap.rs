//! Cell-painted heatmap and filled-contour widgets.
//!
//! Plotters' rectangle fills map poorly onto terminal cells, so these widgets
//! paint cell backgrounds directly. One terminal cell = one color sample.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::CurvatureMatrix;
use crate::field::{CONTOUR_LEVELS, TimeWrapField, contour_band, normalize, viridis};

/// The 4x4 matrix, row 0 drawn at the bottom.
pub struct HeatmapWidget<'a> {
    pub matrix: &'a CurvatureMatrix,
    pub range: (f64, f64),
}

impl<'a> Widget for HeatmapWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim = CurvatureMatrix::DIM as u16;
        if area.width < dim || area.height < dim {
            return;
        }
        let (lo, hi) = self.range;
        for dy in 0..area.height {
            // Flip so matrix row 0 sits on the bottom edge.
            let k = (dim - 1) - (dy * dim / area.height).min(dim - 1);
            for dx in 0..area.width {
                let j = (dx * dim / area.width).min(dim - 1);
                let color = normalize(self.matrix.get(k as usize, j as usize), lo, hi).map(rgb);
                paint(buf, area.x + dx, area.y + dy, color);
            }
        }
    }
}

/// The time-wrapping field as filled contour bands; time runs upward.
pub struct ContourWidget<'a> {
    pub field: &'a TimeWrapField,
    pub range: (f64, f64),
}

impl<'a> Widget for ContourWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let nx = self.field.xs.len();
        let nt = self.field.ts.len();
        if area.width == 0 || area.height == 0 || nx == 0 || nt == 0 {
            return;
        }
        let (lo, hi) = self.range;
        for dy in 0..area.height {
            let ti = sample_index(area.height - 1 - dy, area.height, nt);
            for dx in 0..area.width {
                let xi = sample_index(dx, area.width, nx);
                let color = contour_band(self.field.get(ti, xi), lo, hi, CONTOUR_LEVELS)
                    .map(|band| rgb(band as f64 / (CONTOUR_LEVELS - 1) as f64));
                paint(buf, area.x + dx, area.y + dy, color);
            }
        }
    }
}

/// Vertical color scale: high at the top, low at the bottom.
pub struct ColorBar<'a> {
    pub label: &'a str,
    pub range: (f64, f64),
}

impl<'a> Widget for ColorBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 4 {
            return;
        }
        let (lo, hi) = self.range;
        let text = Style::default().fg(Color::Gray);

        buf.set_string(area.x, area.y, fmt_bar_value(hi), text);
        let bar_top = area.y + 1;
        let bar_height = area.height.saturating_sub(3);
        for dy in 0..bar_height {
            let u = if bar_height <= 1 {
                0.5
            } else {
                1.0 - dy as f64 / (bar_height - 1) as f64
            };
            for dx in 0..2 {
                paint(buf, area.x + dx, bar_top + dy, Some(rgb(u)));
            }
        }
        buf.set_string(area.x, bar_top + bar_height, fmt_bar_value(lo), text);
        buf.set_string(area.x, bar_top + bar_height + 1, self.label, text);
    }
}

fn fmt_bar_value(v: f64) -> String {
    format!("{v:.2e}")
}

fn rgb(u: f64) -> Color {
    let (r, g, b) = viridis(u);
    Color::Rgb(r, g, b)
}

fn paint(buf: &mut Buffer, x: u16, y: u16, color: Option<Color>) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(' ');
        if let Some(color) = color {
            cell.set_bg(color);
        }
    }
}

/// Nearest sample index for cell `i` of `cells`.
pub(crate) fn sample_index(i: u16, cells: u16, n: usize) -> usize {
    if cells <= 1 || n <= 1 {
        return 0;
    }
    let u = i as f64 / (cells as f64 - 1.0);
    ((u * (n as f64 - 1.0)).round() as usize).min(n - 1)
}
