//! Plotters-powered CTC region chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// Named `Color` below is ratatui's; keep the plotters trait in scope for `mix`.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: the boundary and bounds are
/// computed outside the render call, so `render()` only draws.
pub struct RegionChart<'a> {
    /// Closed boundary of the region (first point repeated at the end).
    pub boundary: &'a [(f64, f64)],
    /// Shared bounds for both axes (equal aspect in data units).
    pub bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_tick: fn(f64) -> String,
}

impl<'a> Widget for RegionChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [lo, hi] = self.bounds;
        if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(lo..hi, lo..hi)?;

            // Light grid, as in a `grid(True)` chart.
            chart
                .configure_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_tick)(*v))
                .y_label_formatter(&|v| (self.fmt_tick)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .light_line_style(&RGBColor(60, 60, 60))
                .bold_line_style(&RGBColor(90, 90, 90))
                .draw()?;

            let fill = RGBColor(173, 216, 230); // lightblue
            let edge = RGBColor(31, 119, 180);

            // 1) Filled interior.
            chart.draw_series(std::iter::once(Polygon::new(
                self.boundary.to_vec(),
                fill.mix(0.5).filled(),
            )))?;

            // 2) Boundary line on top.
            chart.draw_series(LineSeries::new(self.boundary.iter().copied(), &edge))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Symmetric bounds around the origin that fit a circle of radius `r` with
/// 10% padding. Degenerate radii fall back to `[-1, 1]`.
pub fn region_bounds(r: f64) -> [f64; 2] {
    let r = r.abs();
    if !r.is_finite() || r == 0.0 {
        return [-1.0, 1.0];
    }
    let pad = r * 0.1;
    [-r - pad, r + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_and_fall_back() {
        let [lo, hi] = region_bounds(2.0);
        assert!((lo + 2.2).abs() < 1e-12 && (hi - 2.2).abs() < 1e-12);
        assert_eq!(region_bounds(-2.0), region_bounds(2.0));
        assert_eq!(region_bounds(0.0), [-1.0, 1.0]);
        assert_eq!(region_bounds(f64::NAN), [-1.0, 1.0]);
    }

    fn symbols(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_filled_region_into_buffer() {
        let boundary: Vec<(f64, f64)> = (0..=40)
            .map(|i| {
                let t = i as f64 / 40.0 * std::f64::consts::TAU;
                (t.cos(), t.sin())
            })
            .collect();
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        RegionChart {
            boundary: &boundary,
            bounds: region_bounds(1.0),
            x_label: "x (m)",
            y_label: "y (m)",
            fmt_tick: |v| format!("{v:.1}"),
        }
        .render(area, &mut buf);
        assert!(symbols(&buf).chars().any(|c| c != ' '));
    }

    #[test]
    fn tiny_area_shows_resize_hint() {
        let area = Rect::new(0, 0, 50, 4);
        let mut buf = Buffer::empty(area);
        RegionChart {
            boundary: &[],
            bounds: [-1.0, 1.0],
            x_label: "x",
            y_label: "y",
            fmt_tick: |v| format!("{v}"),
        }
        .render(area, &mut buf);
        assert!(symbols(&buf).starts_with("Chart area too small"));
    }
}
