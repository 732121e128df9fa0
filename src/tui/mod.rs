//! Ratatui-based plot viewer.
//!
//! Each plot takes over the terminal (alternate screen), stays up until the
//! user dismisses it, then hands the terminal back so the text report can
//! continue underneath. That mirrors a blocking "show and wait" window.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::PlotSink;
use crate::domain::{CurvatureMatrix, Evaluation, ParameterSet};
use crate::error::{AppError, EXIT_TERMINAL};
use crate::field::{TimeWrapField, region_boundary};

mod heatmap;
mod plotters_chart;

use heatmap::{ColorBar, ContourWidget, HeatmapWidget};
use plotters_chart::{RegionChart, region_bounds};

/// Shows each plot full-screen and blocks until it is dismissed.
pub struct TuiPlots;

impl PlotSink for TuiPlots {
    fn show_heatmap(&mut self, eval: &Evaluation) -> Result<(), AppError> {
        show(View::Heatmap(&eval.matrix))
    }

    fn show_region(&mut self, params: &ParameterSet) -> Result<(), AppError> {
        show(View::Region(params))
    }

    fn show_time_wrap(&mut self, params: &ParameterSet, field: &TimeWrapField) -> Result<(), AppError> {
        show(View::TimeWrap(params, field))
    }
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_TERMINAL,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

enum View<'a> {
    Heatmap(&'a CurvatureMatrix),
    Region(&'a ParameterSet),
    TimeWrap(&'a ParameterSet, &'a TimeWrapField),
}

impl View<'_> {
    fn title(&self) -> String {
        match self {
            View::Heatmap(_) => "Riemann Curvature Tensor".to_string(),
            View::Region(p) => format!("CTC Visualization for {}", p.title_fragment()),
            View::TimeWrap(p, _) => format!("Time vs Space for {}", p.title_fragment()),
        }
    }
}

fn show(view: View<'_>) -> Result<(), AppError> {
    log::debug!("showing plot: {}", view.title());
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to initialize terminal: {e}")))?;

    event_loop(&view, &mut terminal)
}

fn event_loop<B: ratatui::backend::Backend>(view: &View<'_>, terminal: &mut Terminal<B>) -> Result<(), AppError> {
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal
                .draw(|f| draw(f, view))
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Terminal draw error: {e}")))?;
            needs_redraw = false;
        }

        if !event::poll(Duration::from_millis(100))
            .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event poll error: {e}")))?
        {
            continue;
        }

        match event::read().map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event read error: {e}")))? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_dismiss_key(key.code) {
                    break;
                }
            }
            Event::Resize(_, _) => {
                needs_redraw = true;
            }
            _ => {}
        }
    }
    Ok(())
}

fn is_dismiss_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')
    )
}

fn draw(frame: &mut ratatui::Frame<'_>, view: &View<'_>) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(size);

    draw_header(frame, chunks[0], view);
    match view {
        View::Heatmap(matrix) => draw_heatmap(frame, chunks[1], matrix),
        View::Region(params) => draw_region(frame, chunks[1], params),
        View::TimeWrap(_, field) => draw_time_wrap(frame, chunks[1], field),
    }
    draw_footer(frame, chunks[2]);
}

fn draw_header(frame: &mut ratatui::Frame<'_>, area: Rect, view: &View<'_>) {
    let line = Line::from(vec![
        Span::styled("ctc", Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled(view.title(), Style::default().add_modifier(Modifier::BOLD)),
    ]);
    let p = Paragraph::new(Text::from(line)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_footer(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let help = "q / Esc / Enter / Space  close and continue";
    let p = Paragraph::new(Span::styled(help, Style::default().fg(Color::Gray)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

/// Split a plot body into the plot area and a color-bar column.
fn split_with_bar(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);
    (chunks[0], chunks[1])
}

fn draw_heatmap(frame: &mut ratatui::Frame<'_>, area: Rect, matrix: &CurvatureMatrix) {
    let block = Block::default().title("Riemann Curvature Tensor").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let range = matrix.min_max().unwrap_or((0.0, 0.0));
    let (plot_area, bar_area) = split_with_bar(inner);
    let (grid, insets) = chart_layout(plot_area);

    frame.render_widget(HeatmapWidget { matrix, range }, grid);
    if let Some(insets) = insets {
        draw_index_ticks(frame, plot_area, grid, insets);
    }
    frame.render_widget(ColorBar { label: "Value", range }, bar_area);
}

fn draw_region(frame: &mut ratatui::Frame<'_>, area: Rect, params: &ParameterSet) {
    let block = Block::default()
        .title("Possible CTC Region")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let boundary = region_boundary(params);
    let bounds = region_bounds(params.radius);
    let (chart_rect, insets) = chart_layout(inner);
    let widget = RegionChart {
        boundary: &boundary,
        bounds,
        x_label: "X (meters)",
        y_label: "Y (meters)",
        fmt_tick: fmt_axis,
    };

    frame.render_widget(widget, chart_rect);
    if let Some(insets) = insets {
        draw_axis_ticks(
            frame,
            inner,
            chart_rect,
            insets,
            AxisSpec { bounds, label: "X (meters)" },
            AxisSpec { bounds, label: "Y (meters)" },
        );
    }
}

fn draw_time_wrap(frame: &mut ratatui::Frame<'_>, area: Rect, field: &TimeWrapField) {
    let block = Block::default().title("Time Wrapping").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let Some(range) = field.min_max() else {
        let msg = Paragraph::new("No finite values to plot (L = 0?).")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(msg, inner);
        return;
    };

    let (plot_area, bar_area) = split_with_bar(inner);
    let (grid, insets) = chart_layout(plot_area);
    frame.render_widget(ContourWidget { field, range }, grid);

    if let Some(insets) = insets {
        let x_bounds = [0.0, field.xs.last().copied().unwrap_or(0.0)];
        let t_bounds = [0.0, field.ts.last().copied().unwrap_or(0.0)];
        draw_axis_ticks(
            frame,
            plot_area,
            grid,
            insets,
            AxisSpec { bounds: x_bounds, label: "Space (meters)" },
            AxisSpec { bounds: t_bounds, label: "Time (arbitrary units)" },
        );
    }
    frame.render_widget(ColorBar { label: "Time Wrapping", range }, bar_area);
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.2}")
}

fn fmt_tick(v: f64) -> String {
    let abs = v.abs();
    if abs != 0.0 && !(1e-2..1e4).contains(&abs) {
        format!("{v:.0e}")
    } else {
        format!("{v:.1}")
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

#[derive(Debug, Clone, Copy)]
struct AxisSpec<'a> {
    bounds: [f64; 2],
    label: &'a str,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Tick labels 0..3 under and beside the heatmap, centered on each cell band.
fn draw_index_ticks(frame: &mut ratatui::Frame<'_>, outer: Rect, grid: Rect, insets: AxisInsets) {
    let dim = CurvatureMatrix::DIM as u16;
    let style = Style::default().fg(Color::Gray);

    for j in 0..dim {
        let x = grid.x + (2 * j + 1) * grid.width / (2 * dim);
        let y = grid.y + grid.height;
        if y < outer.y + outer.height {
            frame.render_widget(Paragraph::new(j.to_string()).style(style), Rect::new(x, y, 1, 1));
        }
    }
    for k in 0..dim {
        // Row 0 at the bottom.
        let y = grid.y + grid.height - 1 - (2 * k + 1) * grid.height / (2 * dim);
        let x = outer.x + insets.left.saturating_sub(2);
        frame.render_widget(Paragraph::new(k.to_string()).style(style), Rect::new(x, y, 1, 1));
    }

    let x_rect = Rect {
        x: grid.x,
        y: grid.y + grid.height + 1,
        width: grid.width,
        height: 1,
    };
    if x_rect.y < outer.y + outer.height {
        frame.render_widget(
            Paragraph::new("Index j").alignment(Alignment::Center).style(style),
            x_rect,
        );
    }
    frame.render_widget(
        Paragraph::new("Index k").style(style.add_modifier(Modifier::BOLD)),
        Rect::new(outer.x, outer.y, insets.left.saturating_sub(1), 1),
    );
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_axis: AxisSpec<'_>,
    y_axis: AxisSpec<'_>,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_axis.bounds[0] + u * (x_axis.bounds[1] - x_axis.bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_tick(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_axis.bounds[0] + u * (y_axis.bounds[1] - y_axis.bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_tick(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(x_axis.label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(y_axis.label)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1).max(1).min(inner.width),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
