//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or a log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - region boundary: `o`, region interior: `.`
//! - heatmap / contour cells: shade ramp from `field::SHADES`

use crate::domain::{CurvatureMatrix, ParameterSet};
use crate::field::{
    CONTOUR_LEVELS, SHADES, TimeWrapField, contour_band, normalize, region_boundary, shade,
};

/// Character cells per heatmap column.
const HEAT_CELL_W: usize = 6;
/// Character rows per heatmap row.
const HEAT_CELL_H: usize = 2;

/// Render the CTC region: the filled circle of radius `R`.
pub fn render_region(params: &ParameterSet, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let boundary = region_boundary(params);
    let r = params.radius.abs();
    let (lo, hi) = if r.is_finite() && r > 0.0 {
        pad_range(-r, r, 0.1)
    } else {
        (-1.0, 1.0)
    };

    let mut grid = vec![vec![' '; width]; height];

    // Interior first so the boundary overlays it.
    if r.is_finite() && r > 0.0 {
        for (row, cells) in grid.iter_mut().enumerate() {
            let y = unmap_y(row, lo, hi, height);
            for (col, cell) in cells.iter_mut().enumerate() {
                let x = unmap_x(col, lo, hi, width);
                if x * x + y * y <= r * r {
                    *cell = '.';
                }
            }
        }
    }

    let mut prev = None;
    for &(x, y) in &boundary {
        if !(x.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let cx = map_x(x, lo, hi, width);
        let cy = map_y(y, lo, hi, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, cx, cy, 'o');
        } else {
            grid[cy][cx] = 'o';
        }
        prev = Some((cx, cy));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "CTC Visualization for {}\n",
        params.title_fragment()
    ));
    out.push_str(&format!(
        "X, Y (meters) in [{lo:.3}, {hi:.3}] | o = Possible CTC Region\n"
    ));
    push_grid(&mut out, grid);
    out
}

/// Render the 4x4 matrix as a shaded grid with row 0 at the bottom.
pub fn render_heatmap(matrix: &CurvatureMatrix) -> String {
    let dim = CurvatureMatrix::DIM;
    let (lo, hi) = matrix.min_max().unwrap_or((0.0, 0.0));

    let mut out = String::from("Riemann Curvature Tensor\n");
    for k in (0..dim).rev() {
        for line in 0..HEAT_CELL_H {
            let label = if line == HEAT_CELL_H - 1 {
                format!("{k}")
            } else {
                " ".to_string()
            };
            out.push_str(&format!("{label:>2} |"));
            for j in 0..dim {
                let ch = normalize(matrix.get(k, j), lo, hi)
                    .map(shade)
                    .unwrap_or(' ');
                out.push_str(&ch.to_string().repeat(HEAT_CELL_W));
            }
            out.push('\n');
        }
    }
    out.push_str(&format!("   +{}\n", "-".repeat(HEAT_CELL_W * dim)));
    out.push_str("    ");
    for j in 0..dim {
        out.push_str(&format!("{j:^w$}", w = HEAT_CELL_W));
    }
    out.push('\n');
    out.push_str("Index j (columns) / Index k (rows)\n");
    out.push_str(&color_bar("Value", lo, hi));
    out
}

/// Render the time-wrapping field as a filled contour.
///
/// The full grid is resampled to `width x height` cells; time runs upward.
pub fn render_contour(field: &TimeWrapField, params: &ParameterSet, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let nx = field.xs.len();
    let nt = field.ts.len();

    let mut out = String::new();
    out.push_str(&format!("Time vs Space for {}\n", params.title_fragment()));

    let Some((lo, hi)) = field.min_max() else {
        out.push_str("(no finite values to plot)\n");
        return out;
    };

    let mut grid = vec![vec![' '; width]; height];
    if nx > 0 && nt > 0 {
        for (row, cells) in grid.iter_mut().enumerate() {
            let ti = nearest(height - 1 - row, height, nt);
            for (col, cell) in cells.iter_mut().enumerate() {
                let xi = nearest(col, width, nx);
                *cell = contour_band(field.get(ti, xi), lo, hi, CONTOUR_LEVELS)
                    .map(|band| shade(band as f64 / (CONTOUR_LEVELS - 1) as f64))
                    .unwrap_or(' ');
            }
        }
    }

    let x_max = field.xs.last().copied().unwrap_or(0.0);
    let t_max = field.ts.last().copied().unwrap_or(0.0);
    out.push_str(&format!(
        "Space (meters) [0, {x_max:.3e}] -> | Time (arbitrary units) [0, {t_max:.1}] ^\n"
    ));
    push_grid(&mut out, grid);
    out.push_str(&color_bar("Time Wrapping", lo, hi));
    out
}

fn color_bar(label: &str, lo: f64, hi: f64) -> String {
    format!(
        "{label}: {lo:.3e} [{}] {hi:.3e}\n",
        SHADES.iter().collect::<String>()
    )
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
}

/// Index into `n` samples for cell `i` of `cells`.
fn nearest(i: usize, cells: usize, n: usize) -> usize {
    if cells <= 1 || n <= 1 {
        return 0;
    }
    let u = i as f64 / (cells as f64 - 1.0);
    ((u * (n as f64 - 1.0)).round() as usize).min(n - 1)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn unmap_x(col: usize, x_min: f64, x_max: f64, width: usize) -> f64 {
    let u = col as f64 / (width.max(2) as f64 - 1.0);
    x_min + u * (x_max - x_min)
}

fn unmap_y(row: usize, y_min: f64, y_max: f64, height: usize) -> f64 {
    let u = 1.0 - row as f64 / (height.max(2) as f64 - 1.0);
    y_min + u * (y_max - y_min)
}

/// Integer line drawing (Bresenham-ish). Overwrites whatever is underneath.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::curvature_matrix;

    #[test]
    fn region_is_symmetric_and_filled() {
        let p = ParameterSet::new(1.0, 1.0, 1.0, 2.0);
        let txt = render_region(&p, 21, 11);
        let lines: Vec<&str> = txt.lines().collect();
        assert!(lines[0].starts_with("CTC Visualization for omega=1.0"));
        let grid = &lines[2..];
        assert_eq!(grid.len(), 11);

        // Middle row crosses the circle at both sides with interior between.
        let mid = grid[5];
        assert!(mid.trim_start().starts_with('o'));
        assert!(mid.contains('.'));
        assert!(mid.ends_with('o'));

        // The padding rows above and below the circle stay empty.
        assert!(grid[0].is_empty());
        assert!(grid[10].is_empty());
    }

    #[test]
    fn region_with_zero_radius_does_not_panic() {
        let p = ParameterSet::new(1.0, 1.0, 1.0, 0.0);
        let txt = render_region(&p, 20, 8);
        assert!(txt.contains("R=0.0"));
    }

    #[test]
    fn heatmap_puts_row_zero_at_bottom() {
        let m = curvature_matrix(&ParameterSet::new(1.0, 0.0, 1.0, 1.0));
        // Cells: (0,1) = -1 (darkest), (1,0) = +1 (densest), rest 0 (middle).
        let txt = render_heatmap(&m);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "Riemann Curvature Tensor");

        // Rows are printed k = 3, 2, 1, 0; two lines each.
        let row_k0 = lines[8];
        let row_k1 = lines[6];
        assert!(row_k0.starts_with(" 0 |"));
        assert!(row_k1.starts_with(" 1 |"));
        let k0_cells: Vec<char> = row_k0[4..].chars().collect();
        let k1_cells: Vec<char> = row_k1[4..].chars().collect();
        assert_eq!(k0_cells[HEAT_CELL_W], ' ');
        assert_eq!(k1_cells[0], '@');
        assert!(txt.contains("Value: "));
    }

    #[test]
    fn flat_heatmap_renders_mid_shade() {
        let m = curvature_matrix(&ParameterSet::new(0.0, 0.0, 1.0, 1.0));
        let txt = render_heatmap(&m);
        let row = txt.lines().nth(2).unwrap();
        assert!(row.contains(&shade(0.5).to_string().repeat(HEAT_CELL_W)));
    }

    #[test]
    fn contour_is_constant_along_time() {
        let p = ParameterSet::new(2.0, 0.0, 10.0, 1.0);
        let field = TimeWrapField::sample(&p);
        let txt = render_contour(&field, &p, 40, 10);
        let lines: Vec<&str> = txt.lines().collect();
        assert!(lines[0].starts_with("Time vs Space for"));
        let grid = &lines[2..12];
        for row in grid {
            assert_eq!(*row, grid[0]);
        }
        assert!(lines[12].starts_with("Time Wrapping: "));
    }

    #[test]
    fn contour_with_zero_length_reports_empty() {
        let p = ParameterSet::new(2.0, 0.0, 0.0, 1.0);
        let field = TimeWrapField::sample(&p);
        let txt = render_contour(&field, &p, 40, 10);
        assert!(txt.contains("no finite values"));
    }
}
