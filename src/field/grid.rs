//! Sample grids: `linspace`, the CTC region boundary and the time-wrapping field.

use std::f64::consts::PI;

use crate::domain::ParameterSet;

/// Number of angle samples along the region boundary.
pub const REGION_SAMPLES: usize = 100;
/// Samples per axis of the time-wrapping grid.
pub const FIELD_SAMPLES: usize = 100;
/// Upper bound of the time axis (arbitrary units).
pub const TIME_MAX: f64 = 10.0;
/// Number of filled-contour levels.
pub const CONTOUR_LEVELS: usize = 50;

/// `n` evenly spaced samples over `[start, end]`, both endpoints included.
///
/// `n = 1` yields `[start]`; `n = 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last sample so rounding never overshoots `end`.
            out[n - 1] = end;
            out
        }
    }
}

/// Boundary of the CTC region: a circle of radius `R` around the origin.
pub fn region_boundary(p: &ParameterSet) -> Vec<(f64, f64)> {
    linspace(0.0, 2.0 * PI, REGION_SAMPLES)
        .into_iter()
        .map(|theta| (p.radius * theta.cos(), p.radius * theta.sin()))
        .collect()
}

/// `sin(2π · omega · x / L)` sampled over space `[0, L]` and time `[0, 10]`.
///
/// The value does not depend on time; the grid is still two-dimensional so
/// it renders as a contour plot.
#[derive(Debug, Clone)]
pub struct TimeWrapField {
    /// Space samples (m).
    pub xs: Vec<f64>,
    /// Time samples (arbitrary units).
    pub ts: Vec<f64>,
    /// Row-major values: `values[ti * xs.len() + xi]`.
    pub values: Vec<f64>,
}

impl TimeWrapField {
    pub fn sample(p: &ParameterSet) -> Self {
        Self::sample_with(p, FIELD_SAMPLES, FIELD_SAMPLES)
    }

    pub fn sample_with(p: &ParameterSet, nx: usize, nt: usize) -> Self {
        let xs = linspace(0.0, p.length, nx);
        let ts = linspace(0.0, TIME_MAX, nt);
        let row: Vec<f64> = xs.iter().map(|&x| time_wrap(p, x)).collect();
        let mut values = Vec::with_capacity(nx * nt);
        for _ in &ts {
            values.extend_from_slice(&row);
        }
        Self { xs, ts, values }
    }

    pub fn get(&self, ti: usize, xi: usize) -> f64 {
        self.values[ti * self.xs.len() + xi]
    }

    /// Smallest and largest finite value, or `None` when nothing is finite
    /// (e.g. `L = 0`, where every `x / L` is NaN).
    pub fn min_max(&self) -> Option<(f64, f64)> {
        finite_range(self.values.iter().copied())
    }
}

/// Value of the time-wrapping field at position `x`.
pub fn time_wrap(p: &ParameterSet, x: f64) -> f64 {
    ((2.0 * PI * p.omega * x) / p.length).sin()
}

/// Index of the contour band containing `v`, or `None` for non-finite values.
///
/// Values outside `[lo, hi]` clamp to the first/last band.
pub fn contour_band(v: f64, lo: f64, hi: f64, levels: usize) -> Option<usize> {
    if !v.is_finite() {
        return None;
    }
    let levels = levels.max(1);
    let u = normalize(v, lo, hi)?;
    Some(((u * levels as f64) as usize).min(levels - 1))
}

/// Map `v` into `[0, 1]` over `[lo, hi]`.
///
/// A degenerate range (`hi == lo`) maps every finite value to 0.5.
pub fn normalize(v: f64, lo: f64, hi: f64) -> Option<f64> {
    if !(v.is_finite() && lo.is_finite() && hi.is_finite()) {
        return None;
    }
    let span = hi - lo;
    if span.abs() < f64::EPSILON * lo.abs().max(hi.abs()).max(1.0) {
        return Some(0.5);
    }
    Some(((v - lo) / span).clamp(0.0, 1.0))
}

pub(crate) fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    (lo <= hi).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let xs = linspace(0.0, 10.0, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 10.0);
        assert!((xs[1] - 10.0 / 99.0).abs() < 1e-12);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(3.0, 4.0, 0).is_empty());
    }

    #[test]
    fn region_boundary_is_closed_circle() {
        let p = ParameterSet::new(1.0, 1.0, 1.0, 2.5);
        let pts = region_boundary(&p);
        assert_eq!(pts.len(), REGION_SAMPLES);
        for &(x, y) in &pts {
            assert!(((x * x + y * y).sqrt() - 2.5).abs() < 1e-12);
        }
        let (x0, y0) = pts[0];
        let (xn, yn) = pts[pts.len() - 1];
        assert!((x0 - xn).abs() < 1e-12 && (y0 - yn).abs() < 1e-9);
    }

    #[test]
    fn field_has_expected_shape_and_values() {
        let p = ParameterSet::new(0.25, 0.0, 8.0, 1.0);
        let f = TimeWrapField::sample(&p);
        assert_eq!(f.xs.len(), FIELD_SAMPLES);
        assert_eq!(f.ts.len(), FIELD_SAMPLES);
        assert_eq!(f.values.len(), FIELD_SAMPLES * FIELD_SAMPLES);
        assert_eq!(f.ts[FIELD_SAMPLES - 1], TIME_MAX);
        assert_eq!(f.xs[FIELD_SAMPLES - 1], 8.0);

        // At x = L the phase is 2π·omega = π/2.
        assert!((f.get(0, FIELD_SAMPLES - 1) - 1.0).abs() < 1e-12);
        // Constant along the time axis.
        assert_eq!(f.get(0, 37), f.get(63, 37));
        assert_eq!(f.get(5, 0), 0.0);
    }

    #[test]
    fn zero_length_field_is_all_nan() {
        let p = ParameterSet::new(1.0, 1.0, 0.0, 1.0);
        let f = TimeWrapField::sample_with(&p, 4, 3);
        assert!(f.values.iter().all(|v| v.is_nan()));
        assert_eq!(f.min_max(), None);
    }

    #[test]
    fn contour_band_clamps_and_skips_nan() {
        assert_eq!(contour_band(-1.0, -1.0, 1.0, 50), Some(0));
        assert_eq!(contour_band(1.0, -1.0, 1.0, 50), Some(49));
        assert_eq!(contour_band(0.0, -1.0, 1.0, 50), Some(25));
        assert_eq!(contour_band(5.0, -1.0, 1.0, 50), Some(49));
        assert_eq!(contour_band(f64::NAN, -1.0, 1.0, 50), None);
    }

    #[test]
    fn normalize_handles_flat_range() {
        assert_eq!(normalize(0.0, 0.0, 0.0), Some(0.5));
        assert_eq!(normalize(2.0, 0.0, 4.0), Some(0.5));
        assert_eq!(normalize(f64::INFINITY, 0.0, 4.0), None);
    }
}
