//! Shared domain types.
//!
//! Everything here is a small value type: built once per run, read by the
//! report/plot/export layers, then dropped. Serializable types are the ones that
//! end up in the JSON export.

use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Recommended angular velocity (rad/s); high enough to trigger CTC formation at R = 1.
pub const RECOMMENDED_OMEGA: f64 = 71619724.3913529;
/// Recommended density (kg/m^3).
pub const RECOMMENDED_RHO: f64 = 1e17;
/// Recommended cylinder length (m).
pub const RECOMMENDED_LENGTH: f64 = 1e7;
/// Recommended cylinder radius (m).
pub const RECOMMENDED_RADIUS: f64 = 1.0;

/// The four cylinder parameters.
///
/// No validation happens on construction: zero and negative values are
/// accepted and flow through the formulas as IEEE-754 arithmetic dictates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Angular velocity (rad/s).
    pub omega: f64,
    /// Density (kg/m^3).
    pub rho: f64,
    /// Cylinder length (m).
    pub length: f64,
    /// Cylinder radius (m).
    pub radius: f64,
}

impl ParameterSet {
    pub fn new(omega: f64, rho: f64, length: f64, radius: f64) -> Self {
        Self {
            omega,
            rho,
            length,
            radius,
        }
    }

    /// The defaults offered at the prompts.
    pub fn recommended() -> Self {
        Self::new(
            RECOMMENDED_OMEGA,
            RECOMMENDED_RHO,
            RECOMMENDED_LENGTH,
            RECOMMENDED_RADIUS,
        )
    }

    /// `omega=…, rho=…, L=…, R=…`, used in plot titles.
    pub fn title_fragment(&self) -> String {
        format!(
            "omega={}, rho={}, L={}, R={}",
            fmt_float(self.omega),
            fmt_float(self.rho),
            fmt_float(self.length),
            fmt_float(self.radius),
        )
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::recommended()
    }
}

/// Which parameter a value belongs to. Drives prompt text and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Omega,
    Rho,
    Length,
    Radius,
}

impl ParamField {
    pub const ALL: [ParamField; 4] = [
        ParamField::Omega,
        ParamField::Rho,
        ParamField::Length,
        ParamField::Radius,
    ];

    /// Short name used in diagnostics.
    pub fn key(self) -> &'static str {
        match self {
            ParamField::Omega => "omega",
            ParamField::Rho => "rho",
            ParamField::Length => "L",
            ParamField::Radius => "R",
        }
    }

    /// Human-readable description including the unit, as shown at the prompt.
    pub fn describe(self) -> &'static str {
        match self {
            ParamField::Omega => "angular velocity (omega) in rad/s",
            ParamField::Rho => "density (rho) in kg/m^3",
            ParamField::Length => "length (L) in meters",
            ParamField::Radius => "radius (R) in meters",
        }
    }

    /// How the recommended value is echoed. The radius default is a whole
    /// number of meters and prints without a fractional part.
    pub fn fmt_default(self, v: f64) -> String {
        match self {
            ParamField::Radius => fmt_whole(v),
            _ => fmt_float(v),
        }
    }

    pub fn get(self, params: &ParameterSet) -> f64 {
        match self {
            ParamField::Omega => params.omega,
            ParamField::Rho => params.rho,
            ParamField::Length => params.length,
            ParamField::Radius => params.radius,
        }
    }

    pub fn set(self, params: &mut ParameterSet, value: f64) {
        match self {
            ParamField::Omega => params.omega = value,
            ParamField::Rho => params.rho = value,
            ParamField::Length => params.length = value,
            ParamField::Radius => params.radius = value,
        }
    }
}

/// Fixed-pattern 4x4 grid loosely named after the Riemann tensor.
///
/// Only the shape is an invariant; the values are whatever
/// `physics::curvature_matrix` put there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureMatrix(Matrix4<f64>);

impl CurvatureMatrix {
    pub const DIM: usize = 4;

    pub fn from_matrix(m: Matrix4<f64>) -> Self {
        Self(m)
    }

    pub fn zeros() -> Self {
        Self(Matrix4::zeros())
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[(row, col)]
    }

    /// Row-major copy, used for printing and export.
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.0[(r, c)];
            }
        }
        rows
    }

    /// Smallest and largest finite entries, or `None` if no entry is finite.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in self.0.iter().copied().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        (lo <= hi).then_some((lo, hi))
    }
}

/// Optimizer criterion.
///
/// Only `maximize_ctc` is recognized, and the optimizer ignores it anyway:
/// any tag is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Criterion {
    #[default]
    MaximizeCtc,
    Other(String),
}

impl Criterion {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "maximize_ctc" => Criterion::MaximizeCtc,
            other => Criterion::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Criterion::MaximizeCtc => "maximize_ctc",
            Criterion::Other(s) => s,
        }
    }
}

/// How the three visualizations are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// Full-screen terminal viewer; each plot blocks until dismissed.
    Tui,
    /// Fixed-size character plots printed to stdout.
    Ascii,
    /// Skip all plots.
    None,
}

/// A full run's configuration as understood by the pipeline.
///
/// Derived from CLI flags, prompt answers and defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub params: ParameterSet,
    pub plot_mode: PlotMode,
    pub plot_width: usize,
    pub plot_height: usize,
    pub criterion: Criterion,
    pub export: Option<PathBuf>,
}

/// Output of evaluating the four formulas for one parameter set.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub params: ParameterSet,
    pub ctc_formed: bool,
    pub stable: bool,
    /// `(rho·G·L) / (R·c²)`; may be infinite or NaN for degenerate input.
    pub stability_ratio: f64,
    pub matrix: CurvatureMatrix,
}

/// Format a float the way the prompts and titles show it.
///
/// Integral values keep a trailing `.0`; very large or very small magnitudes
/// switch to exponent form with a signed, two-digit exponent (`1e+17`,
/// `6.6743e-11`).
pub fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let s = format!("{v:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) => fmt_exponent(mantissa, exp),
            None => s,
        };
    }

    let s = format!("{v}");
    if s.contains('.') { s } else { format!("{s}.0") }
}

/// Like [`fmt_float`], but whole values print as integers (`1`, not `1.0`).
pub fn fmt_whole(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{}", v as i64)
    } else {
        fmt_float(v)
    }
}

/// Rewrite a Rust exponent (`17`, `-11`) as `+17` / `-11`, at least two digits.
pub fn fmt_exponent(mantissa: &str, exp: &str) -> String {
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
