//! Formatted terminal output: verdict lines, matrix dump, optimal block.
//!
//! We keep formatting code in one place so:
//! - the formulas stay free of presentation concerns
//! - output changes are localized (the wording is asserted in tests below)

use crate::domain::{CurvatureMatrix, ParamField, ParameterSet, fmt_exponent, fmt_float};

/// Printed instead of the region plot when no CTC forms.
pub const SKIP_REGION_PLOT: &str = "No CTC formation, skipping plot.";

/// `CTC Formation: Yes|No`
pub fn format_ctc_formation(formed: bool) -> String {
    format!("CTC Formation: {}", if formed { "Yes" } else { "No" })
}

/// `Stability: Stable` (followed by a blank line) or `Stability: Unstable`.
pub fn format_stability(stable: bool) -> String {
    format!("Stability: {}", if stable { "Stable\n" } else { "Unstable" })
}

/// The closing verdict sentence.
pub fn format_time_travel(formed: bool) -> String {
    if formed {
        "Based on the input parameters time travel is theoretically possible All aboard the AIC starship."
            .to_string()
    } else {
        "Based on the input parameters, time travel is not possible.".to_string()
    }
}

/// Header plus a bracketed dump of all 16 cells.
///
/// Cells use a fixed scientific layout (`-7.16197244e+07`) with a leading
/// space for non-negative values so columns line up.
pub fn format_matrix(matrix: &CurvatureMatrix) -> String {
    let mut out = String::from("Riemann Curvature Tensor:\n");
    let rows = matrix.to_rows();
    for (r, row) in rows.iter().enumerate() {
        out.push_str(if r == 0 { "[[" } else { " [" });
        let cells: Vec<String> = row.iter().map(|&v| fmt_cell(v)).collect();
        out.push_str(&cells.join(" "));
        out.push(']');
        if r + 1 == rows.len() {
            out.push(']');
        } else {
            out.push('\n');
        }
    }
    out
}

/// The `Optimal Parameters:` block.
pub fn format_optimal(p: &ParameterSet) -> String {
    let mut out = String::from("Optimal Parameters:\n");
    out.push_str(&format!(
        "  Angular Velocity (omega): {} rad/s\n",
        fmt_float(p.omega)
    ));
    out.push_str(&format!("  Density (rho): {} kg/m^3\n", fmt_float(p.rho)));
    out.push_str(&format!("  Length (L): {} meters\n", fmt_float(p.length)));
    out.push_str(&format!(
        "  Radius (R): {} meters",
        ParamField::Radius.fmt_default(p.radius)
    ));
    out
}

fn fmt_cell(v: f64) -> String {
    if !v.is_finite() {
        return format!("{:>15}", fmt_float(v));
    }
    // -omega·R is -0.0 when omega = 0; print it as plain zero.
    let v = if v == 0.0 { 0.0 } else { v };
    let s = format!("{v:.8e}");
    let body = match s.split_once('e') {
        Some((mantissa, exp)) => fmt_exponent(mantissa, exp),
        None => s,
    };
    if v < 0.0 {
        body
    } else {
        format!(" {body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{curvature_matrix, optimize_parameters};
    use crate::domain::Criterion;

    #[test]
    fn verdict_lines() {
        assert_eq!(format_ctc_formation(true), "CTC Formation: Yes");
        assert_eq!(format_ctc_formation(false), "CTC Formation: No");
        assert_eq!(format_stability(true), "Stability: Stable\n");
        assert_eq!(format_stability(false), "Stability: Unstable");
        assert!(format_time_travel(true).contains("theoretically possible"));
        assert!(format_time_travel(false).ends_with("time travel is not possible."));
    }

    #[test]
    fn matrix_dump_layout() {
        let m = curvature_matrix(&ParameterSet::recommended());
        let text = format_matrix(&m);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Riemann Curvature Tensor:");
        assert_eq!(
            lines[1],
            "[[ 0.00000000e+00 -7.16197244e+07  0.00000000e+00  0.00000000e+00]"
        );
        assert_eq!(
            lines[3],
            " [ 0.00000000e+00  0.00000000e+00  0.00000000e+00  6.67430000e+06]"
        );
        assert!(lines[4].ends_with("]]"));
    }

    #[test]
    fn zero_matrix_dump_has_no_negative_zero() {
        let m = curvature_matrix(&ParameterSet::new(0.0, 0.0, 1.0, 1.0));
        assert!(!format_matrix(&m).contains('-'));
    }

    #[test]
    fn optimal_block() {
        let text = format_optimal(&optimize_parameters(&Criterion::MaximizeCtc));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Optimal Parameters:");
        assert!(lines[1].starts_with("  Angular Velocity (omega): 71619724.39135"));
        assert!(lines[1].ends_with(" rad/s"));
        assert_eq!(lines[2], "  Density (rho): 1e+17 kg/m^3");
        assert_eq!(lines[3], "  Length (L): 10000000.0 meters");
        assert_eq!(lines[4], "  Radius (R): 1 meters");
    }
}
