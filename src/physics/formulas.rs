//! The four evaluators: CTC check, curvature matrix, stability, optimizer.
//!
//! Formulas are reproduced literally. In particular nothing guards `R = 0`:
//! the stability ratio becomes `±inf` or `NaN` and the comparison follows
//! IEEE-754 (any comparison with `NaN` is false).

use std::f64::consts::PI;

use nalgebra::Matrix4;

use crate::domain::{CurvatureMatrix, Criterion, ParameterSet};

use super::constants::{C, G};

/// `(2π · omega · R) / c`, the quantity compared against 1 by [`check_ctc`].
pub fn ctc_ratio(p: &ParameterSet) -> f64 {
    (2.0 * PI * p.omega * p.radius) / C
}

/// Angular velocity at which [`ctc_ratio`] reaches 1 for the given radius.
pub fn ctc_threshold_omega(radius: f64) -> f64 {
    C / (2.0 * PI * radius)
}

/// A CTC "forms" when the rim speed exceeds the speed of light (strictly).
pub fn check_ctc(p: &ParameterSet) -> bool {
    ctc_ratio(p) > 1.0
}

/// Build the fixed-pattern 4x4 grid.
///
/// `(0,1) = -omega·R`, `(1,0) = omega·R`, `(2,3) = (3,2) = rho·G`, zero elsewhere.
/// The cylinder length does not enter.
pub fn curvature_matrix(p: &ParameterSet) -> CurvatureMatrix {
    let spin = p.omega * p.radius;
    let mass = p.rho * G;
    #[rustfmt::skip]
    let m = Matrix4::new(
        0.0,  -spin, 0.0,  0.0,
        spin,  0.0,  0.0,  0.0,
        0.0,   0.0,  0.0,  mass,
        0.0,   0.0,  mass, 0.0,
    );
    CurvatureMatrix::from_matrix(m)
}

/// `(rho · G · L) / (R · c²)`.
pub fn stability_ratio(p: &ParameterSet) -> f64 {
    (p.rho * G * p.length) / (p.radius * C.powi(2))
}

/// Stable when [`stability_ratio`] is strictly below 1.
pub fn assess_stability(p: &ParameterSet) -> bool {
    stability_ratio(p) < 1.0
}

/// Return the "optimal" parameters.
///
/// There is no search: the result is the same constant tuple for every
/// criterion, including unrecognized ones.
pub fn optimize_parameters(criterion: &Criterion) -> ParameterSet {
    log::debug!("optimize_parameters: criterion={} (ignored)", criterion.tag());
    ParameterSet {
        omega: 1.5 * C / (2.0 * PI * 1.0),
        rho: 1e17,
        length: 1e7,
        radius: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(omega: f64, rho: f64, length: f64, radius: f64) -> ParameterSet {
        ParameterSet::new(omega, rho, length, radius)
    }

    #[test]
    fn recommended_parameters_form_stable_ctc() {
        let p = ParameterSet::recommended();
        assert!(check_ctc(&p));
        assert!((ctc_ratio(&p) - 1.5).abs() < 1e-9);
        assert!(assess_stability(&p));
        let ratio = stability_ratio(&p);
        assert!((ratio - 7.4159e-4).abs() < 1e-7, "ratio={ratio}");
    }

    #[test]
    fn zero_spin_and_density() {
        let p = params(0.0, 0.0, 1.0, 1.0);
        assert!(!check_ctc(&p));
        assert_eq!(curvature_matrix(&p), CurvatureMatrix::zeros());
        assert!(assess_stability(&p));
    }

    #[test]
    fn ctc_matches_threshold_for_positive_radius() {
        for &radius in &[0.5, 1.0, 3.0, 1e3] {
            let threshold = ctc_threshold_omega(radius);
            assert!(!check_ctc(&params(threshold * (1.0 - 1e-9), 1.0, 1.0, radius)));
            assert!(check_ctc(&params(threshold * (1.0 + 1e-9), 1.0, 1.0, radius)));
            assert!(!check_ctc(&params(threshold * 0.5, 1.0, 1.0, radius)));
            assert!(check_ctc(&params(threshold * 2.0, 1.0, 1.0, radius)));
        }
    }

    #[test]
    fn ctc_boundary_is_strict() {
        // Walk a few ulps around the threshold; wherever the ratio lands exactly
        // on 1 the check must report no formation.
        let radius = 1.0;
        let mut omega = ctc_threshold_omega(radius);
        for _ in 0..4 {
            omega = f64::from_bits(omega.to_bits() - 1);
        }
        for _ in 0..9 {
            let p = params(omega, 0.0, 1.0, radius);
            let ratio = ctc_ratio(&p);
            if ratio == 1.0 {
                assert!(!check_ctc(&p));
            }
            assert_eq!(check_ctc(&p), ratio > 1.0);
            omega = f64::from_bits(omega.to_bits() + 1);
        }
    }

    #[test]
    fn matrix_layout_is_exact() {
        let p = params(2.0, 3e10, 7.0, 5.0);
        let m = curvature_matrix(&p);
        for r in 0..4 {
            for c in 0..4 {
                let expected = match (r, c) {
                    (0, 1) => -p.omega * p.radius,
                    (1, 0) => p.omega * p.radius,
                    (2, 3) | (3, 2) => p.rho * G,
                    _ => 0.0,
                };
                assert_eq!(m.get(r, c), expected, "cell ({r},{c})");
            }
        }
    }

    #[test]
    fn matrix_ignores_length() {
        let a = curvature_matrix(&params(12.0, 4e5, 1.0, 2.0));
        let b = curvature_matrix(&params(12.0, 4e5, 9e9, 2.0));
        let c = curvature_matrix(&params(12.0, 4e5, -3.0, 2.0));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn stability_matches_inequality() {
        let cases = [
            params(0.0, 1e17, 1e7, 1.0),
            params(0.0, 1e20, 1e7, 1.0),
            params(0.0, 1e25, 1e9, 2.0),
            params(0.0, 5.0, 1.0, 1e-3),
        ];
        for p in cases {
            let lhs = p.rho * G * p.length;
            let rhs = p.radius * C * C;
            assert_eq!(assess_stability(&p), lhs < rhs, "{p:?}");
        }
    }

    #[test]
    fn zero_radius_follows_ieee() {
        let p = params(1.0, 1e17, 1e7, 0.0);
        assert!(stability_ratio(&p).is_infinite());
        assert!(!assess_stability(&p));

        // 0/0 -> NaN, and NaN < 1 is false.
        let p = params(1.0, 0.0, 1e7, 0.0);
        assert!(stability_ratio(&p).is_nan());
        assert!(!assess_stability(&p));

        // Negative numerator over zero -> -inf, which compares below 1.
        let p = params(1.0, -1e17, 1e7, 0.0);
        assert!(assess_stability(&p));
    }

    #[test]
    fn optimizer_is_constant() {
        let expected = ParameterSet::new(1.5 * C / (2.0 * PI), 1e17, 1e7, 1.0);
        for criterion in [
            Criterion::MaximizeCtc,
            Criterion::from_tag("minimize_cost"),
            Criterion::from_tag(""),
        ] {
            assert_eq!(optimize_parameters(&criterion), expected);
        }
        let omega = optimize_parameters(&Criterion::default()).omega;
        assert!((omega - 71_619_724.391_352_9).abs() < 1e-6);
    }
}
