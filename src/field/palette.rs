//! Color scale shared by the heatmap and the contour plot.

use plotters::style::colors::colormaps::ViridisRGB;

/// Ramp characters for the ASCII renderers, light to dense.
pub const SHADES: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Viridis color at `u ∈ [0, 1]` (clamped).
pub fn viridis(u: f64) -> (u8, u8, u8) {
    // The colormap unwraps its float conversions, so NaN must not reach it.
    let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
    let c = ViridisRGB::get_color(u);
    (c.0, c.1, c.2)
}

/// Shade character at `u ∈ [0, 1]` (clamped).
pub fn shade(u: f64) -> char {
    let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
    let idx = ((u * SHADES.len() as f64) as usize).min(SHADES.len() - 1);
    SHADES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0), (68, 1, 84));
        assert_eq!(viridis(1.0), (254, 232, 37));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    #[test]
    fn shade_is_monotone() {
        let mut prev = 0;
        for i in 0..=20 {
            let idx = SHADES
                .iter()
                .position(|&c| c == shade(i as f64 / 20.0))
                .unwrap();
            assert!(idx >= prev);
            prev = idx;
        }
        assert_eq!(shade(1.0), '@');
        assert_eq!(shade(0.0), ' ');
    }
}
