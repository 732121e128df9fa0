//! Physical constants used by the formulas.

/// Speed of light (m/s).
pub const C: f64 = 3e8;

/// Gravitational constant (m^3 kg^-1 s^-2).
pub const G: f64 = 6.67430e-11;
