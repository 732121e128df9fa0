//! Sampled geometry behind the three visualizations.
//!
//! Renderers never compute anything themselves: the circle boundary, the
//! time-wrapping grid and the color scaling all live here so the TUI and the
//! ASCII renderers draw exactly the same data.

pub mod grid;
pub mod palette;

pub use grid::*;
pub use palette::*;
