//! Headless plot rendering.
//!
//! Character-grid versions of the three visualizations, used by
//! `--plot ascii` and by tests.

pub mod ascii;

pub use ascii::*;
