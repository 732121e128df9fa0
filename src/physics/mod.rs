//! Rotating-cylinder formulas: physical constants and the four evaluators.
//!
//! These are illustrative closed-form expressions, not derived physics. They
//! are small pure functions so the pipeline, tests and renderers can call them
//! independently.

pub mod constants;
pub mod formulas;

pub use constants::*;
pub use formulas::*;
