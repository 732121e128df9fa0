//! Input/output helpers.
//!
//! - JSON export of a run (`export`)

pub mod export;

pub use export::*;
