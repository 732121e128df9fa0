//! Console report text.
//!
//! Everything the run prints to stdout is built here as plain strings so the
//! wording is testable without capturing the process output.

pub mod format;

pub use format::*;
