//! `ctc-sim` library crate.
//!
//! The binary (`ctc`) is a thin wrapper around this library so that:
//!
//! - the formulas are testable without spawning processes
//! - the text report and plots can be driven headless
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod field;
pub mod io;
pub mod physics;
pub mod plot;
pub mod report;
pub mod tui;
