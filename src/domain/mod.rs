//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the cylinder parameters (`ParameterSet`)
//! - the fixed-pattern 4x4 grid (`CurvatureMatrix`)
//! - run configuration (`RunConfig`, `PlotMode`, `Criterion`)
//! - the result of one evaluation (`Evaluation`)

pub mod types;

pub use types::*;
