//! Command-line parsing for the CTC visualizer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the formulas and renderers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::PlotMode;

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ctc", version, about = "Rotating-cylinder CTC toy calculator and visualizer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a parameter set, print the verdicts and show the three plots.
    ///
    /// Parameters not given as flags are asked for on stdin.
    Run(RunArgs),
    /// Print the "optimal" parameter set only.
    Optimize(OptimizeArgs),
}

/// Options for a full evaluation run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Angular velocity in rad/s (prompted for when omitted).
    #[arg(long, allow_negative_numbers = true)]
    pub omega: Option<f64>,

    /// Density in kg/m^3 (prompted for when omitted).
    #[arg(long, allow_negative_numbers = true)]
    pub rho: Option<f64>,

    /// Cylinder length in meters (prompted for when omitted).
    #[arg(short = 'L', long, allow_negative_numbers = true)]
    pub length: Option<f64>,

    /// Cylinder radius in meters (prompted for when omitted).
    #[arg(short = 'R', long, allow_negative_numbers = true)]
    pub radius: Option<f64>,

    /// Use recommended values for omitted parameters instead of prompting.
    #[arg(long)]
    pub defaults: bool,

    /// How to show the plots.
    #[arg(long, value_enum, default_value_t = PlotMode::Tui)]
    pub plot: PlotMode,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,

    /// Optimizer criterion (only `maximize_ctc` is recognized; others are accepted).
    #[arg(long, default_value = "maximize_ctc")]
    pub criterion: String,

    /// Write the evaluation and optimal parameters to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for the optimizer-only command.
#[derive(Debug, Parser)]
pub struct OptimizeArgs {
    /// Optimizer criterion (only `maximize_ctc` is recognized; others are accepted).
    #[arg(long, default_value = "maximize_ctc")]
    pub criterion: String,
}
