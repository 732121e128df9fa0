//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - collects the four parameters (flags, prompts or defaults)
//! - runs the evaluation pipeline with the selected plot front-end
//! - writes the optional export

use std::io::{self, IsTerminal, Write};

use clap::Parser;

use crate::cli::{Command, OptimizeArgs, RunArgs};
use crate::domain::{Criterion, ParameterSet, PlotMode, RunConfig};
use crate::error::{AppError, EXIT_TERMINAL};

pub mod pipeline;

/// Entry point for the `ctc` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `ctc` and `ctc --omega 5` to behave like `ctc run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Optimize(args) => handle_optimize(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let params = collect_parameters(&args)?;
    let mut config = run_config_from_args(&args, params);
    config.plot_mode = resolve_plot_mode(config.plot_mode, io::stdout().is_terminal());
    log::debug!("run config: {config:?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let run = match config.plot_mode {
        PlotMode::Tui => pipeline::run_session(&config, &mut out, &mut crate::tui::TuiPlots)?,
        PlotMode::Ascii => {
            let mut plots = pipeline::AsciiPlots::new(io::stdout(), config.plot_width, config.plot_height);
            pipeline::run_session(&config, &mut out, &mut plots)?
        }
        PlotMode::None => pipeline::run_session(&config, &mut out, &mut pipeline::NoPlots)?,
    };

    if let Some(path) = &config.export {
        crate::io::write_export_json(path, &run)?;
    }

    Ok(())
}

fn handle_optimize(args: OptimizeArgs) -> Result<(), AppError> {
    let optimal = pipeline::optimize(&Criterion::from_tag(&args.criterion));
    let mut out = io::stdout().lock();
    writeln!(out, "{}", crate::report::format_optimal(&optimal))
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to write output: {e}")))
}

/// Resolve the four parameters: flags win, then prompts (or defaults with `--defaults`).
fn collect_parameters(args: &RunArgs) -> Result<ParameterSet, AppError> {
    let given = [args.omega, args.rho, args.length, args.radius];
    let defaults = ParameterSet::recommended();

    if args.defaults || given.iter().all(Option::is_some) {
        return Ok(crate::cli::prompt::fill_defaults(given, &defaults));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let params = crate::cli::prompt::prompt_parameters(given, &defaults, &mut input, &mut output)?;
    Ok(params)
}

pub fn run_config_from_args(args: &RunArgs, params: ParameterSet) -> RunConfig {
    RunConfig {
        params,
        plot_mode: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        criterion: Criterion::from_tag(&args.criterion),
        export: args.export.clone(),
    }
}

/// The full-screen viewer needs a terminal; without one, fall back to ASCII plots.
fn resolve_plot_mode(requested: PlotMode, stdout_is_terminal: bool) -> PlotMode {
    if requested == PlotMode::Tui && !stdout_is_terminal {
        log::warn!("stdout is not a terminal; showing plots as ASCII instead");
        return PlotMode::Ascii;
    }
    requested
}

/// Rewrite argv so `ctc` defaults to `ctc run`.
///
/// Rules:
/// - `ctc`                       -> `ctc run`
/// - `ctc --omega 5 ...`         -> `ctc run --omega 5 ...`
/// - `ctc --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "optimize");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
