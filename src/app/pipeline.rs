//! Shared evaluation pipeline used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! evaluate -> report -> plots -> optimizer -> report
//!
//! The plots are pushed through a `PlotSink` so the same sequence drives the
//! blocking TUI viewer, the ASCII renderer and tests.

use std::io::Write;

use crate::domain::{Criterion, Evaluation, ParameterSet, RunConfig};
use crate::error::{AppError, EXIT_TERMINAL};
use crate::field::TimeWrapField;
use crate::physics;
use crate::report;

/// Where the three visualizations go. Each call returns once the plot has been
/// shown (for the TUI: once the user dismissed it).
pub trait PlotSink {
    fn show_heatmap(&mut self, eval: &Evaluation) -> Result<(), AppError>;
    fn show_region(&mut self, params: &ParameterSet) -> Result<(), AppError>;
    fn show_time_wrap(&mut self, params: &ParameterSet, field: &TimeWrapField) -> Result<(), AppError>;
}

/// Discards every plot (`--plot none`).
pub struct NoPlots;

impl PlotSink for NoPlots {
    fn show_heatmap(&mut self, _eval: &Evaluation) -> Result<(), AppError> {
        Ok(())
    }

    fn show_region(&mut self, _params: &ParameterSet) -> Result<(), AppError> {
        Ok(())
    }

    fn show_time_wrap(&mut self, _params: &ParameterSet, _field: &TimeWrapField) -> Result<(), AppError> {
        Ok(())
    }
}

/// Prints the character-grid renderings to a writer (`--plot ascii`).
pub struct AsciiPlots<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> AsciiPlots<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self { out, width, height }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.out, "{text}").map_err(write_error)
    }
}

impl<W: Write> PlotSink for AsciiPlots<W> {
    fn show_heatmap(&mut self, eval: &Evaluation) -> Result<(), AppError> {
        let text = crate::plot::render_heatmap(&eval.matrix);
        self.emit(&text)
    }

    fn show_region(&mut self, params: &ParameterSet) -> Result<(), AppError> {
        let text = crate::plot::render_region(params, self.width, self.height);
        self.emit(&text)
    }

    fn show_time_wrap(&mut self, params: &ParameterSet, field: &TimeWrapField) -> Result<(), AppError> {
        let text = crate::plot::render_contour(field, params, self.width, self.height);
        self.emit(&text)
    }
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub evaluation: Evaluation,
    pub optimal: ParameterSet,
}

/// Evaluate the four formulas for one parameter set.
pub fn evaluate(params: &ParameterSet) -> Evaluation {
    if params.radius == 0.0 {
        log::warn!("radius is zero; stability ratio divides by zero");
    }
    if params.length == 0.0 {
        log::warn!("length is zero; time-wrapping field is undefined");
    }

    let evaluation = Evaluation {
        params: *params,
        ctc_formed: physics::check_ctc(params),
        stable: physics::assess_stability(params),
        stability_ratio: physics::stability_ratio(params),
        matrix: physics::curvature_matrix(params),
    };

    log::debug!(
        "evaluate: ctc_ratio={:e} threshold_omega={:e} stability_ratio={:e}",
        physics::ctc_ratio(params),
        physics::ctc_threshold_omega(params.radius),
        evaluation.stability_ratio,
    );
    evaluation
}

/// Run the full report: print verdicts, show plots in order, print the optimum.
pub fn run_session<W: Write, P: PlotSink>(
    config: &RunConfig,
    out: &mut W,
    plots: &mut P,
) -> Result<RunOutput, AppError> {
    let evaluation = evaluate(&config.params);

    writeln!(out, "\n{}", report::format_ctc_formation(evaluation.ctc_formed)).map_err(write_error)?;
    writeln!(out, "\n{}", report::format_matrix(&evaluation.matrix)).map_err(write_error)?;
    out.flush().map_err(write_error)?;
    plots.show_heatmap(&evaluation)?;

    writeln!(out, "\n{}", report::format_stability(evaluation.stable)).map_err(write_error)?;

    if evaluation.ctc_formed {
        out.flush().map_err(write_error)?;
        plots.show_region(&evaluation.params)?;
    } else {
        writeln!(out, "{}", report::SKIP_REGION_PLOT).map_err(write_error)?;
    }

    writeln!(out, "\n{}\n", report::format_time_travel(evaluation.ctc_formed)).map_err(write_error)?;
    out.flush().map_err(write_error)?;

    let field = TimeWrapField::sample(&evaluation.params);
    plots.show_time_wrap(&evaluation.params, &field)?;

    let optimal = optimize(&config.criterion);
    writeln!(out, "\n{}", report::format_optimal(&optimal)).map_err(write_error)?;
    out.flush().map_err(write_error)?;

    Ok(RunOutput { evaluation, optimal })
}

/// Optimizer entry point shared by `run` and `optimize`.
pub fn optimize(criterion: &Criterion) -> ParameterSet {
    if let Criterion::Other(tag) = criterion {
        log::info!("unrecognized criterion '{tag}'; using the maximize_ctc result");
    }
    physics::optimize_parameters(criterion)
}

fn write_error(e: std::io::Error) -> AppError {
    AppError::new(EXIT_TERMINAL, format!("Failed to write output: {e}"))
}
