//! Export an evaluation to JSON.
//!
//! The export is meant to be easy to consume in notebooks or downstream
//! scripts: inputs, verdicts, the 4x4 grid and the optimizer output.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::app::pipeline::RunOutput;
use crate::domain::ParameterSet;
use crate::error::{AppError, EXIT_EXPORT};

/// On-disk schema of an exported run.
///
/// Non-finite numbers (e.g. the stability ratio at `R = 0`) are written as
/// `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportFile {
    pub tool: String,
    pub generated: String,
    pub params: ParameterSet,
    pub ctc_formed: bool,
    pub stable: bool,
    pub stability_ratio: Option<f64>,
    pub matrix: [[Option<f64>; 4]; 4],
    pub optimal: ParameterSet,
}

impl ExportFile {
    pub fn from_run(run: &RunOutput) -> Self {
        let eval = &run.evaluation;
        let rows = eval.matrix.to_rows();
        Self {
            tool: "ctc".to_string(),
            generated: Local::now().to_rfc3339(),
            params: eval.params,
            ctc_formed: eval.ctc_formed,
            stable: eval.stable,
            stability_ratio: finite(eval.stability_ratio),
            matrix: rows.map(|row| row.map(finite)),
            optimal: run.optimal,
        }
    }
}

/// Write the run to a JSON file.
pub fn write_export_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_EXPORT, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &ExportFile::from_run(run))
        .map_err(|e| AppError::new(EXIT_EXPORT, format!("Failed to write export JSON: {e}")))?;

    log::info!("wrote export to {}", path.display());
    Ok(())
}

/// Read an exported JSON file back.
pub fn read_export_json(path: &Path) -> Result<ExportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_EXPORT, format!("Failed to open export JSON '{}': {e}", path.display())))?;
    let export: ExportFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_EXPORT, format!("Invalid export JSON: {e}")))?;
    Ok(export)
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
